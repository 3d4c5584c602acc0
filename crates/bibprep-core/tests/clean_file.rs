//! End-to-end tests for [`bibprep_core::clean_file`]: raw .bib in,
//! cleaned .bib out.

use std::path::PathBuf;

use bibprep_core::{BibError, CleanOutcome, Policy, VenueTable, clean_file};
use tempfile::TempDir;

fn write_input(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("raw.bib");
    std::fs::write(&path, content).unwrap();
    path
}

/// Run a whole clean pass over `content` and return the outcome plus the
/// written output file.
fn run(content: &str, policy: &Policy) -> (CleanOutcome, String) {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, content);
    let output = dir.path().join("ref.bib");
    let outcome = clean_file(&input, &output, &VenueTable::builtin(), policy).unwrap();
    let written = std::fs::read_to_string(&output).unwrap();
    (outcome, written)
}

#[test]
fn cleans_a_conference_entry() {
    let input = r#"
@inproceedings{smith2020,
  author = {Smith, John},
  year = {2020},
  booktitle = {ACL},
  title = {A Paper},
  doi = {10.1/x}
}
"#;
    let (outcome, written) = run(input, &Policy::default());

    assert_eq!(outcome.total, 1);
    assert_eq!(outcome.written, 1);
    assert_eq!(outcome.filtered, 0);
    assert!(outcome.errored.is_empty());

    let expected = "\
@inproceedings{smith2020,
  year = {2020},
  url = {https://doi.org/10.1/x},
  author = {Smith, John},
  booktitle = {Annual Meeting of the Association for Computational Linguistics (ACL)},
  title = {A Paper}
}
";
    assert_eq!(written, expected);
}

#[test]
fn upgrades_plain_http_urls() {
    let input = r#"
@misc{site2021,
  author = {Doe, Jane},
  year = {2021},
  title = {A Site},
  url = {http://example.com/page}
}
"#;
    let (_, written) = run(input, &Policy::default());
    assert!(written.contains("url = {https://example.com/page}"));
}

#[test]
fn filters_authorless_and_nobib_entries() {
    let input = r#"
@misc{noauthor,
  title = {Nobody Wrote This},
  year = {2020}
}

@misc{hidden,
  author = {Doe, Jane},
  title = {Not For The Bibliography},
  year = {2020},
  keywords = {draft, nobib}
}
"#;
    let (outcome, written) = run(input, &Policy::default());

    assert_eq!(outcome.total, 2);
    assert_eq!(outcome.written, 0);
    assert_eq!(outcome.filtered, 2);
    assert!(outcome.errored.is_empty());
    assert_eq!(written, "");
}

#[test]
fn failing_entry_does_not_poison_the_batch() {
    let input = r#"
@inproceedings{a,
  author = {Smith, John},
  year = {2020},
  booktitle = {ACL},
  title = {First}
}

@inproceedings{b,
  author = {Doe, Jane},
  year = {2021},
  booktitle = {ACL-XYZ},
  title = {Second}
}

@inproceedings{c,
  author = {Roe, Jan},
  year = {2022},
  booktitle = {EMNLP},
  title = {Third}
}
"#;
    let (outcome, written) = run(input, &Policy::default());

    assert_eq!(outcome.total, 3);
    assert_eq!(outcome.written, 2);
    assert_eq!(outcome.errored, vec!["b".to_string()]);

    assert!(written.contains("@inproceedings{a,"));
    assert!(!written.contains("@inproceedings{b,"));
    assert!(written.contains("@inproceedings{c,"));
    // Survivors keep their input order.
    let a_pos = written.find("@inproceedings{a,").unwrap();
    let c_pos = written.find("@inproceedings{c,").unwrap();
    assert!(a_pos < c_pos);
}

#[test]
fn legacy_policy_keeps_entry_urls_and_prefixes_proceedings() {
    let input = r#"
@inproceedings{smith2020,
  author = {Smith, John},
  year = {2020},
  booktitle = {ACL},
  title = {A Paper},
  doi = {10.1/x},
  url = {https://example.com/paper}
}
"#;
    let (_, written) = run(input, &Policy::legacy());

    assert!(written.contains("url = {https://example.com/paper}"));
    assert!(written.contains(
        "booktitle = {Proceedings of Annual Meeting of the Association for Computational Linguistics (ACL)}"
    ));
}

#[test]
fn naacl_rename_applies_from_2025() {
    let input = r#"
@article{doe2025,
  author = {Doe, Jane},
  date = {2025-06-10},
  journaltitle = {NAACL},
  title = {New Name}
}
"#;
    let (_, written) = run(input, &Policy::default());

    assert!(written.contains("year = {2025}"));
    assert!(written.contains(
        "journal = {Annual Conference of the Nations of the Americas Chapter of the Association for Computational Linguistics (NAACL)}"
    ));
}

#[test]
fn empty_input_produces_empty_output() {
    let (outcome, written) = run("", &Policy::default());

    assert_eq!(outcome.total, 0);
    assert_eq!(outcome.written, 0);
    assert_eq!(outcome.filtered, 0);
    assert!(outcome.errored.is_empty());
    assert_eq!(written, "");
}

#[test]
fn malformed_input_aborts() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "@article{broken,\n  title = {unclosed\n");
    let output = dir.path().join("ref.bib");

    let result = clean_file(&input, &output, &VenueTable::builtin(), &Policy::default());
    assert!(matches!(result, Err(BibError::Parse(_))));
    // Nothing gets written on a parse failure.
    assert!(!output.exists());
}
