use std::collections::HashMap;

use thiserror::Error;

/// A venue code (or one of its hyphen-separated parts) that the table cannot
/// resolve.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unrecognized abbreviation: {code}")]
pub struct UnrecognizedAbbreviation {
    pub code: String,
}

/// Rewrites one abbreviation to another from a given year onward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearAlias {
    pub code: String,
    pub since: i32,
    pub replacement: String,
}

/// Maps venue abbreviations to full names, with year-dependent aliases for
/// venues that renamed themselves.
#[derive(Debug, Clone, Default)]
pub struct VenueTable {
    names: HashMap<String, String>,
    year_aliases: Vec<YearAlias>,
}

impl VenueTable {
    /// An empty table.
    pub fn new() -> Self {
        VenueTable::default()
    }

    /// The built-in table of common NLP/ML venues.
    pub fn builtin() -> Self {
        let mut table = VenueTable::new();
        for (code, name) in BUILTIN_VENUES {
            table.insert(*code, *name);
        }
        // NAACL renamed itself for its 2025 edition.
        table.add_year_alias(YearAlias {
            code: "NAACL".to_string(),
            since: 2025,
            replacement: "NAACL25".to_string(),
        });
        table
    }

    pub fn insert(&mut self, code: impl Into<String>, name: impl Into<String>) {
        self.names.insert(code.into(), name.into());
    }

    pub fn add_year_alias(&mut self, alias: YearAlias) {
        self.year_aliases.push(alias);
    }

    pub fn set_year_aliases(&mut self, aliases: Vec<YearAlias>) {
        self.year_aliases = aliases;
    }

    pub fn contains(&self, code: &str) -> bool {
        self.names.contains_key(code)
    }

    /// Expands an abbreviation like `EMNLP-IJCNLP` to the full venue names
    /// joined with " and ", with the cleaned code appended in parentheses.
    ///
    /// A code whose first hyphen-separated part is unknown passes through
    /// unchanged; a code that starts with a known part but contains an
    /// unknown one is an error.
    pub fn expand(
        &self,
        code: &str,
        year: Option<i32>,
    ) -> Result<String, UnrecognizedAbbreviation> {
        let code = code.replace(['{', '}'], "");
        let parts: Vec<&str> = code.split('-').collect();
        let known: Vec<bool> = parts.iter().map(|p| self.names.contains_key(*p)).collect();
        if known.iter().all(|k| *k) {
            let mut full = String::new();
            for part in &parts {
                let resolved = self.resolve_alias(part, year);
                let name = self.names.get(resolved).ok_or_else(|| {
                    UnrecognizedAbbreviation {
                        code: resolved.to_string(),
                    }
                })?;
                if !full.is_empty() {
                    full.push_str(" and ");
                }
                full.push_str(name);
            }
            full.push_str(" (");
            full.push_str(&code);
            full.push(')');
            Ok(tidy(&full))
        } else if !known[0] {
            Ok(tidy(&code))
        } else {
            Err(UnrecognizedAbbreviation { code })
        }
    }

    /// Applies the first year alias matching `part`, if the entry's year is
    /// known and reaches the alias threshold.
    fn resolve_alias<'a>(&'a self, part: &'a str, year: Option<i32>) -> &'a str {
        if let Some(year) = year {
            for alias in &self.year_aliases {
                if alias.code == part && year >= alias.since {
                    return &alias.replacement;
                }
            }
        }
        part
    }
}

fn tidy(s: &str) -> String {
    let mut s = s.to_string();
    while s.contains("  ") {
        s = s.replace("  ", " ");
    }
    s.trim().to_string()
}

const BUILTIN_VENUES: &[(&str, &str)] = &[
    ("*SEM", "Conference on Lexical and Computational Semantics"),
    ("AAAI", "Association for the Advancement of Artificial Intelligence"),
    ("ACL", "Annual Meeting of the Association for Computational Linguistics"),
    ("ANLC", "Applied Natural Language Processing"),
    ("AI", "Artificial Intelligence"),
    ("AISTATS", "Artificial Intelligence and Statistics"),
    ("ASRU", "IEEE Automatic Speech Recognition and Understanding Workshop"),
    ("CAV", "Computer Aided Verification"),
    ("CHI", "Conference on Human Factors in Computing Systems"),
    ("CL", "Computational Linguistics"),
    (
        "CLCLing",
        "International Conference on Computational Linguistics and Intelligent Text Processing",
    ),
    ("COLING", "International Conference on Computational Linguistics"),
    ("CoNLL", "SIGNLL Conference on Computational Natural Language Learning"),
    ("CVPR", "the IEEE/CVF Conference on Computer Vision and Pattern Recognition"),
    ("COLT", "Conference on Learning Theory"),
    (
        "EACL",
        "Conference of the European Chapter of the Association for Computational Linguistics",
    ),
    ("ECCV", "European Conference on Computer Vision"),
    ("EMNLP", "Conference on Empirical Methods in Natural Language Processing"),
    ("FOCS", "Foundations of Computer Science"),
    ("HLT", "Human Language Technology"),
    ("ICASSP", "International Conference on Acoustics, Speech, and Signal Processing"),
    ("ICCV", "IEEE International Conference on Computer Vision"),
    ("ICIPS", "IEEE International Conference on Intelligent Processing Systems"),
    ("ICLR", "International Conference on Learning Representations"),
    ("ICML", "International Conference on Machine Learning"),
    ("ICRA", "International Conference on Robotics and Automation"),
    ("ICSE", "International Conference on Software Engineering"),
    ("ICTAI", "IEEE International Conference on Tools with Artificial Intelligence"),
    ("IJCAI", "International Joint Conference on Artificial Intelligence"),
    ("IJCNLP", "International Joint Conference on Natural Language Processing"),
    ("ILSVRC", "ImageNet Large Scale Visual Recognition Challenge"),
    ("INLG", "International Natural Language Generation Conference"),
    ("IROS", "International Conference on Intelligent Robots and Systems"),
    ("ISER", "International Symposium on Experimental Robotics"),
    ("IWCS", "International Conference on Computational Semantics"),
    ("IWSLT", "International Conference on Spoken Language Translation"),
    ("JAIR", "Journal of Artificial Intelligence Research"),
    ("JASA", "Journal of the American Statistical Association"),
    ("JMLR", "Journal of Machine Learning Research"),
    ("KDD", "International Conference on Knowledge Discovery and Data Mining"),
    ("LREC", "Language Resources and Evaluation Conference"),
    ("MLSLP", "Symposium on Machine Learning in Speech and Language Processing"),
    (
        "NAACL",
        "Conference of the North American Chapter of the Association for Computational Linguistics",
    ),
    (
        "NAACL25",
        "Annual Conference of the Nations of the Americas Chapter of the Association for Computational Linguistics",
    ),
    ("NeurIPS", "Conference on Neural Information Processing Systems"),
    ("NCB", "Nature Cell Biology"),
    ("NODALIDA", "Nordic Conference on Computational Linguistics"),
    ("OSDI", "Operating Systems Design and Implementation"),
    ("PAMI", "IEEE Transactions on Pattern Analysis and Machine Intelligence"),
    (
        "PNAS",
        "Proceedings of the National Academy of Sciences of the United States of America",
    ),
    ("RECSYS", "ACM Conference on Recommender Systems"),
    ("SALT", "Semantics and Linguistic Theory"),
    ("SIGIR", "ACM Special Interest Group on Information Retrieval"),
    ("SODA", "Symposium on Discrete Algorithms"),
    ("SOSP", "Symposium on Operating Systems Principles"),
    ("STOC", "Symposium on Theory of Computing"),
    ("TACL", "Transactions of the Association for Computational Linguistics"),
    ("TFS", "IEEE Transaction on Fuzzy Systems"),
    ("TNN", "IEEE Transaction on Neural Networks"),
    ("TOIS", "ACM Transactions on Information Systems"),
    ("TSP", "IEEE Transaction on Signal Processing"),
    ("UAI", "Uncertainty in Artificial Intelligence"),
    ("UIST", "User Interface Software and Technology"),
    ("WSDM", "Web Search and Data Mining"),
    ("WMT", "Conference on Machine Translation"),
    ("WWW", "World Wide Web"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_single_known_code() {
        let table = VenueTable::builtin();
        assert_eq!(
            table.expand("ACL", None).unwrap(),
            "Annual Meeting of the Association for Computational Linguistics (ACL)"
        );
    }

    #[test]
    fn test_expand_hyphenated_joint_venue() {
        let table = VenueTable::builtin();
        assert_eq!(
            table.expand("EMNLP-IJCNLP", None).unwrap(),
            "Conference on Empirical Methods in Natural Language Processing and International Joint Conference on Natural Language Processing (EMNLP-IJCNLP)"
        );
    }

    #[test]
    fn test_expand_strips_braces() {
        let table = VenueTable::builtin();
        assert_eq!(
            table.expand("{EMNLP}-{IJCNLP}", None).unwrap(),
            table.expand("EMNLP-IJCNLP", None).unwrap()
        );
    }

    #[test]
    fn test_unknown_first_part_passes_through() {
        let table = VenueTable::builtin();
        assert_eq!(table.expand("Nature", None).unwrap(), "Nature");
        assert_eq!(table.expand("Some-Journal", None).unwrap(), "Some-Journal");
    }

    #[test]
    fn test_known_first_part_with_unknown_rest_errors() {
        let table = VenueTable::builtin();
        let err = table.expand("ACL-XYZ", None).unwrap_err();
        assert_eq!(err.code, "ACL-XYZ");
        assert_eq!(err.to_string(), "unrecognized abbreviation: ACL-XYZ");
    }

    #[test]
    fn test_expand_collapses_doubled_spaces() {
        let mut table = VenueTable::new();
        table.insert("X", " Padded  Name");
        table.insert("Y", "Very    Padded");
        assert_eq!(table.expand("X", None).unwrap(), "Padded Name (X)");
        assert_eq!(table.expand("Y", None).unwrap(), "Very Padded (Y)");
    }

    #[test]
    fn test_empty_code_passes_through() {
        let table = VenueTable::builtin();
        assert_eq!(table.expand("", None).unwrap(), "");
    }

    #[test]
    fn test_naacl_alias_applies_from_2025() {
        let table = VenueTable::builtin();
        assert_eq!(
            table.expand("NAACL", Some(2025)).unwrap(),
            "Annual Conference of the Nations of the Americas Chapter of the Association for Computational Linguistics (NAACL)"
        );
        assert_eq!(
            table.expand("NAACL", Some(2024)).unwrap(),
            "Conference of the North American Chapter of the Association for Computational Linguistics (NAACL)"
        );
        // Without a year the alias stays inactive.
        assert_eq!(
            table.expand("NAACL", None).unwrap(),
            "Conference of the North American Chapter of the Association for Computational Linguistics (NAACL)"
        );
    }

    #[test]
    fn test_alias_with_missing_target_errors() {
        let mut table = VenueTable::new();
        table.insert("OLD", "Old Conference");
        table.add_year_alias(YearAlias {
            code: "OLD".to_string(),
            since: 2000,
            replacement: "NEW".to_string(),
        });
        let err = table.expand("OLD", Some(2001)).unwrap_err();
        assert_eq!(err.code, "NEW");
    }

    #[test]
    fn test_custom_entries_extend_builtin() {
        let mut table = VenueTable::builtin();
        table.insert("XYZ", "Xyz Symposium");
        assert_eq!(table.expand("XYZ", None).unwrap(), "Xyz Symposium (XYZ)");
        assert_eq!(
            table.expand("ACL-XYZ", None).unwrap(),
            "Annual Meeting of the Association for Computational Linguistics and Xyz Symposium (ACL-XYZ)"
        );
    }

    #[test]
    fn test_contains() {
        let table = VenueTable::builtin();
        assert!(table.contains("ACL"));
        assert!(!table.contains("acl"));
    }
}
