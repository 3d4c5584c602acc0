use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::authors::{fix_name_prefixes, shorten_author_list};
use crate::venues::{UnrecognizedAbbreviation, VenueTable};
use crate::{CleanRecord, EntryKind, Policy, RawRecord, UrlPreference};

#[derive(Error, Debug)]
pub enum TransformError {
    #[error("{0}")]
    Venue(#[from] UnrecognizedAbbreviation),
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
}

/// Transforms one raw entry into its cleaned form.
///
/// Returns `Ok(None)` for entries the output should not contain: entries
/// without an author, and entries whose keywords mention `nobib`.
pub fn process_record(
    record: &RawRecord,
    venues: &VenueTable,
    policy: &Policy,
) -> Result<Option<CleanRecord>, TransformError> {
    let author = match record.field("author") {
        Some(a) if !a.is_empty() => a,
        _ => return Ok(None),
    };
    if record.field("keywords").is_some_and(|k| k.contains("nobib")) {
        return Ok(None);
    }

    let mut clean = CleanRecord::new(record.key.clone(), record.kind);

    let year = match (record.field("date"), record.field("year")) {
        (Some(date), None) => date.chars().take(4).collect(),
        (_, Some(year)) => year.to_string(),
        (None, None) => return Err(TransformError::MissingField("year")),
    };
    let year_num: Option<i32> = year.trim().parse().ok();
    clean.set("year", year);

    if let Some(url) = select_url(record, policy.url_preference) {
        clean.set("url", url);
    }

    let mut author = fix_name_prefixes(author);
    if policy.shorten_authors {
        author = shorten_author_list(&author);
    }
    clean.set("author", author);

    let keep: &[&str] = match record.kind {
        EntryKind::Article => {
            let journal = record
                .field("journaltitle")
                .ok_or(TransformError::MissingField("journaltitle"))?;
            clean.set("journal", venues.expand(journal, year_num)?);
            if let Some(number) = record.field("number") {
                clean.set("issue", number);
            }
            &["volume", "issue", "publisher", "pages"]
        }
        EntryKind::InProceedings => {
            let booktitle = record
                .field("booktitle")
                .ok_or(TransformError::MissingField("booktitle"))?;
            let expanded = venues.expand(booktitle, year_num)?;
            if policy.proceedings_prefix {
                clean.set("booktitle", format!("Proceedings of {}", expanded));
            } else {
                clean.set("booktitle", expanded);
            }
            &[]
        }
        EntryKind::InCollection => &["booktitle", "pages", "publisher"],
        EntryKind::Thesis => &["institution", "type"],
        EntryKind::Misc => &[],
    };

    for (name, value) in &record.fields {
        if name == "year" || name == "title" || keep.contains(&name.as_str()) {
            clean.set(name, value.clone());
        }
    }

    Ok(Some(clean))
}

/// Picks the canonical URL for an entry. The first source that is present
/// wins, even when it turns out to be unusable.
fn select_url(record: &RawRecord, preference: UrlPreference) -> Option<String> {
    match preference {
        UrlPreference::DoiFirst => {
            if let Some(doi) = record.field("doi") {
                return Some(format!("https://doi.org/{}", doi));
            }
            if let Some(url) = record.field("url") {
                return normalize_url(url);
            }
            arxiv_url(record)
        }
        UrlPreference::UrlFirst => {
            if let Some(url) = record.field("url") {
                return normalize_url(url);
            }
            if let Some(doi) = record.field("doi") {
                return Some(format!("https://doi.org/{}", doi));
            }
            arxiv_url(record)
        }
    }
}

/// Upgrades plain-http URLs and drops values that are not web URLs at all.
fn normalize_url(url: &str) -> Option<String> {
    let url = url.replace("http://", "https://");
    url.starts_with("http").then_some(url)
}

/// Builds an arXiv abstract link for entries carrying a well-formed arXiv
/// eprint identifier.
fn arxiv_url(record: &RawRecord) -> Option<String> {
    static ARXIV_OLD_STYLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\w+/\d+(v\d+)?$").unwrap());
    static ARXIV_NEW_STYLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.\d+(v\d+)?$").unwrap());

    if record.field("eprinttype") != Some("arxiv") {
        return None;
    }
    let eprint = record.field("eprint")?;
    if ARXIV_OLD_STYLE.is_match(eprint) || ARXIV_NEW_STYLE.is_match(eprint) {
        Some(format!("https://arxiv.org/abs/{}", eprint))
    } else {
        None
    }
}
