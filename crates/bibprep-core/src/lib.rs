use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

pub mod authors;
pub mod bib;
pub mod config_file;
pub mod pipeline;
pub mod transform;
pub mod venues;

// Re-export for convenience
pub use bib::{BibError, WriteOptions};
pub use pipeline::BatchResult;
pub use transform::TransformError;
pub use venues::{UnrecognizedAbbreviation, VenueTable, YearAlias};

/// The classes of bibliography entries the pipeline distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Article,
    InProceedings,
    InCollection,
    Thesis,
    Misc,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Article => "article",
            EntryKind::InProceedings => "inproceedings",
            EntryKind::InCollection => "incollection",
            EntryKind::Thesis => "thesis",
            EntryKind::Misc => "misc",
        }
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An entry as parsed from the input file, with all field values flattened
/// to plain strings.
#[derive(Debug, Clone)]
pub struct RawRecord {
    pub key: String,
    pub kind: EntryKind,
    pub fields: BTreeMap<String, String>,
}

impl RawRecord {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

/// A cleaned entry ready to be written back out. Fields keep the order in
/// which they were first set; setting an existing field overwrites its value
/// in place without moving it.
#[derive(Debug, Clone)]
pub struct CleanRecord {
    pub key: String,
    pub kind: EntryKind,
    fields: Vec<(String, String)>,
}

impl CleanRecord {
    pub fn new(key: String, kind: EntryKind) -> Self {
        CleanRecord {
            key,
            kind,
            fields: Vec::new(),
        }
    }

    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| n.as_str() == name) {
            Some((_, v)) => *v = value,
            None => self.fields.push((name.to_string(), value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n.as_str() == name)
            .map(|(_, v)| v.as_str())
    }

    /// Fields in output order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

/// Which source wins when deriving the canonical `url` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UrlPreference {
    /// Build the URL from the DOI when one is present, falling back to the
    /// entry's own `url`, then to an arXiv abstract link.
    DoiFirst,
    /// Keep the entry's own `url` when usable, falling back to the DOI,
    /// then to an arXiv abstract link.
    UrlFirst,
}

/// Tunable transformation behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy {
    pub url_preference: UrlPreference,
    pub shorten_authors: bool,
    pub proceedings_prefix: bool,
}

impl Default for Policy {
    fn default() -> Self {
        Policy {
            url_preference: UrlPreference::DoiFirst,
            shorten_authors: true,
            proceedings_prefix: false,
        }
    }
}

impl Policy {
    /// Legacy preset: entry URLs win over DOIs and author lists are never
    /// shortened; conference booktitles gain a "Proceedings of" prefix.
    pub fn legacy() -> Self {
        Policy {
            url_preference: UrlPreference::UrlFirst,
            shorten_authors: false,
            proceedings_prefix: true,
        }
    }
}

/// Summary of a full clean run over one bibliography file.
#[derive(Debug, Clone)]
pub struct CleanOutcome {
    pub total: usize,
    pub written: usize,
    pub filtered: usize,
    /// Keys of entries that failed to transform and were left out of the output.
    pub errored: Vec<String>,
}

/// Reads a bibliography, transforms every entry, and writes the cleaned
/// entries to `output`. Entries that fail to transform are dropped and
/// reported through the returned [`CleanOutcome`].
pub fn clean_file(
    input: &Path,
    output: &Path,
    venues: &VenueTable,
    policy: &Policy,
) -> Result<CleanOutcome, BibError> {
    let records = bib::read_bibliography(input)?;
    let total = records.len();
    let batch = pipeline::process_all(&records, venues, policy);
    bib::write_bibliography(output, &batch.records, &WriteOptions::default())?;
    Ok(CleanOutcome {
        total,
        written: batch.records.len(),
        filtered: batch.filtered,
        errored: batch.errored,
    })
}
