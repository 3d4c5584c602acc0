use std::collections::BTreeMap;
use std::path::Path;

use thiserror::Error;

use crate::{CleanRecord, EntryKind, RawRecord};

#[derive(Error, Debug)]
pub enum BibError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed bibliography: {0}")]
    Parse(String),
}

/// Controls .bib serialization.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Indentation before each field line.
    pub indent: String,
}

impl Default for WriteOptions {
    fn default() -> Self {
        WriteOptions {
            indent: "  ".to_string(),
        }
    }
}

/// Reads and parses a .bib file.
///
/// Uses the `biblatex` crate for robust parsing with LaTeX decoding and
/// structured field extraction.
pub fn read_bibliography(path: &Path) -> Result<Vec<RawRecord>, BibError> {
    let content = std::fs::read_to_string(path)?;
    parse_bibliography(&content)
}

/// Parse .bib content from a string (useful for testing).
pub fn parse_bibliography(content: &str) -> Result<Vec<RawRecord>, BibError> {
    let bibliography =
        biblatex::Bibliography::parse(content).map_err(|e| BibError::Parse(e.to_string()))?;
    Ok(bibliography.iter().map(raw_record).collect())
}

/// Writes cleaned entries to a .bib file, one blank line between entries.
pub fn write_bibliography(
    path: &Path,
    records: &[CleanRecord],
    options: &WriteOptions,
) -> Result<(), BibError> {
    let blocks: Vec<String> = records.iter().map(|r| format_record(r, options)).collect();
    std::fs::write(path, blocks.join("\n"))?;
    Ok(())
}

/// Serializes one cleaned entry as a .bib block.
pub fn format_record(record: &CleanRecord, options: &WriteOptions) -> String {
    let mut out = String::new();
    out.push('@');
    out.push_str(record.kind.as_str());
    out.push('{');
    out.push_str(&record.key);
    out.push_str(",\n");
    let mut first = true;
    for (name, value) in record.fields() {
        if !first {
            out.push_str(",\n");
        }
        first = false;
        out.push_str(&options.indent);
        out.push_str(name);
        out.push_str(" = {");
        out.push_str(value);
        out.push('}');
    }
    out.push_str("\n}\n");
    out
}

fn raw_record(entry: &biblatex::Entry) -> RawRecord {
    let mut fields = BTreeMap::new();
    for (name, chunks) in entry.fields.iter() {
        fields.insert(name.clone(), chunks_to_string(chunks));
    }
    RawRecord {
        key: entry.key.clone(),
        kind: classify(&entry.entry_type),
        fields,
    }
}

fn classify(entry_type: &biblatex::EntryType) -> EntryKind {
    match entry_type {
        biblatex::EntryType::Article => EntryKind::Article,
        biblatex::EntryType::InProceedings => EntryKind::InProceedings,
        biblatex::EntryType::InCollection => EntryKind::InCollection,
        biblatex::EntryType::Thesis => EntryKind::Thesis,
        _ => EntryKind::Misc,
    }
}

/// Convert biblatex chunks to a plain string.
fn chunks_to_string(chunks: &[biblatex::Spanned<biblatex::Chunk>]) -> String {
    chunks
        .iter()
        .map(|c| match &c.v {
            biblatex::Chunk::Normal(s) => s.as_str(),
            biblatex::Chunk::Verbatim(s) => s.as_str(),
            biblatex::Chunk::Math(s) => s.as_str(),
        })
        .collect::<Vec<_>>()
        .join("")
}
