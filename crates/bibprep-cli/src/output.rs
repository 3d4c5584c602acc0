use std::collections::BTreeMap;
use std::io::Write;

use bibprep_core::RawRecord;
use owo_colors::OwoColorize;

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

/// Print a per-kind inventory of the parsed bibliography: entry counts, the
/// union of field names, and the keys themselves for sparse kinds.
pub fn print_inventory(
    w: &mut dyn Write,
    records: &[RawRecord],
    color: ColorMode,
) -> std::io::Result<()> {
    let mut groups: BTreeMap<&str, Vec<&RawRecord>> = BTreeMap::new();
    for record in records {
        groups.entry(record.kind.as_str()).or_default().push(record);
    }

    for (kind, items) in &groups {
        writeln!(w, "{}", "-".repeat(20))?;
        let heading = format!("{} {}", kind, items.len());
        if color.enabled() {
            writeln!(w, "{}", heading.bold())?;
        } else {
            writeln!(w, "{}", heading)?;
        }

        let mut fields: Vec<&str> = items
            .iter()
            .flat_map(|r| r.fields.keys().map(String::as_str))
            .collect();
        fields.sort_unstable();
        fields.dedup();
        writeln!(w, "fields: {}", fields.join(", "))?;

        if items.len() < 10 {
            let keys: Vec<&str> = items.iter().map(|r| r.key.as_str()).collect();
            writeln!(w, "They are: {}", keys.join(", "))?;
        }
    }

    Ok(())
}

/// Print the keys of entries dropped because their transformation failed.
pub fn print_errored_keys(
    w: &mut dyn Write,
    keys: &[String],
    color: ColorMode,
) -> std::io::Result<()> {
    let msg = format!("Error when processing {}", keys.join(" "));
    if color.enabled() {
        writeln!(w, "{}", msg.yellow())
    } else {
        writeln!(w, "{}", msg)
    }
}
