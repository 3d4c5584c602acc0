use crate::transform;
use crate::{CleanRecord, Policy, RawRecord, VenueTable};

/// Outcome of transforming a whole batch of entries.
#[derive(Debug, Clone, Default)]
pub struct BatchResult {
    pub records: Vec<CleanRecord>,
    /// Keys of entries whose transformation failed.
    pub errored: Vec<String>,
    /// Count of entries filtered out on purpose (no author, or marked `nobib`).
    pub filtered: usize,
}

/// Transforms every entry in order, isolating per-entry failures: a failing
/// entry is logged and dropped while the batch carries on, with its key
/// recorded in `errored`.
pub fn process_all(records: &[RawRecord], venues: &VenueTable, policy: &Policy) -> BatchResult {
    let mut result = BatchResult::default();
    for record in records {
        match transform::process_record(record, venues, policy) {
            Ok(Some(clean)) => result.records.push(clean),
            Ok(None) => {
                tracing::debug!(key = %record.key, "entry filtered out");
                result.filtered += 1;
            }
            Err(err) => {
                tracing::error!(key = %record.key, error = %err, "failed to process entry");
                result.errored.push(record.key.clone());
            }
        }
    }
    result
}
