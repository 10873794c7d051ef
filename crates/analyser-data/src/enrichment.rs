//! Time enrichment: attaches calendar fields to parsed records.

use analyser_core::models::{CalendarFields, EnrichedMessage, MessageRecord};
use tracing::debug;

/// Derive calendar fields for every record.
///
/// Returns a new vector in the same order; `records` is left untouched.
pub fn enrich(records: &[MessageRecord]) -> Vec<EnrichedMessage> {
    let enriched: Vec<EnrichedMessage> = records
        .iter()
        .map(|record| EnrichedMessage {
            record: record.clone(),
            calendar: CalendarFields::from_timestamp(record.timestamp),
        })
        .collect();

    debug!("enrich: derived calendar fields for {} records", enriched.len());
    enriched
}
