//! Turns mapped table rows into [`RawRecord`]s.

use std::collections::BTreeMap;

use crate::ingest::filter::{Outcome, classify};
use crate::ingest::numeric::parse_numeric;
use crate::ingest::types::{RawRecord, RawTableRow, Stream};

/// Why a row did not become a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DropReason {
    /// Outcome cell says the applicant was not admitted.
    Rejected,
    /// Multi-stream sheet and the row's stream cell is missing or unknown.
    UnresolvedStream,
    /// Institution cell is missing or blank.
    MissingInstitution,
}

/// Ingests one row, returning `None` when it is filtered out.
pub fn ingest(row: &RawTableRow, year: i32, default_stream: Option<Stream>) -> Option<RawRecord> {
    try_ingest(row, year, default_stream).ok()
}

/// Like [`ingest`], but reports why a row was dropped.
pub fn try_ingest(
    row: &RawTableRow,
    year: i32,
    default_stream: Option<Stream>,
) -> Result<RawRecord, DropReason> {
    if classify(row.outcome.as_deref()) == Outcome::Rejected {
        return Err(DropReason::Rejected);
    }

    // A sheet-level stream overrides whatever the row says.
    let stream = match default_stream {
        Some(stream) => stream,
        None => row
            .stream
            .as_deref()
            .and_then(Stream::from_marker)
            .ok_or(DropReason::UnresolvedStream)?,
    };

    let institution = row.institution.as_deref().map(str::trim).unwrap_or_default();
    if institution.is_empty() {
        return Err(DropReason::MissingInstitution);
    }

    let subject_scores: BTreeMap<_, _> = row
        .scores
        .iter()
        .filter_map(|(&subject, cell)| parse_numeric(cell).map(|value| (subject, value)))
        .collect();

    Ok(RawRecord {
        year,
        stream,
        institution_raw: institution.to_string(),
        department_raw: row.department.as_deref().map(str::trim).unwrap_or_default().to_string(),
        subject_scores,
    })
}
