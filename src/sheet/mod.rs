//! CSV sheet reading.
//!
//! One sheet is one CSV table of outcome rows for a single source year.
//! Header cells are mapped to logical fields by [`ColumnMap`]; the rest of
//! the pipeline only ever sees [`RawTableRow`]s.

mod columns;

pub use columns::ColumnMap;

use regex::Regex;
use std::io::Read;
use std::sync::LazyLock;
use tracing::{debug, warn};

use crate::error::{PipelineError, Result};
use crate::ingest::{RawTableRow, Stream};

static YEAR_IN_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"20(\d{2})").expect("Invalid year pattern"));

/// Sheet-level facts applied to every row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetContext {
    pub year: i32,
    /// `None` for a mixed sheet whose rows carry their own stream cell.
    pub stream: Option<Stream>,
}

impl SheetContext {
    /// Infers context from a sheet name such as `2024文科` or `2023`.
    pub fn from_name(name: &str, fallback_year: i32) -> Self {
        let year = YEAR_IN_NAME
            .captures(name)
            .and_then(|caps| caps[1].parse::<i32>().ok())
            .map_or(fallback_year, |yy| 2000 + yy);

        let stream = if name.contains("文科") {
            Some(Stream::Liberal)
        } else if name.contains("理科") {
            Some(Stream::Science)
        } else {
            None
        };

        Self { year, stream }
    }
}

/// A parsed sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub context: SheetContext,
    pub rows: Vec<RawTableRow>,
}

/// Reads one CSV sheet.
///
/// # Errors
///
/// Returns [`PipelineError::MissingHeader`] when the input has no header row
/// (empty input, or only blank header cells), and [`PipelineError::Csv`]
/// when the header row itself cannot be read. Data cells that are not valid
/// UTF-8 are decoded lossily, so they fail numeric parsing instead of
/// aborting the sheet.
pub fn read_sheet<R: Read>(name: &str, context: SheetContext, reader: R) -> Result<Sheet> {
    let csv_error = |source: csv::Error| PipelineError::Csv {
        sheet: name.to_string(),
        source,
    };

    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()
        .map_err(csv_error)?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect();

    if headers.iter().all(String::is_empty) {
        return Err(PipelineError::MissingHeader {
            sheet: name.to_string(),
        });
    }

    let columns = ColumnMap::resolve(&headers);
    if columns.institution.is_none() {
        warn!(sheet = name, "No institution column found, every row will be dropped");
    }

    let mut rows = Vec::new();
    for result in rdr.byte_records() {
        let record = result.map_err(csv_error)?;
        let cells: Vec<String> = record
            .iter()
            .map(|cell| String::from_utf8_lossy(cell).into_owned())
            .collect();
        rows.push(columns.extract(&csv::StringRecord::from(cells)));
    }

    debug!(sheet = name, rows = rows.len(), "Sheet read");

    Ok(Sheet {
        name: name.to_string(),
        context,
        rows,
    })
}
