//! Record ingestion: outcome filtering, numeric parsing and stream
//! resolution for rows coming out of a sheet.

pub mod filter;
pub mod ingester;
pub mod numeric;
pub mod types;

pub use filter::{Outcome, classify};
pub use ingester::{DropReason, ingest, try_ingest};
pub use numeric::parse_numeric;
pub use types::{RawRecord, RawTableRow, Stream, Subject};
