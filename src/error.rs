//! Error types for the model-building pipeline.

use thiserror::Error;

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Errors that abort a pipeline run.
///
/// Noisy cells, unknown outcomes and unresolvable streams are not errors;
/// those rows are filtered during ingestion.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The sheet has no header row, so no column can be mapped to a field.
    #[error("sheet '{sheet}' has no header row")]
    MissingHeader { sheet: String },

    #[error("failed to read sheet '{sheet}': {source}")]
    Csv {
        sheet: String,
        #[source]
        source: csv::Error,
    },

    #[error("invalid name variant table: {0}")]
    VariantTable(String),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
