//! Pipeline configuration.
//!
//! Stored as JSON; every field is optional and falls back to the values
//! that match the known results workbook:
//! ```json
//! {
//!   "year_weights": { "weights": { "2024": 1.0, "2023": 0.8, "2022": 0.6 }, "fallback": 0.5 },
//!   "fallback_year": 2023,
//!   "sheets": { "2024文科": { "year": 2024, "stream": "bunka" } },
//!   "variants_path": "data/name_variants.json"
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::analyzers::YearWeights;
use crate::error::{PipelineError, Result};
use crate::ingest::Stream;
use crate::normalize::{NameNormalizer, VariantTables};
use crate::sheet::SheetContext;

/// Explicit year/stream for a sheet name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetOverride {
    pub year: i32,
    #[serde(default)]
    pub stream: Option<Stream>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub year_weights: YearWeights,
    /// Year for sheets whose name carries no `20NN`.
    pub fallback_year: i32,
    pub sheets: BTreeMap<String, SheetOverride>,
    /// Replaces the built-in name variant tables when set.
    pub variants_path: Option<PathBuf>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        let sheets = [
            ("2024文科", 2024, Some(Stream::Liberal)),
            ("2024理科", 2024, Some(Stream::Science)),
            ("2023", 2023, None),
            ("2022", 2022, None),
        ]
        .into_iter()
        .map(|(name, year, stream)| (name.to_string(), SheetOverride { year, stream }))
        .collect();

        Self {
            year_weights: YearWeights::default(),
            fallback_year: 2023,
            sheets,
            variants_path: None,
        }
    }
}

impl PipelineConfig {
    /// Loads and validates a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let weights = &self.year_weights;
        let bad_weight = weights
            .weights
            .iter()
            .map(|(&year, &w)| (Some(year), w))
            .chain(std::iter::once((None, weights.fallback)))
            .find(|&(_, w)| !w.is_finite() || w < 0.0);

        match bad_weight {
            Some((Some(year), w)) => Err(PipelineError::Configuration(format!(
                "weight {w} for year {year} must be a non-negative number"
            ))),
            Some((None, w)) => Err(PipelineError::Configuration(format!(
                "fallback weight {w} must be a non-negative number"
            ))),
            None => Ok(()),
        }
    }

    /// Year and stream for a sheet: an explicit override, else inferred
    /// from the name.
    pub fn sheet_context(&self, name: &str) -> SheetContext {
        match self.sheets.get(name) {
            Some(o) => SheetContext {
                year: o.year,
                stream: o.stream,
            },
            None => SheetContext::from_name(name, self.fallback_year),
        }
    }

    pub fn variant_tables(&self) -> Result<VariantTables> {
        match &self.variants_path {
            Some(path) => VariantTables::load(path),
            None => VariantTables::builtin(),
        }
    }

    pub fn normalizer(&self) -> Result<NameNormalizer> {
        NameNormalizer::new(self.variant_tables()?)
    }
}
