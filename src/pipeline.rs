//! End-to-end model building: sheets -> records -> groups -> statistics -> model.

use tracing::{debug, info};

use crate::analyzers::{Model, WeightedStatsEngine, build_model, group_records};
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::ingest::{DropReason, RawRecord, try_ingest};
use crate::normalize::NameNormalizer;
use crate::sheet::Sheet;

/// Row counts for one ingested sheet.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SheetTally {
    pub rows: usize,
    pub admitted: usize,
    pub rejected: usize,
    pub unresolved_stream: usize,
    pub missing_institution: usize,
}

impl SheetTally {
    fn count(&mut self, dropped: Option<DropReason>) {
        self.rows += 1;
        match dropped {
            None => self.admitted += 1,
            Some(DropReason::Rejected) => self.rejected += 1,
            Some(DropReason::UnresolvedStream) => self.unresolved_stream += 1,
            Some(DropReason::MissingInstitution) => self.missing_institution += 1,
        }
    }
}

/// Ingests every row of a sheet, keeping admitted records.
pub fn ingest_sheet(sheet: &Sheet) -> (Vec<RawRecord>, SheetTally) {
    let mut tally = SheetTally::default();
    let mut records = Vec::new();

    for row in &sheet.rows {
        match try_ingest(row, sheet.context.year, sheet.context.stream) {
            Ok(record) => {
                tally.count(None);
                records.push(record);
            }
            Err(reason) => tally.count(Some(reason)),
        }
    }

    (records, tally)
}

/// Immutable collaborators for a model build.
#[derive(Debug, Clone)]
pub struct Pipeline {
    normalizer: NameNormalizer,
    engine: WeightedStatsEngine,
}

impl Pipeline {
    pub const fn new(normalizer: NameNormalizer, engine: WeightedStatsEngine) -> Self {
        Self { normalizer, engine }
    }

    /// Loads the variant tables and weights named by `config`.
    pub fn from_config(config: &PipelineConfig) -> Result<Self> {
        Ok(Self::new(
            config.normalizer()?,
            WeightedStatsEngine::new(config.year_weights.clone()),
        ))
    }

    /// Builds a model from parsed sheets.
    #[tracing::instrument(skip_all, fields(sheets = sheets.len()))]
    pub fn build(&self, sheets: &[Sheet]) -> Model {
        let mut records = Vec::new();

        for sheet in sheets {
            let (mut admitted, tally) = ingest_sheet(sheet);
            info!(
                sheet = %sheet.name,
                year = sheet.context.year,
                stream = sheet.context.stream.map(|s| s.branch_key()),
                admitted = tally.admitted,
                "Sheet ingested"
            );
            debug!(
                sheet = %sheet.name,
                rows = tally.rows,
                rejected = tally.rejected,
                unresolved_stream = tally.unresolved_stream,
                missing_institution = tally.missing_institution,
                "Rows dropped during ingestion"
            );
            records.append(&mut admitted);
        }

        self.build_from_records(records)
    }

    /// Groups, summarizes and assembles already-ingested records.
    pub fn build_from_records(&self, records: Vec<RawRecord>) -> Model {
        let total = records.len();
        let groups = group_records(records, &self.normalizer);
        let summaries = self.engine.summarize_all(&groups);
        let model = build_model(summaries);

        info!(
            records = total,
            groups = groups.len(),
            bunka = model.liberal.len(),
            rika = model.science.len(),
            "Model built"
        );
        model
    }
}
