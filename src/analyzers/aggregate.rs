use rayon::prelude::*;
use std::collections::BTreeMap;

use crate::analyzers::quantile::{ScoreSample, subject_statistic};
use crate::analyzers::types::{GroupModel, NormalizedKey};
use crate::analyzers::weights::YearWeights;
use crate::ingest::{RawRecord, Subject};

/// Computes year-weighted per-subject statistics for record groups.
#[derive(Debug, Clone, Default)]
pub struct WeightedStatsEngine {
    weights: YearWeights,
}

impl WeightedStatsEngine {
    pub const fn new(weights: YearWeights) -> Self {
        Self { weights }
    }

    pub const fn weights(&self) -> &YearWeights {
        &self.weights
    }

    /// Summarizes one group.
    ///
    /// Every observation is weighted by its record's year, independent of
    /// subject. A subject with no parsed values, or only non-positive
    /// weights, is left out of `subjects`. The group `n` counts every record.
    pub fn summarize(&self, records: &[RawRecord]) -> GroupModel {
        let weighted: Vec<(&RawRecord, f64)> = records
            .iter()
            .map(|r| (r, self.weights.weight_for(r.year)))
            .collect();

        let subjects = Subject::ALL
            .into_iter()
            .filter_map(|subject| {
                let samples: Vec<ScoreSample> = weighted
                    .iter()
                    .filter_map(|&(record, weight)| {
                        record
                            .subject_scores
                            .get(&subject)
                            .map(|&value| ScoreSample::new(value, weight))
                    })
                    .collect();
                subject_statistic(samples).map(|stat| (subject, stat))
            })
            .collect();

        GroupModel {
            subjects,
            n: records.len(),
        }
    }

    /// Summarizes every group in parallel. Groups are independent, so the
    /// result equals sequential evaluation.
    pub fn summarize_all(
        &self,
        groups: &BTreeMap<NormalizedKey, Vec<RawRecord>>,
    ) -> BTreeMap<NormalizedKey, GroupModel> {
        groups
            .par_iter()
            .map(|(key, records)| (key.clone(), self.summarize(records)))
            .collect()
    }
}
