//! Data types used by the aggregation pipeline.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::ingest::{Stream, Subject};

/// Grouping key after name normalization.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NormalizedKey {
    pub institution: String,
    /// Empty when the source row had no department.
    pub department: String,
    pub stream: Stream,
}

/// Weighted score distribution of one subject within one group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubjectStatistic {
    pub min: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    /// Unweighted count of contributing samples.
    pub n: usize,
}

/// Statistics for one (institution, department, stream) group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupModel {
    pub subjects: BTreeMap<Subject, SubjectStatistic>,
    /// All records assigned to the group, whatever subjects they carried.
    pub n: usize,
}

/// `institution -> department -> group` for one stream.
pub type Branch = BTreeMap<String, BTreeMap<String, GroupModel>>;

/// Complete score-threshold model, written as `admission_score_model.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[serde(rename = "bunka")]
    pub liberal: Branch,
    #[serde(rename = "rika")]
    pub science: Branch,
    pub version: String,
    pub generated_at: String,
}

impl Model {
    pub const fn branch(&self, stream: Stream) -> &Branch {
        match stream {
            Stream::Liberal => &self.liberal,
            Stream::Science => &self.science,
        }
    }

    /// Looks up one group.
    pub fn group(&self, stream: Stream, institution: &str, department: &str) -> Option<&GroupModel> {
        self.branch(stream).get(institution)?.get(department)
    }
}
