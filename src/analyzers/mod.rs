//! Grouping and weighted statistics.
//!
//! Admitted records are grouped by normalized (institution, department,
//! stream), each group gets year-weighted min/p25/p50/p75 per subject, and
//! the groups are assembled into the `bunka`/`rika` model.

pub mod aggregate;
pub mod group;
pub mod model;
pub mod quantile;
pub mod types;
pub mod weights;

pub use aggregate::WeightedStatsEngine;
pub use group::group_records;
pub use model::{NO_DATA, NO_DEPARTMENT, SCHEMA_VERSION, build_model, build_model_at, empty_model};
pub use quantile::{ScoreSample, subject_statistic, weighted_quantile};
pub use types::{Branch, GroupModel, Model, NormalizedKey, SubjectStatistic};
pub use weights::YearWeights;
