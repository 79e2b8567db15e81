//! Assembly of group statistics into the two-branch [`Model`].

use chrono::Local;
use std::collections::BTreeMap;
use tracing::debug;

use crate::analyzers::types::{Branch, GroupModel, Model, NormalizedKey};
use crate::ingest::Stream;

/// Schema version written to every model.
pub const SCHEMA_VERSION: &str = "1.0";

/// Department label for records that had no department name.
pub const NO_DEPARTMENT: &str = "(无学部名)";

/// `generatedAt` value of a model built without any source data.
pub const NO_DATA: &str = "no-data";

/// Builds a model stamped with the current local time.
pub fn build_model(groups: impl IntoIterator<Item = (NormalizedKey, GroupModel)>) -> Model {
    build_model_at(groups, Local::now().to_rfc3339())
}

/// Builds a model with an explicit `generatedAt` value.
///
/// Groups without any subject statistic are left out.
pub fn build_model_at(
    groups: impl IntoIterator<Item = (NormalizedKey, GroupModel)>,
    generated_at: String,
) -> Model {
    let mut liberal = Branch::new();
    let mut science = Branch::new();
    let mut skipped = 0usize;

    for (key, group) in groups {
        if group.subjects.is_empty() {
            skipped += 1;
            continue;
        }

        let branch = match key.stream {
            Stream::Liberal => &mut liberal,
            Stream::Science => &mut science,
        };
        let department = if key.department.is_empty() {
            NO_DEPARTMENT.to_string()
        } else {
            key.department
        };
        branch
            .entry(key.institution)
            .or_insert_with(BTreeMap::new)
            .insert(department, group);
    }

    debug!(skipped, "Groups without subject statistics left out");

    Model {
        liberal,
        science,
        version: SCHEMA_VERSION.to_string(),
        generated_at,
    }
}

/// Model emitted when no source data exists at all.
pub fn empty_model() -> Model {
    build_model_at(std::iter::empty(), NO_DATA.to_string())
}
