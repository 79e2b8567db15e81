use std::collections::BTreeMap;

use crate::analyzers::types::NormalizedKey;
use crate::ingest::RawRecord;
use crate::normalize::{NameKind, NameNormalizer};

/// Buckets records by normalized (institution, department, stream).
///
/// Records whose institution normalizes to nothing are dropped. Input order
/// is kept within each bucket.
pub fn group_records(
    records: impl IntoIterator<Item = RawRecord>,
    normalizer: &NameNormalizer,
) -> BTreeMap<NormalizedKey, Vec<RawRecord>> {
    let mut groups: BTreeMap<NormalizedKey, Vec<RawRecord>> = BTreeMap::new();

    for record in records {
        let institution = normalizer.normalize(&record.institution_raw, NameKind::Institution);
        if institution.is_empty() {
            continue;
        }
        let key = NormalizedKey {
            institution,
            department: normalizer.normalize(&record.department_raw, NameKind::Department),
            stream: record.stream,
        };
        groups.entry(key).or_default().push(record);
    }

    groups
}
