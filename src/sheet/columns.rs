//! Fuzzy mapping from header text to logical fields.

use std::collections::BTreeMap;
use tracing::debug;

use crate::ingest::{RawTableRow, Subject};

const OUTCOME_ALIASES: &[&str] = &[
    "结果", "合否", "是否合格", "最终合格确定", "合格与否", "出愿结果", "status",
];
const INSTITUTION_ALIASES: &[&str] = &["大学", "学校", "大学名", "报考院校", "school", "name"];
const DEPARTMENT_ALIASES: &[&str] = &["学部", "学部名", "报考学部", "department"];
const STREAM_ALIASES: &[&str] = &["文理", "文/理", "文科理科", "bunri"];

fn subject_aliases(subject: Subject) -> &'static [&'static str] {
    match subject {
        Subject::Japanese => &["日语", "日本語", "日语总分", "日语成绩", "EJU日语", "japanese", "jp"],
        Subject::Math1 => &["数学1", "数学一", "数学コース1", "文科数学", "数学成绩", "数学", "math1"],
        Subject::Math2 => &["数学2", "数学二", "数学コース2", "数学", "math2"],
        Subject::Integrated => &["综合", "综合科目", "綜合科目", "文综", "文综成绩", "sogo"],
        Subject::Physics => &["物理", "physics"],
        Subject::Chemistry => &["化学", "chemistry"],
        Subject::Biology => &["生物", "biology"],
        Subject::Toefl => &["托福", "TOEFL", "英语", "英语分数", "英语成绩", "toefl", "en", "english"],
    }
}

/// Index of the column for a field: a header equal to one of the aliases,
/// else the first header that contains, or is contained in, any alias.
///
/// Blank headers are skipped; an empty string is a substring of every alias.
fn find_column(headers: &[String], aliases: &[&str]) -> Option<usize> {
    let exact = headers
        .iter()
        .position(|header| aliases.contains(&header.as_str()));

    exact.or_else(|| {
        headers.iter().position(|header| {
            !header.is_empty()
                && aliases
                    .iter()
                    .any(|alias| header.contains(alias) || alias.contains(header.as_str()))
        })
    })
}

/// Resolved column positions for one sheet.
///
/// Fields are resolved independently, so one column may feed two fields
/// (a bare `数学` header fills both math tracks).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap {
    pub outcome: Option<usize>,
    pub institution: Option<usize>,
    pub department: Option<usize>,
    pub stream: Option<usize>,
    pub subjects: BTreeMap<Subject, usize>,
}

impl ColumnMap {
    /// Resolves every logical field against trimmed header cells.
    pub fn resolve(headers: &[String]) -> Self {
        let subjects = Subject::ALL
            .into_iter()
            .filter_map(|subject| {
                find_column(headers, subject_aliases(subject)).map(|idx| (subject, idx))
            })
            .collect();

        let columns = Self {
            outcome: find_column(headers, OUTCOME_ALIASES),
            institution: find_column(headers, INSTITUTION_ALIASES),
            department: find_column(headers, DEPARTMENT_ALIASES),
            stream: find_column(headers, STREAM_ALIASES),
            subjects,
        };
        debug!(?columns, "Resolved sheet columns");
        columns
    }

    /// Extracts one row. Cells past the end of a short row are absent.
    pub fn extract(&self, record: &csv::StringRecord) -> RawTableRow {
        let cell = |idx: Option<usize>| {
            idx.and_then(|i| record.get(i))
                .map(|value| value.trim().to_string())
        };

        RawTableRow {
            outcome: cell(self.outcome),
            institution: cell(self.institution),
            department: cell(self.department),
            stream: cell(self.stream),
            scores: self
                .subjects
                .iter()
                .filter_map(|(&subject, &idx)| {
                    record.get(idx).map(|value| (subject, value.trim().to_string()))
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_resolves_chinese_headers() {
        let map = ColumnMap::resolve(&headers(&[
            "大学名", "学部", "是否合格", "日语成绩", "综合科目", "托福",
        ]));

        assert_eq!(map.institution, Some(0));
        assert_eq!(map.department, Some(1));
        assert_eq!(map.outcome, Some(2));
        assert_eq!(map.stream, None);
        assert_eq!(map.subjects.get(&Subject::Japanese), Some(&3));
        assert_eq!(map.subjects.get(&Subject::Integrated), Some(&4));
        assert_eq!(map.subjects.get(&Subject::Toefl), Some(&5));
        assert!(!map.subjects.contains_key(&Subject::Physics));
    }

    #[test]
    fn test_bare_math_header_feeds_both_tracks() {
        let map = ColumnMap::resolve(&headers(&["大学", "数学"]));

        assert_eq!(map.subjects.get(&Subject::Math1), Some(&1));
        assert_eq!(map.subjects.get(&Subject::Math2), Some(&1));
    }

    #[test]
    fn test_exact_header_wins_over_earlier_fuzzy_match() {
        let map = ColumnMap::resolve(&headers(&["大学", "数学1", "数学2"]));

        assert_eq!(map.subjects.get(&Subject::Math1), Some(&1));
        assert_eq!(map.subjects.get(&Subject::Math2), Some(&2));
    }

    #[test]
    fn test_header_contained_in_alias() {
        let map = ColumnMap::resolve(&headers(&["学校", "文"]));
        assert_eq!(map.institution, Some(0));
        assert_eq!(map.stream, Some(1));
    }

    #[test]
    fn test_blank_headers_never_match() {
        let map = ColumnMap::resolve(&headers(&["", "大学"]));

        assert_eq!(map.institution, Some(1));
        assert_eq!(map.outcome, None);
        assert!(map.subjects.is_empty());
    }

    #[test]
    fn test_extract_short_row() {
        let map = ColumnMap::resolve(&headers(&["大学", "学部", "日语", "结果"]));
        let record = csv::StringRecord::from(vec![" 東京大学 ", "文学部", " 320 "]);
        let row = map.extract(&record);

        assert_eq!(row.institution.as_deref(), Some("東京大学"));
        assert_eq!(row.department.as_deref(), Some("文学部"));
        assert_eq!(row.outcome, None);
        assert_eq!(row.scores.get(&Subject::Japanese).map(String::as_str), Some("320"));
    }
}
