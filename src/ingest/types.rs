//! Record types shared by ingestion, grouping and aggregation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Academic track an applicant was examined under.
///
/// Serialized names are the output branch keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Stream {
    #[serde(rename = "bunka")]
    Liberal,
    #[serde(rename = "rika")]
    Science,
}

/// Marker words checked in order against a stream cell; first hit wins.
const STREAM_MARKERS: &[(&str, Stream)] = &[("文", Stream::Liberal), ("理", Stream::Science)];

impl Stream {
    /// Resolves a free-text stream cell such as `文科` or `理`.
    pub fn from_marker(text: &str) -> Option<Self> {
        STREAM_MARKERS
            .iter()
            .find(|(marker, _)| text.contains(marker))
            .map(|&(_, stream)| stream)
    }

    /// Output branch key (`bunka` / `rika`).
    pub const fn branch_key(self) -> &'static str {
        match self {
            Self::Liberal => "bunka",
            Self::Science => "rika",
        }
    }
}

/// Fixed vocabulary of tracked test subjects.
///
/// Declaration order is the output order; serialized names are the
/// subject keys consumers look up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Subject {
    /// EJU Japanese as a foreign language.
    #[serde(rename = "日语")]
    Japanese,
    #[serde(rename = "数学1")]
    Math1,
    #[serde(rename = "数学2")]
    Math2,
    /// Integrated humanities (Japan and the World).
    #[serde(rename = "综合")]
    Integrated,
    #[serde(rename = "物理")]
    Physics,
    #[serde(rename = "化学")]
    Chemistry,
    #[serde(rename = "生物")]
    Biology,
    /// English proficiency score.
    #[serde(rename = "托福")]
    Toefl,
}

impl Subject {
    pub const ALL: [Self; 8] = [
        Self::Japanese,
        Self::Math1,
        Self::Math2,
        Self::Integrated,
        Self::Physics,
        Self::Chemistry,
        Self::Biology,
        Self::Toefl,
    ];

    /// Key used for this subject in the output model.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Japanese => "日语",
            Self::Math1 => "数学1",
            Self::Math2 => "数学2",
            Self::Integrated => "综合",
            Self::Physics => "物理",
            Self::Chemistry => "化学",
            Self::Biology => "生物",
            Self::Toefl => "托福",
        }
    }
}

/// One source row with cells already mapped to logical fields.
///
/// `outcome` is `None` when the sheet has no outcome column at all, and
/// `Some("")` when the column exists but the cell is blank.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTableRow {
    pub outcome: Option<String>,
    pub institution: Option<String>,
    pub department: Option<String>,
    pub stream: Option<String>,
    /// Raw subject cells, unparsed.
    pub scores: BTreeMap<Subject, String>,
}

impl RawTableRow {
    pub fn with_score(mut self, subject: Subject, cell: impl Into<String>) -> Self {
        self.scores.insert(subject, cell.into());
        self
    }
}

/// One admitted applicant's outcome for one institution/department.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub year: i32,
    pub stream: Stream,
    pub institution_raw: String,
    pub department_raw: String,
    /// Only successfully parsed values; missing subjects are absent.
    pub subject_scores: BTreeMap<Subject, f64>,
}
