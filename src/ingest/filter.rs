//! Classification of free-text outcome cells.

/// Whether a row counts as an admission sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Admitted,
    Rejected,
}

#[derive(Debug, Clone, Copy)]
enum Pattern {
    Contains(&'static str),
    Exact(&'static str),
}

impl Pattern {
    fn matches(self, text: &str) -> bool {
        match self {
            Self::Contains(needle) => text.contains(needle),
            Self::Exact(value) => text == value,
        }
    }
}

/// Evaluated top to bottom, first match wins. Rejection keywords come first
/// so `不合格` never reaches the `合格` rule.
const OUTCOME_RULES: &[(Pattern, Outcome)] = &[
    // failed
    (Pattern::Contains("不合格"), Outcome::Rejected),
    // did not apply
    (Pattern::Contains("没有出愿"), Outcome::Rejected),
    (Pattern::Contains("未出愿"), Outcome::Rejected),
    // did not sit
    (Pattern::Contains("不考了"), Outcome::Rejected),
    // withdrew
    (Pattern::Contains("放弃"), Outcome::Rejected),
    (Pattern::Contains("取消"), Outcome::Rejected),
    // not yet examined
    (Pattern::Contains("还没考学"), Outcome::Rejected),
    (Pattern::Contains("未知"), Outcome::Rejected),
    (Pattern::Exact("否"), Outcome::Rejected),
    (Pattern::Contains("合格"), Outcome::Admitted),
    (Pattern::Exact("是"), Outcome::Admitted),
    (Pattern::Exact("1"), Outcome::Admitted),
];

/// Classifies an outcome cell.
///
/// An absent or blank cell counts as admitted; unrecognized text is
/// rejected.
pub fn classify(outcome: Option<&str>) -> Outcome {
    let Some(text) = outcome.map(str::trim) else {
        return Outcome::Admitted;
    };
    if text.is_empty() {
        return Outcome::Admitted;
    }

    OUTCOME_RULES
        .iter()
        .find(|(pattern, _)| pattern.matches(text))
        .map_or(Outcome::Rejected, |&(_, outcome)| outcome)
}
