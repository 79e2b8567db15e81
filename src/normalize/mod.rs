//! Canonicalization of institution and department names.
//!
//! Institution names arrive in simplified Chinese, traditional Chinese and
//! Japanese forms, sometimes with a bracketed abbreviation or a graduate
//! school suffix. [`NameNormalizer`] strips those decorations and maps known
//! variants onto one canonical spelling. Unknown names pass through as
//! stripped, so they are never merged with anything else.

mod variants;

pub use variants::{VariantTable, VariantTables};

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{PipelineError, Result};

/// ASCII or full-width bracket pairs with their contents.
static PARENTHETICAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\([^)]*\)|（[^）]*）").expect("Invalid parenthetical pattern")
});

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid whitespace pattern"));

/// Graduate school suffix and the undergraduate suffix it collapses to.
const GRADUATE_SUFFIXES: &[(&str, &str)] = &[("大学院", "大学"), ("大學院", "大學")];
const UNDERGRADUATE_SUFFIXES: &[&str] = &["大学", "大學"];

/// Which table and stripping rules apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    Institution,
    Department,
}

/// Pure name canonicalizer built once from immutable variant tables.
///
/// `normalize(normalize(x)) == normalize(x)` holds for every input because
/// the constructor rejects tables whose canonical forms are not themselves
/// normalized.
#[derive(Debug, Clone)]
pub struct NameNormalizer {
    institutions: VariantTable,
    departments: VariantTable,
}

impl NameNormalizer {
    pub fn new(tables: VariantTables) -> Result<Self> {
        validate(&tables.institutions, NameKind::Institution)?;
        validate(&tables.departments, NameKind::Department)?;
        Ok(Self {
            institutions: tables.institutions,
            departments: tables.departments,
        })
    }

    /// Normalizer over the built-in tables.
    pub fn with_builtin_tables() -> Result<Self> {
        Self::new(VariantTables::builtin()?)
    }

    /// Returns the canonical form of `raw`. Empty input yields an empty
    /// string, which callers treat as "no entity".
    pub fn normalize(&self, raw: &str, kind: NameKind) -> String {
        let stripped = strip(raw, kind);
        if stripped.is_empty() {
            return stripped;
        }
        match self.table(kind).canonical(&stripped) {
            Some(canonical) => canonical.to_string(),
            None => stripped,
        }
    }

    const fn table(&self, kind: NameKind) -> &VariantTable {
        match kind {
            NameKind::Institution => &self.institutions,
            NameKind::Department => &self.departments,
        }
    }
}

fn strip(raw: &str, kind: NameKind) -> String {
    match kind {
        NameKind::Institution => strip_institution(raw),
        NameKind::Department => WHITESPACE.replace_all(raw.trim(), "").into_owned(),
    }
}

fn strip_institution(raw: &str) -> String {
    let name = raw.trim();
    if name.is_empty() {
        return String::new();
    }

    let without_brackets = PARENTHETICAL.replace_all(name, "");
    collapse_graduate_suffix(without_brackets.trim())
}

/// 東京大学大学院 -> 東京大学, 某大学院 -> 某大学
fn collapse_graduate_suffix(name: &str) -> String {
    for &(graduate, undergraduate) in GRADUATE_SUFFIXES {
        if let Some(base) = name.strip_suffix(graduate) {
            let base = base.trim_end();
            if UNDERGRADUATE_SUFFIXES.iter().any(|suffix| base.ends_with(suffix)) {
                return base.to_string();
            }
            return format!("{base}{undergraduate}");
        }
    }
    name.to_string()
}

fn validate(table: &VariantTable, kind: NameKind) -> Result<()> {
    for (variant, canonical) in table.iter() {
        if canonical.is_empty() || strip(canonical, kind) != canonical {
            return Err(PipelineError::VariantTable(format!(
                "canonical form '{canonical}' of '{variant}' is not in normalized form"
            )));
        }
        if let Some(next) = table.canonical(canonical) {
            if next != canonical {
                return Err(PipelineError::VariantTable(format!(
                    "canonical form '{canonical}' of '{variant}' maps on to '{next}'"
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer() -> NameNormalizer {
        NameNormalizer::with_builtin_tables().unwrap()
    }

    #[test]
    fn test_empty_input() {
        let n = normalizer();
        assert_eq!(n.normalize("", NameKind::Institution), "");
        assert_eq!(n.normalize("   ", NameKind::Institution), "");
        assert_eq!(n.normalize("", NameKind::Department), "");
    }

    #[test]
    fn test_script_variants_merge() {
        let n = normalizer();
        assert_eq!(n.normalize("东京大学", NameKind::Institution), "東京大学");
        assert_eq!(n.normalize("東京大学", NameKind::Institution), "東京大学");
        assert_eq!(n.normalize("早稻田大学", NameKind::Institution), "早稲田大学");
        assert_eq!(n.normalize("東京外國語大學", NameKind::Institution), "東京外国語大学");
    }

    #[test]
    fn test_bracketed_abbreviation_stripped() {
        let n = normalizer();
        assert_eq!(n.normalize("国際基督教大学(ICU)", NameKind::Institution), "国際基督教大学");
        assert_eq!(n.normalize("国际基督教大学（ICU）", NameKind::Institution), "国際基督教大学");
    }

    #[test]
    fn test_graduate_suffix_collapses() {
        let n = normalizer();
        assert_eq!(n.normalize("东京大学院", NameKind::Institution), "東京大学");
        assert_eq!(n.normalize("未登録大学院", NameKind::Institution), "未登録大学");
        assert_eq!(n.normalize("東京大学大学院", NameKind::Institution), "東京大学");
        assert_eq!(n.normalize("早稻田大学 大学院", NameKind::Institution), "早稲田大学");
        assert_eq!(n.normalize("政策研究大学院大学", NameKind::Institution), "政策研究大学院大学");
        assert_eq!(n.normalize("上智大學大学院", NameKind::Institution), "上智大学");
        assert_eq!(n.normalize("某大學院", NameKind::Institution), "某大學");
    }

    #[test]
    fn test_unknown_name_passes_through_stripped() {
        let n = normalizer();
        assert_eq!(n.normalize("  某某学院 (X) ", NameKind::Institution), "某某学院");
    }

    #[test]
    fn test_department_whitespace_removed_without_institution_table() {
        let n = normalizer();
        assert_eq!(n.normalize(" 経済 学部 ", NameKind::Department), "経済学部");
        assert_eq!(n.normalize("东京大学", NameKind::Department), "东京大学");
    }

    #[test]
    fn test_department_table_applies() {
        let tables = VariantTables {
            departments: [("经济学部", "経済学部")].into_iter().collect(),
            ..Default::default()
        };
        let n = NameNormalizer::new(tables).unwrap();
        assert_eq!(n.normalize("经济 学部", NameKind::Department), "経済学部");
    }

    #[test]
    fn test_idempotent() {
        let n = normalizer();
        let inputs = [
            "",
            "东京大学",
            "国際基督教大学(ICU)",
            "上智大學大学院",
            "((a)) 大学院",
            "（x(y)）z",
            "大学院",
            " 某 (a) 学院（b）",
            "(未闭合",
            "Keio University",
        ];
        for kind in [NameKind::Institution, NameKind::Department] {
            for input in inputs {
                let once = n.normalize(input, kind);
                assert_eq!(n.normalize(&once, kind), once, "{input:?} as {kind:?}");
            }
        }
    }

    #[test]
    fn test_idempotent_on_random_names() {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        const FRAGMENTS: &[&str] = &[
            "(", ")", "（", "）", "大学", "大學", "院", "大学院", "大學院", " ", "\t", "　",
            "东京", "東京大学", "上智大學", "ICU", "学部", "a", "",
        ];

        let n = normalizer();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..5000 {
            let len = rng.gen_range(0..10);
            let input: String = (0..len)
                .map(|_| FRAGMENTS[rng.gen_range(0..FRAGMENTS.len())])
                .collect();

            for kind in [NameKind::Institution, NameKind::Department] {
                let once = n.normalize(&input, kind);
                assert_eq!(n.normalize(&once, kind), once, "{input:?} as {kind:?}");
            }
        }
    }

    #[test]
    fn test_rejects_chained_canonical() {
        let tables = VariantTables {
            institutions: [("a大学", "b大学"), ("b大学", "c大学")].into_iter().collect(),
            ..Default::default()
        };
        assert!(matches!(
            NameNormalizer::new(tables),
            Err(PipelineError::VariantTable(_))
        ));
    }

    #[test]
    fn test_rejects_unnormalized_canonical() {
        let tables = VariantTables {
            institutions: [("a", "b大学院")].into_iter().collect(),
            ..Default::default()
        };
        assert!(NameNormalizer::new(tables).is_err());

        let tables = VariantTables {
            departments: [("a", "b c")].into_iter().collect(),
            ..Default::default()
        };
        assert!(NameNormalizer::new(tables).is_err());
    }
}
