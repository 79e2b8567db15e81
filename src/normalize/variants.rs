use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::error::Result;

const BUILTIN_VARIANTS: &str = include_str!("../../data/name_variants.json");

/// Immutable `variant -> canonical` lookup for one kind of name.
///
/// Stored on disk as a plain JSON object:
/// ```json
/// { "东京大学": "東京大学", "東京大学": "東京大学" }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariantTable(HashMap<String, String>);

impl VariantTable {
    /// Returns the canonical form registered for `name`, if any.
    pub fn canonical(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over all `(variant, canonical)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for VariantTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Institution and department tables, kept separate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VariantTables {
    pub institutions: VariantTable,
    pub departments: VariantTable,
}

impl VariantTables {
    /// The tables compiled into the binary from `data/name_variants.json`.
    pub fn builtin() -> Result<Self> {
        Ok(serde_json::from_str(BUILTIN_VARIANTS)?)
    }

    /// Loads replacement tables from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}
