use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Recency weight per source year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct YearWeights {
    pub weights: BTreeMap<i32, f64>,
    /// Weight for any year not listed in `weights`.
    pub fallback: f64,
}

impl Default for YearWeights {
    fn default() -> Self {
        Self {
            weights: BTreeMap::from([(2024, 1.0), (2023, 0.8), (2022, 0.6)]),
            fallback: 0.5,
        }
    }
}

impl YearWeights {
    pub fn weight_for(&self, year: i32) -> f64 {
        self.weights.get(&year).copied().unwrap_or(self.fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights() {
        let w = YearWeights::default();
        assert_eq!(w.weight_for(2024), 1.0);
        assert_eq!(w.weight_for(2023), 0.8);
        assert_eq!(w.weight_for(2022), 0.6);
        assert_eq!(w.weight_for(2019), 0.5);
        assert_eq!(w.weight_for(2025), 0.5);
    }

    #[test]
    fn test_deserialize_year_keys() {
        let w: YearWeights = serde_json::from_str(r#"{"weights": {"2025": 1.0}}"#).unwrap();
        assert_eq!(w.weight_for(2025), 1.0);
        assert_eq!(w.weight_for(2024), 0.5);
    }
}
