//! Weighted order statistics.

use crate::analyzers::types::SubjectStatistic;

/// One subject observation with its year weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreSample {
    pub value: f64,
    pub weight: f64,
}

impl ScoreSample {
    pub const fn new(value: f64, weight: f64) -> Self {
        Self { value, weight }
    }
}

/// Sorts ascending by value, then weight, so the walk below sees the same
/// sequence whatever the input order was.
fn sort_samples(samples: &mut [ScoreSample]) {
    samples.sort_by(|a, b| {
        a.value
            .total_cmp(&b.value)
            .then_with(|| a.weight.total_cmp(&b.weight))
    });
}

/// Walks sorted samples and returns the first value whose cumulative
/// weight reaches `total * q`.
fn quantile_sorted(sorted: &[ScoreSample], total: f64, q: f64) -> Option<f64> {
    let target = total * q;
    let mut cumulative = 0.0;
    for sample in sorted {
        cumulative += sample.weight;
        if cumulative >= target {
            return Some(sample.value);
        }
    }
    // Only reachable through rounding when q is 1.0.
    sorted.last().map(|s| s.value)
}

/// Weighted quantile of `samples` for `q` in `[0, 1]`.
///
/// Returns `None` for an empty input or a non-positive total weight.
pub fn weighted_quantile(samples: &[ScoreSample], q: f64) -> Option<f64> {
    let mut sorted = samples.to_vec();
    sort_samples(&mut sorted);
    let total: f64 = sorted.iter().map(|s| s.weight).sum();
    if sorted.is_empty() || total <= 0.0 {
        return None;
    }
    quantile_sorted(&sorted, total, q)
}

/// Builds the `{min, p25, p50, p75, n}` summary of one subject.
///
/// Returns `None` when there is nothing to summarize: no samples, or no
/// positive total weight.
pub fn subject_statistic(mut samples: Vec<ScoreSample>) -> Option<SubjectStatistic> {
    sort_samples(&mut samples);
    let total: f64 = samples.iter().map(|s| s.weight).sum();
    if samples.is_empty() || total <= 0.0 {
        return None;
    }

    Some(SubjectStatistic {
        min: samples[0].value,
        p25: quantile_sorted(&samples, total, 0.25)?,
        p50: quantile_sorted(&samples, total, 0.50)?,
        p75: quantile_sorted(&samples, total, 0.75)?,
        n: samples.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::{Rng, SeedableRng};

    fn samples(pairs: &[(f64, f64)]) -> Vec<ScoreSample> {
        pairs.iter().map(|&(v, w)| ScoreSample::new(v, w)).collect()
    }

    #[test]
    fn test_empty_is_none() {
        assert_eq!(weighted_quantile(&[], 0.5), None);
        assert_eq!(subject_statistic(Vec::new()), None);
    }

    #[test]
    fn test_non_positive_weight_is_none() {
        let s = samples(&[(300.0, 0.0), (280.0, 0.0)]);
        assert_eq!(weighted_quantile(&s, 0.5), None);
        assert_eq!(subject_statistic(s), None);

        assert_eq!(subject_statistic(samples(&[(300.0, -1.0)])), None);
    }

    #[test]
    fn test_three_year_median() {
        let s = samples(&[(300.0, 1.0), (280.0, 0.8), (260.0, 0.6)]);

        // cumulative [0.6, 1.4, 2.4], target 1.2
        assert_eq!(weighted_quantile(&s, 0.5), Some(280.0));
        // target 0.6 is reached exactly by the first sample
        assert_eq!(weighted_quantile(&s, 0.25), Some(260.0));
        // target 1.8
        assert_eq!(weighted_quantile(&s, 0.75), Some(300.0));
    }

    #[test]
    fn test_recent_year_pulls_quantile() {
        // Two old low scores against one recent high score
        let s = samples(&[(200.0, 0.5), (210.0, 0.5), (350.0, 1.0)]);
        assert_eq!(weighted_quantile(&s, 0.5), Some(210.0));
        assert_eq!(weighted_quantile(&s, 0.75), Some(350.0));
    }

    #[test]
    fn test_single_sample() {
        let stat = subject_statistic(samples(&[(312.0, 0.6)])).unwrap();
        assert_eq!(
            stat,
            SubjectStatistic { min: 312.0, p25: 312.0, p50: 312.0, p75: 312.0, n: 1 }
        );
    }

    #[test]
    fn test_min_ignores_weight() {
        let stat = subject_statistic(samples(&[(150.0, 0.01), (300.0, 10.0), (310.0, 10.0)])).unwrap();
        assert_eq!(stat.min, 150.0);
        assert_eq!(stat.p25, 300.0);
        assert_eq!(stat.n, 3);
    }

    #[test]
    fn test_quantiles_ordered() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let len = rng.gen_range(1..40);
            let s: Vec<_> = (0..len)
                .map(|_| {
                    let weight = [1.0, 0.8, 0.6, 0.5][rng.gen_range(0..4)];
                    ScoreSample::new(rng.gen_range(0.0..450.0), weight)
                })
                .collect();
            let stat = subject_statistic(s).unwrap();

            assert!(stat.min <= stat.p25);
            assert!(stat.p25 <= stat.p50);
            assert!(stat.p50 <= stat.p75);
            assert_eq!(stat.n, len);
        }
    }

    #[test]
    fn test_order_invariant() {
        const QS: [f64; 5] = [0.1, 0.25, 0.5, 0.75, 0.9];

        let mut rng = StdRng::seed_from_u64(42);
        // Repeated values with differing weights exercise tie handling.
        let mut s: Vec<_> = (0..25u32)
            .map(|i| ScoreSample::new(f64::from(200 + (i * 7) % 60), [1.0, 0.8, 0.6][i as usize % 3]))
            .collect();
        let expected_stat = subject_statistic(s.clone()).unwrap();
        let expected: Vec<_> = QS.iter().map(|&q| weighted_quantile(&s, q)).collect();

        for _ in 0..20 {
            s.shuffle(&mut rng);
            assert_eq!(subject_statistic(s.clone()).unwrap(), expected_stat);
            let actual: Vec<_> = QS.iter().map(|&q| weighted_quantile(&s, q)).collect();
            assert_eq!(actual, expected);
        }
    }

    #[test]
    fn test_full_quantile_is_max() {
        let s = samples(&[(0.1, 0.1), (0.2, 0.2), (0.7, 0.7)]);
        let top = weighted_quantile(&s, 1.0).unwrap();
        assert_relative_eq!(top, 0.7);
    }
}
