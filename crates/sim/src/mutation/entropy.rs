//! Shannon entropy of cumulative allele-frequency tables.

use serde::{Deserialize, Serialize};

/// Observed entropy of a site's allele distribution and the maximum it could
/// reach given the same number of nonzero outcomes. Both are in bits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Entropy {
    pub observed: f64,
    pub max: f64,
}

/// Entropy of a cumulative table whose last entry is the population size.
///
/// The table is turned back into per-allele counts by first differences and
/// normalized by the population size. Zero-probability outcomes contribute
/// nothing, and `max` is `log2` of the number of nonzero outcomes.
pub fn entropy(cumulative: &[usize]) -> Entropy {
    let total = cumulative.last().copied().unwrap_or(0);
    if total == 0 {
        return Entropy {
            observed: 0.0,
            max: 0.0,
        };
    }

    let mut previous = 0;
    let mut observed = 0.0;
    let mut nonzero = 0usize;
    for &c in cumulative {
        let count = c.saturating_sub(previous);
        previous = c;
        if count == 0 {
            continue;
        }
        let p = count as f64 / total as f64;
        observed -= p * p.log2();
        nonzero += 1;
    }

    Entropy {
        // -0.0 for a single certain outcome
        observed: observed.abs(),
        max: (nonzero as f64).log2(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-6;

    #[test]
    fn test_single_outcome_is_zero() {
        for table in [vec![10, 10], vec![0, 10], vec![0, 0, 0, 7], vec![5]] {
            let e = entropy(&table);
            assert!(e.observed.abs() < EPS, "{table:?}");
            assert!(e.max.abs() < EPS);
        }
    }

    #[test]
    fn test_uniform_is_log2_k() {
        let e = entropy(&[5, 10]);
        assert!((e.observed - 1.0).abs() < EPS);
        assert!((e.max - 1.0).abs() < EPS);

        let e = entropy(&[3, 6, 9]);
        assert!((e.observed - 3f64.log2()).abs() < EPS);

        let e = entropy(&[25, 50, 75, 100]);
        assert!((e.observed - 2.0).abs() < EPS);
        assert!((e.max - 2.0).abs() < EPS);
    }

    #[test]
    fn test_skewed_below_max() {
        let e = entropy(&[9, 10]);
        // -(0.9 log2 0.9 + 0.1 log2 0.1)
        assert!((e.observed - 0.468_995_593_6).abs() < EPS);
        assert!(e.observed < e.max);
    }

    #[test]
    fn test_empty_table() {
        let e = entropy(&[]);
        assert_eq!(e.observed, 0.0);
        assert_eq!(e.max, 0.0);
    }
}
