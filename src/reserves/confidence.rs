//! Normal-approximation confidence intervals
//!
//! Uses a fixed 10%-of-reserve standard error rather than a full
//! stochastic reserving method (e.g. Mack). The heuristic is part of the
//! published output contract and must not be replaced.

use statrs::distribution::{ContinuousCDF, Normal};

use super::types::ConfidenceInterval;

/// Standard error heuristic: 10% of the point estimate
const STD_ERROR_FRACTION: f64 = 0.10;

/// Two-sided standard normal quantile for the given confidence level
///
/// Returns z such that P(-z <= Z <= z) = confidence_level.
pub fn normal_quantile(confidence_level: f64) -> f64 {
    // Normal::new only fails on non-finite or non-positive std dev
    let standard_normal = Normal::new(0.0, 1.0).expect("standard normal is well-formed");
    standard_normal.inverse_cdf((1.0 + confidence_level) / 2.0)
}

/// Confidence interval around a total reserve estimate
///
/// std_error = 0.10 * (total_ultimate - total_reported), margin = z * std_error.
pub fn reserve_interval(
    total_ultimate: f64,
    total_reported: f64,
    confidence_level: f64,
) -> ConfidenceInterval {
    let total_reserves = total_ultimate - total_reported;
    let standard_error = total_reserves * STD_ERROR_FRACTION;

    let z = normal_quantile(confidence_level);
    let margin = z * standard_error;

    ConfidenceInterval {
        lower_bound: total_reserves - margin,
        upper_bound: total_reserves + margin,
        standard_error,
        confidence_level,
    }
}

/// Interval centered on an arbitrary estimate with a given standard error
pub fn centered_interval(
    estimate: f64,
    standard_error: f64,
    confidence_level: f64,
) -> ConfidenceInterval {
    let margin = normal_quantile(confidence_level) * standard_error;
    ConfidenceInterval {
        lower_bound: estimate - margin,
        upper_bound: estimate + margin,
        standard_error,
        confidence_level,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_normal_quantile_95() {
        assert_relative_eq!(normal_quantile(0.95), 1.959964, epsilon = 1e-5);
    }

    #[test]
    fn test_normal_quantile_90() {
        assert_relative_eq!(normal_quantile(0.90), 1.644854, epsilon = 1e-5);
    }

    #[test]
    fn test_reserve_interval_symmetry() {
        let ci = reserve_interval(1_100_000.0, 1_000_000.0, 0.95);
        let reserves = 100_000.0;

        assert_relative_eq!(ci.standard_error, 10_000.0);
        assert_relative_eq!(ci.upper_bound - reserves, reserves - ci.lower_bound);
        assert!(ci.lower_bound < reserves && reserves < ci.upper_bound);
    }

    #[test]
    fn test_zero_reserve_collapses_interval() {
        let ci = reserve_interval(500.0, 500.0, 0.95);
        assert_relative_eq!(ci.lower_bound, 0.0);
        assert_relative_eq!(ci.upper_bound, 0.0);
        assert_relative_eq!(ci.standard_error, 0.0);
    }
}
