//! Age-to-age development factor estimation

use serde::{Deserialize, Serialize};

use super::builder::LossTriangle;

/// Ordered age-to-age development factors
///
/// One factor per adjacent development-period pair, indexed by the
/// originating period. Computed from aggregate (cross-cohort) column sums,
/// so a single thin cohort cannot distort an individual ratio.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DevelopmentFactorSeries {
    factors: Vec<f64>,
}

impl DevelopmentFactorSeries {
    /// Factor for the given originating period, if within the series
    pub fn get(&self, index: usize) -> Option<f64> {
        self.factors.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.factors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.factors
    }
}

/// Estimate development factors from the triangle
///
/// factor(p) = sum(col p+1) / sum(col p), with a 1.0 fallback when the
/// denominator is zero. Factors are never negative since triangle cells
/// are non-negative, and never below 1.0 when the denominator is positive
/// because rows are monotone.
pub fn estimate_factors(triangle: &LossTriangle) -> DevelopmentFactorSeries {
    let periods = triangle.period_count();
    let mut factors = Vec::with_capacity(periods.saturating_sub(1));

    for p in 0..periods.saturating_sub(1) {
        let current = triangle.column_sum(p);
        let next = triangle.column_sum(p + 1);
        let factor = if current > 0.0 { next / current } else { 1.0 };
        factors.push(factor);
    }

    DevelopmentFactorSeries { factors }
}
