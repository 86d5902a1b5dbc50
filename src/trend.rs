//! Linear trend analysis over binned risk-factor aggregates
//!
//! Fits ordinary least squares of a per-bin metric against bin index and
//! tests the slope with a two-tailed Student-t. Bins reuse the cohort
//! assignment (equal-frequency by age), so the "time" axis is the same
//! synthetic ordering the triangle uses.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::records::ExposureRecord;
use crate::triangle::{assign_cohorts, Cohort};

/// Significance threshold for calling a trend directional
const SIGNIFICANCE_LEVEL: f64 = 0.05;

/// Fixed z multiplier for the slope confidence interval
///
/// Deliberately a constant 1.96 regardless of sample size; part of the
/// published output contract.
const SLOPE_CI_Z: f64 = 1.96;

/// Classified direction of a fitted trend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
    InsufficientData,
}

/// Result of a trend analysis for one metric
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendResult {
    /// Human-readable metric name
    pub metric: String,

    /// OLS slope of the metric against bin index
    pub slope: f64,

    /// R-squared of the fit
    pub trend_strength: f64,

    /// Two-tailed p-value of the slope t-test
    pub p_value: f64,

    /// 95% slope confidence interval (fixed-z approximation)
    pub confidence_interval: (f64, f64),

    /// Direction classification
    pub trend_direction: TrendDirection,
}

impl TrendResult {
    fn insufficient(metric: &str) -> Self {
        Self {
            metric: metric.to_string(),
            slope: 0.0,
            trend_strength: 0.0,
            p_value: 1.0,
            confidence_interval: (0.0, 0.0),
            trend_direction: TrendDirection::InsufficientData,
        }
    }
}

/// Fit a trend to an ordered series of per-bin aggregates
///
/// Fewer than two points yields an `InsufficientData` result; otherwise
/// the slope, R-squared, and a two-tailed t-test on the slope with n-2
/// degrees of freedom. A zero slope standard error (constant residuals)
/// maps to t = 0 and p = 1.
pub fn analyze_series(values: &[f64], metric: &str) -> TrendResult {
    let n = values.len();
    if n < 2 {
        return TrendResult::insufficient(metric);
    }

    let n_f = n as f64;
    let mean_x = (n_f - 1.0) / 2.0;
    let mean_y = values.iter().sum::<f64>() / n_f;

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    for (i, &y) in values.iter().enumerate() {
        let dx = i as f64 - mean_x;
        sxx += dx * dx;
        sxy += dx * (y - mean_y);
    }

    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;

    let mut ss_res = 0.0;
    let mut ss_tot = 0.0;
    for (i, &y) in values.iter().enumerate() {
        let predicted = intercept + slope * i as f64;
        ss_res += (y - predicted).powi(2);
        ss_tot += (y - mean_y).powi(2);
    }

    // R-squared; a perfectly fit constant series scores 1.0
    let trend_strength = if ss_tot > 0.0 {
        1.0 - ss_res / ss_tot
    } else if ss_res == 0.0 {
        1.0
    } else {
        0.0
    };

    let mse = ss_res / n_f;
    let se_slope = (mse / sxx).sqrt();

    // Zero slope standard error splits two ways: a flat series has t = 0
    // and p = 1, while a zero-residual fit with nonzero slope is as
    // significant as the test can report
    let df = n_f - 2.0;
    let p_value = if se_slope > 0.0 {
        let t_stat = slope / se_slope;
        two_tailed_p(t_stat.abs(), df)
    } else if slope != 0.0 && df > 0.0 {
        0.0
    } else {
        1.0
    };

    let trend_direction = if p_value < SIGNIFICANCE_LEVEL {
        if slope > 0.0 {
            TrendDirection::Increasing
        } else {
            TrendDirection::Decreasing
        }
    } else {
        TrendDirection::Stable
    };

    TrendResult {
        metric: metric.to_string(),
        slope,
        trend_strength,
        p_value,
        confidence_interval: (slope - SLOPE_CI_Z * se_slope, slope + SLOPE_CI_Z * se_slope),
        trend_direction,
    }
}

/// Two-tailed Student-t probability for |t| with the given degrees of freedom
fn two_tailed_p(abs_t: f64, df: f64) -> f64 {
    match StudentsT::new(0.0, 1.0, df) {
        Ok(dist) => 2.0 * (1.0 - dist.cdf(abs_t)),
        // df <= 0 cannot occur with se > 0 and n >= 3, but never panic here
        Err(_) => 1.0,
    }
}

/// Analyze trends in the four portfolio risk metrics
///
/// Records are split into `config.cohort_count` equal-frequency age bins;
/// each metric is the per-bin mean, fitted against bin index. Empty bins
/// contribute no point. Returns one result per metric, keyed by metric
/// identifier.
pub fn analyze_trends(
    records: &[ExposureRecord],
    config: &EngineConfig,
) -> Result<BTreeMap<String, TrendResult>, EngineError> {
    if records.is_empty() {
        return Err(EngineError::InsufficientData(
            "no exposure records to analyze".to_string(),
        ));
    }

    log::info!("analyzing trends over {} records", records.len());

    let cohorts = assign_cohorts(records, config.cohort_count);

    let mut trends = BTreeMap::new();
    trends.insert(
        "claims_frequency".to_string(),
        analyze_series(
            &bin_means(&cohorts, records, |r| r.claim_indicator()),
            "Claims Frequency",
        ),
    );
    trends.insert(
        "average_charges".to_string(),
        analyze_series(&bin_means(&cohorts, records, |r| r.charges), "Average Charges"),
    );
    trends.insert(
        "average_bmi".to_string(),
        analyze_series(&bin_means(&cohorts, records, |r| r.bmi), "Average BMI"),
    );
    trends.insert(
        "smoker_rate".to_string(),
        analyze_series(
            &bin_means(&cohorts, records, |r| r.smoker_indicator()),
            "Smoker Rate",
        ),
    );

    Ok(trends)
}

/// Per-bin mean of one record field, skipping empty bins
fn bin_means<F>(cohorts: &[Cohort], records: &[ExposureRecord], value: F) -> Vec<f64>
where
    F: Fn(&ExposureRecord) -> f64,
{
    cohorts
        .iter()
        .filter(|c| !c.is_empty())
        .map(|c| {
            let sum: f64 = c.member_indices.iter().map(|&i| value(&records[i])).sum();
            sum / c.member_indices.len() as f64
        })
        .collect()
}
