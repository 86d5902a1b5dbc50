//! Frequency-Severity reserve estimation
//!
//! Works on the whole portfolio rather than cohorts: expected claims are
//! frequency times severity times exposure, and the reserve adds a
//! normal-approximation margin on the combined frequency/severity variance.

use chrono::Utc;

use super::confidence::{centered_interval, normal_quantile};
use super::types::{MethodDiagnostics, ReserveMethod, ReserveResult};
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::records::ExposureRecord;

/// Sample variance (n-1 denominator) of claim charges; 0 with fewer than
/// two observations
fn sample_variance(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0)
}

/// Calculate reserves using the Frequency-Severity method
pub fn calculate(
    records: &[ExposureRecord],
    config: &EngineConfig,
) -> Result<ReserveResult, EngineError> {
    log::info!(
        "calculating reserves via Frequency-Severity over {} records",
        records.len()
    );

    if records.is_empty() {
        return Err(EngineError::InsufficientData(
            "zero total exposure".to_string(),
        ));
    }

    let total_exposure = records.len() as f64;
    let claim_charges: Vec<f64> = records
        .iter()
        .filter(|r| r.claim)
        .map(|r| r.charges)
        .collect();

    let claim_frequency = claim_charges.len() as f64 / total_exposure;
    let claim_severity = if claim_charges.is_empty() {
        0.0
    } else {
        claim_charges.iter().sum::<f64>() / claim_charges.len() as f64
    };

    let expected_claims = claim_frequency * claim_severity * total_exposure;

    // Binomial variance of the claim count, compounded with the severity
    // sample variance
    let frequency_variance = claim_frequency * (1.0 - claim_frequency) * total_exposure;
    let severity_variance = sample_variance(&claim_charges);
    let total_variance = frequency_variance * claim_severity.powi(2)
        + severity_variance * claim_frequency * total_exposure;

    let std_dev = total_variance.sqrt();
    let margin = normal_quantile(config.confidence_level) * std_dev;
    let total_reserves = expected_claims + margin;

    log::info!("Frequency-Severity total reserves: {:.2}", total_reserves);

    Ok(ReserveResult {
        method: ReserveMethod::FrequencySeverity,
        total_reserves,
        reserves_by_cohort: Vec::new(),
        development_factors: Vec::new(),
        confidence_interval: Some(centered_interval(
            expected_claims,
            std_dev,
            config.confidence_level,
        )),
        diagnostics: MethodDiagnostics::FrequencySeverity {
            claim_frequency,
            claim_severity,
            expected_claims,
            total_variance,
        },
        calculation_date: Utc::now(),
    })
}
