//! Chain Ladder reserve estimation
//!
//! Develops the latest reported losses to ultimate via age-to-age factors
//! and takes the difference as the outstanding reserve. The factor applied
//! to cohort `i` is the i-th series entry when one exists, otherwise the
//! configured tail factor. Reserves are intentionally not clamped at zero:
//! a tail factor below 1.0 can produce negative cohort reserves, and that
//! behavior is preserved.

use chrono::Utc;

use super::confidence::reserve_interval;
use super::types::{CohortReserve, MethodDiagnostics, ReserveMethod, ReserveResult};
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::records::ExposureRecord;
use crate::triangle::{build_triangle, estimate_factors, DevelopmentFactorSeries, LossTriangle};

/// Project each cohort's latest reported loss to ultimate
///
/// Errors with `InsufficientData` when the triangle has no cohorts.
pub fn project_ultimates(
    triangle: &LossTriangle,
    factors: &DevelopmentFactorSeries,
    tail_factor: f64,
) -> Result<Vec<f64>, EngineError> {
    if triangle.cohort_count() == 0 {
        return Err(EngineError::InsufficientData(
            "loss triangle has no cohorts".to_string(),
        ));
    }

    let ultimates = (0..triangle.cohort_count())
        .map(|i| {
            let latest = triangle.latest_reported(i);
            let factor = factors.get(i).unwrap_or(tail_factor);
            latest * factor
        })
        .collect();

    Ok(ultimates)
}

/// Calculate reserves using the Chain Ladder method
pub fn calculate(
    records: &[ExposureRecord],
    config: &EngineConfig,
) -> Result<ReserveResult, EngineError> {
    log::info!("calculating reserves via Chain Ladder over {} records", records.len());

    let triangle = build_triangle(records, config);
    let factors = estimate_factors(&triangle);
    let ultimates = project_ultimates(&triangle, &factors, config.tail_factor)?;

    let mut reserves_by_cohort = Vec::with_capacity(triangle.cohort_count());
    for (i, &ultimate) in ultimates.iter().enumerate() {
        let reported = triangle.latest_reported(i);
        reserves_by_cohort.push(CohortReserve {
            cohort: triangle.labels()[i].clone(),
            reported,
            ultimate,
            reserve: ultimate - reported,
        });
    }

    let total_reserves: f64 = reserves_by_cohort.iter().map(|c| c.reserve).sum();
    let total_ultimate: f64 = ultimates.iter().sum();
    let total_reported = triangle.total_reported();

    let interval = reserve_interval(total_ultimate, total_reported, config.confidence_level);

    log::info!("Chain Ladder total reserves: {:.2}", total_reserves);

    Ok(ReserveResult {
        method: ReserveMethod::ChainLadder,
        total_reserves,
        reserves_by_cohort,
        development_factors: factors.as_slice().to_vec(),
        confidence_interval: Some(interval),
        diagnostics: MethodDiagnostics::ChainLadder,
        calculation_date: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{Region, Sex};
    use approx::assert_relative_eq;

    fn record(age: u32, charges: f64) -> ExposureRecord {
        ExposureRecord {
            age,
            sex: Sex::Female,
            bmi: 26.0,
            children: 0,
            smoker: false,
            region: Region::Northwest,
            charges,
            claim: true,
        }
    }

    #[test]
    fn test_empty_records_error() {
        let result = calculate(&[], &EngineConfig::default());
        assert!(matches!(result, Err(EngineError::InsufficientData(_))));
    }

    #[test]
    fn test_reserve_matches_hand_calculation() {
        // One cohort, so the ultimate is latest * factors[0] and the
        // factor is the ratio of the first two column sums.
        let records = vec![record(30, 600.0), record(35, 400.0)];
        let config = EngineConfig::default().with_cohort_count(1);
        let result = calculate(&records, &config).unwrap();

        let base = 1000.0;
        let f1 = 1.0 / 12.0 * 0.8 + 0.2;
        let f2 = 2.0 / 12.0 * 0.8 + 0.2;
        let factor0 = f2 / f1;
        let expected_reserve = base * factor0 - base;

        assert_eq!(result.reserves_by_cohort.len(), 1);
        assert_relative_eq!(result.total_reserves, expected_reserve, epsilon = 1e-9);
        assert_relative_eq!(result.development_factors[0], factor0, epsilon = 1e-12);
    }

    #[test]
    fn test_unit_factors_and_unit_tail_give_zero_reserve() {
        // All charges zero: every factor falls back to 1.0, and with a
        // 1.0 tail the projection is the identity.
        let records: Vec<_> = (0..10).map(|i| record(20 + i, 0.0)).collect();
        let config = EngineConfig::default().with_tail_factor(1.0);
        let result = calculate(&records, &config).unwrap();

        assert_eq!(result.total_reserves, 0.0);
        for cohort in &result.reserves_by_cohort {
            assert_eq!(cohort.reserve, 0.0);
        }
    }

    #[test]
    fn test_negative_reserve_with_sub_unit_tail() {
        // More cohorts than factors forces the tail onto later cohorts;
        // a tail below 1.0 shrinks them, and the reserve goes negative.
        let records: Vec<_> = (0..30).map(|i| record(20 + i, 1000.0)).collect();
        let config = EngineConfig {
            development_periods: 2,
            tail_factor: 0.9,
            ..EngineConfig::default()
        };
        let result = calculate(&records, &config).unwrap();

        // 2 periods -> 1 factor; cohorts 1..4 use the 0.9 tail
        assert!(result
            .reserves_by_cohort
            .iter()
            .skip(1)
            .all(|c| c.reserve < 0.0));
    }

    #[test]
    fn test_confidence_interval_attached() {
        let records: Vec<_> = (0..25).map(|i| record(20 + 2 * i, 800.0)).collect();
        let result = calculate(&records, &EngineConfig::default()).unwrap();

        let ci = result.confidence_interval.expect("chain ladder carries a CI");
        assert_relative_eq!(ci.standard_error, result.total_reserves * 0.10, epsilon = 1e-9);
        assert!(ci.lower_bound <= result.total_reserves);
        assert!(ci.upper_bound >= result.total_reserves);
    }

    #[test]
    fn test_determinism() {
        let records: Vec<_> = (0..40).map(|i| record(18 + i, 123.45 * (i + 1) as f64)).collect();
        let config = EngineConfig::default();

        let a = calculate(&records, &config).unwrap();
        let b = calculate(&records, &config).unwrap();
        assert_eq!(a.total_reserves.to_bits(), b.total_reserves.to_bits());
    }
}
