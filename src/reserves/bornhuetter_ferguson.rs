//! Bornhuetter-Ferguson reserve estimation
//!
//! Blends the reported experience with an a-priori expected ultimate
//! derived from earned premium and an expected loss ratio. Earned premium
//! is approximated from total charges with a fixed loading, since the
//! dataset carries no premium column. Cohort reserves are clamped at zero.

use chrono::Utc;

use super::types::{CohortReserve, MethodDiagnostics, ReserveMethod, ReserveResult};
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::records::ExposureRecord;
use crate::triangle::{build_triangle, estimate_factors};

/// Calculate reserves using the Bornhuetter-Ferguson method
pub fn calculate(
    records: &[ExposureRecord],
    config: &EngineConfig,
) -> Result<ReserveResult, EngineError> {
    log::info!(
        "calculating reserves via Bornhuetter-Ferguson over {} records",
        records.len()
    );

    let triangle = build_triangle(records, config);
    if triangle.cohort_count() == 0 {
        return Err(EngineError::InsufficientData(
            "loss triangle has no cohorts".to_string(),
        ));
    }
    let factors = estimate_factors(&triangle);

    let earned_premiums: f64 =
        records.iter().map(|r| r.charges).sum::<f64>() * config.premium_loading_factor;
    let expected_ultimate = earned_premiums * config.expected_loss_ratio;

    let total_reported = triangle.total_reported();

    let mut reserves_by_cohort = Vec::with_capacity(triangle.cohort_count());
    for i in 0..triangle.cohort_count() {
        let reported = triangle.latest_reported(i);

        // Apportion the expected ultimate by reported share; an all-zero
        // book gets zero shares rather than NaN
        let share = if total_reported > 0.0 {
            reported / total_reported
        } else {
            0.0
        };
        let cohort_expected = expected_ultimate * share;

        let dev_factor = factors.get(i).unwrap_or(1.0);
        let unreported_fraction = 1.0 - 1.0 / dev_factor;
        let reserve = (cohort_expected * unreported_fraction).max(0.0);

        reserves_by_cohort.push(CohortReserve {
            cohort: triangle.labels()[i].clone(),
            reported,
            ultimate: reported + reserve,
            reserve,
        });
    }

    let total_reserves: f64 = reserves_by_cohort.iter().map(|c| c.reserve).sum();

    log::info!("Bornhuetter-Ferguson total reserves: {:.2}", total_reserves);

    Ok(ReserveResult {
        method: ReserveMethod::BornhuetterFerguson,
        total_reserves,
        reserves_by_cohort,
        development_factors: factors.as_slice().to_vec(),
        confidence_interval: None,
        diagnostics: MethodDiagnostics::BornhuetterFerguson {
            expected_loss_ratio: config.expected_loss_ratio,
            earned_premiums,
            expected_ultimate_claims: expected_ultimate,
        },
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
            sex: Sex::Male,
            bmi: 24.0,
            children: 1,
            smoker: true,
            region: Region::Southwest,
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
    fn test_premium_and_expected_ultimate_diagnostics() {
        let records: Vec<_> = (0..10).map(|i| record(20 + i, 1000.0)).collect();
        let result = calculate(&records, &EngineConfig::default()).unwrap();

        match result.diagnostics {
            MethodDiagnostics::BornhuetterFerguson {
                expected_loss_ratio,
                earned_premiums,
                expected_ultimate_claims,
            } => {
                assert_relative_eq!(expected_loss_ratio, 0.75);
                assert_relative_eq!(earned_premiums, 10_000.0 * 1.2);
                assert_relative_eq!(expected_ultimate_claims, 10_000.0 * 1.2 * 0.75);
            }
            ref other => panic!("unexpected diagnostics: {:?}", other),
        }
    }

    #[test]
    fn test_single_cohort_hand_calculation() {
        let records = vec![record(30, 700.0), record(40, 300.0)];
        let config = EngineConfig::default().with_cohort_count(1);
        let result = calculate(&records, &config).unwrap();

        // Single cohort: share = 1.0, factor = ratio of first two columns
        let f1 = 1.0 / 12.0 * 0.8 + 0.2;
        let f2 = 2.0 / 12.0 * 0.8 + 0.2;
        let dev_factor = f2 / f1;
        let expected_ultimate = 1000.0 * 1.2 * 0.75;
        let expected_reserve = expected_ultimate * (1.0 - 1.0 / dev_factor);

        assert_relative_eq!(result.total_reserves, expected_reserve, epsilon = 1e-9);
    }

    #[test]
    fn test_reserves_never_negative() {
        let records: Vec<_> = (0..50).map(|i| record(18 + i, 50.0 * (i % 7) as f64)).collect();
        let result = calculate(&records, &EngineConfig::default()).unwrap();

        for cohort in &result.reserves_by_cohort {
            assert!(cohort.reserve >= 0.0, "BF reserve went negative");
        }
    }

    #[test]
    fn test_zero_charges_book_gives_zero_reserves() {
        let records: Vec<_> = (0..10).map(|i| record(20 + i, 0.0)).collect();
        let result = calculate(&records, &EngineConfig::default()).unwrap();

        assert_eq!(result.total_reserves, 0.0);
        assert!(result.total_reserves.is_finite());
    }

    #[test]
    fn test_no_confidence_interval() {
        let records: Vec<_> = (0..10).map(|i| record(20 + i, 400.0)).collect();
        let result = calculate(&records, &EngineConfig::default()).unwrap();
        assert!(result.confidence_interval.is_none());
    }
}
