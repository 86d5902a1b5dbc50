//! Core types for reserve calculations

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reserve estimation method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReserveMethod {
    /// Chain Ladder: develop reported losses to ultimate via age-to-age factors
    ChainLadder,

    /// Bornhuetter-Ferguson: blend reported losses with an expected loss ratio
    BornhuetterFerguson,

    /// Frequency-Severity: expected claim count times average severity plus margin
    FrequencySeverity,
}

impl ReserveMethod {
    /// Display name matching the persisted method identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            ReserveMethod::ChainLadder => "Chain Ladder",
            ReserveMethod::BornhuetterFerguson => "Bornhuetter-Ferguson",
            ReserveMethod::FrequencySeverity => "Frequency-Severity",
        }
    }

    /// All methods, in dispatch order
    pub fn all() -> [ReserveMethod; 3] {
        [
            ReserveMethod::ChainLadder,
            ReserveMethod::BornhuetterFerguson,
            ReserveMethod::FrequencySeverity,
        ]
    }
}

/// Normal-approximation confidence interval around a reserve estimate
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub standard_error: f64,
    pub confidence_level: f64,
}

/// Per-cohort reserve breakdown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CohortReserve {
    /// Origin cohort label
    pub cohort: String,

    /// Latest reported cumulative loss
    pub reported: f64,

    /// Projected fully-matured loss
    pub ultimate: f64,

    /// Outstanding reserve (ultimate minus reported)
    pub reserve: f64,
}

/// Method-specific diagnostics attached to a reserve result
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "method_detail")]
pub enum MethodDiagnostics {
    ChainLadder,
    BornhuetterFerguson {
        expected_loss_ratio: f64,
        earned_premiums: f64,
        expected_ultimate_claims: f64,
    },
    FrequencySeverity {
        claim_frequency: f64,
        claim_severity: f64,
        expected_claims: f64,
        total_variance: f64,
    },
}

/// Result of a reserve calculation
///
/// Produced once per invocation, handed to the persistence port, never
/// mutated afterward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReserveResult {
    /// Method used for the calculation
    pub method: ReserveMethod,

    /// Total outstanding reserve across all cohorts
    pub total_reserves: f64,

    /// Per-cohort breakdown (empty for Frequency-Severity, which works
    /// on the whole portfolio)
    pub reserves_by_cohort: Vec<CohortReserve>,

    /// Aggregate development factors (empty for Frequency-Severity)
    pub development_factors: Vec<f64>,

    /// Confidence interval, where the method produces one
    pub confidence_interval: Option<ConfidenceInterval>,

    /// Method-specific diagnostics
    pub diagnostics: MethodDiagnostics,

    /// UTC timestamp of the calculation
    pub calculation_date: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_names() {
        assert_eq!(ReserveMethod::ChainLadder.as_str(), "Chain Ladder");
        assert_eq!(
            ReserveMethod::BornhuetterFerguson.as_str(),
            "Bornhuetter-Ferguson"
        );
        assert_eq!(ReserveMethod::FrequencySeverity.as_str(), "Frequency-Severity");
    }

    #[test]
    fn test_all_methods_distinct() {
        let all = ReserveMethod::all();
        assert_eq!(all.len(), 3);
        assert_ne!(all[0], all[1]);
        assert_ne!(all[1], all[2]);
    }

    #[test]
    fn test_diagnostics_serialize_tagged() {
        let diag = MethodDiagnostics::BornhuetterFerguson {
            expected_loss_ratio: 0.75,
            earned_premiums: 1200.0,
            expected_ultimate_claims: 900.0,
        };
        let json = serde_json::to_string(&diag).unwrap();
        assert!(json.contains("BornhuetterFerguson"));
        assert!(json.contains("earned_premiums"));
    }
}
