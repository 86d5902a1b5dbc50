//! Engine configuration
//!
//! All knobs consumed by the reserve estimators and the trend analyzer,
//! with the production defaults. Each calculation takes the config by
//! reference and never mutates it.

use serde::{Deserialize, Serialize};

/// Configuration for reserve and trend calculations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Quantile used for all confidence intervals
    pub confidence_level: f64,

    /// Number of development columns in the loss triangle
    pub development_periods: usize,

    /// Development factor applied beyond the observed window
    pub tail_factor: f64,

    /// Number of origin cohorts (equal-frequency age bins)
    pub cohort_count: usize,

    /// Expected loss ratio driving the Bornhuetter-Ferguson ultimate
    pub expected_loss_ratio: f64,

    /// Loading applied to total charges to approximate earned premium
    pub premium_loading_factor: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            confidence_level: 0.95,
            development_periods: 12,
            tail_factor: 1.05,
            cohort_count: 5,
            expected_loss_ratio: 0.75,
            premium_loading_factor: 1.2,
        }
    }
}

impl EngineConfig {
    /// Set the confidence level
    pub fn with_confidence_level(mut self, level: f64) -> Self {
        self.confidence_level = level;
        self
    }

    /// Set the tail factor
    pub fn with_tail_factor(mut self, tail: f64) -> Self {
        self.tail_factor = tail;
        self
    }

    /// Set the number of origin cohorts
    pub fn with_cohort_count(mut self, count: usize) -> Self {
        self.cohort_count = count;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.confidence_level, 0.95);
        assert_eq!(config.development_periods, 12);
        assert_eq!(config.tail_factor, 1.05);
        assert_eq!(config.cohort_count, 5);
        assert_eq!(config.expected_loss_ratio, 0.75);
        assert_eq!(config.premium_loading_factor, 1.2);
    }

    #[test]
    fn test_builder_helpers() {
        let config = EngineConfig::default()
            .with_confidence_level(0.90)
            .with_tail_factor(1.0)
            .with_cohort_count(3);
        assert_eq!(config.confidence_level, 0.90);
        assert_eq!(config.tail_factor, 1.0);
        assert_eq!(config.cohort_count, 3);
    }
}
