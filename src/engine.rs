//! Reserve engine façade
//!
//! Binds a configuration and an optional persistence port to the pure
//! calculation functions. Each call operates on its own immutable snapshot
//! of records; independent calls can run concurrently without shared
//! state, and `calculate_all` runs the three methods in parallel.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use rayon::prelude::*;

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::persistence::{PersistencePort, StoredCalculation};
use crate::records::ExposureRecord;
use crate::reserves::{self, ReserveMethod, ReserveResult};
use crate::trend::{self, TrendResult};

/// Engine binding config and persistence to the calculation pipeline
///
/// # Example
/// ```ignore
/// let engine = ReserveEngine::new(EngineConfig::default())
///     .with_store(Arc::new(InMemoryStore::new()));
/// let result = engine.calculate(ReserveMethod::ChainLadder, &records)?;
/// ```
#[derive(Clone)]
pub struct ReserveEngine {
    config: EngineConfig,
    store: Option<Arc<dyn PersistencePort>>,
}

impl ReserveEngine {
    /// Create an engine with no persistence attached
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            store: None,
        }
    }

    /// Attach a persistence port
    pub fn with_store(mut self, store: Arc<dyn PersistencePort>) -> Self {
        self.store = Some(store);
        self
    }

    /// Get reference to the engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run one reserve method and persist the result
    ///
    /// Persistence failures are logged and swallowed: the calculation has
    /// already completed and its result is still returned.
    pub fn calculate(
        &self,
        method: ReserveMethod,
        records: &[ExposureRecord],
    ) -> Result<ReserveResult, EngineError> {
        let result = reserves::calculate(method, records, &self.config)?;
        self.persist(StoredCalculation::Reserve(result.clone()));
        Ok(result)
    }

    /// Run all three reserve methods in parallel
    ///
    /// Each method sees the same immutable record snapshot; results come
    /// back in `ReserveMethod::all()` order.
    pub fn calculate_all(
        &self,
        records: &[ExposureRecord],
    ) -> Vec<Result<ReserveResult, EngineError>> {
        let results: Vec<_> = ReserveMethod::all()
            .into_par_iter()
            .map(|method| reserves::calculate(method, records, &self.config))
            .collect();

        for result in results.iter().flatten() {
            self.persist(StoredCalculation::Reserve(result.clone()));
        }
        results
    }

    /// Analyze risk-factor trends and persist each metric's result
    pub fn analyze_trends(
        &self,
        records: &[ExposureRecord],
    ) -> Result<BTreeMap<String, TrendResult>, EngineError> {
        let trends = trend::analyze_trends(records, &self.config)?;

        let recorded_at = Utc::now();
        for (metric, result) in &trends {
            self.persist(StoredCalculation::Trend {
                metric: metric.clone(),
                result: result.clone(),
                recorded_at,
            });
        }
        Ok(trends)
    }

    fn persist(&self, calculation: StoredCalculation) {
        if let Some(store) = &self.store {
            let key = calculation.key().to_string();
            if let Err(err) = store.append(calculation) {
                log::error!("failed to persist {} result: {}", key, err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::InMemoryStore;
    use crate::records::{Region, Sex};

    fn records() -> Vec<ExposureRecord> {
        (0..40)
            .map(|i| ExposureRecord {
                age: 18 + i,
                sex: if i % 2 == 0 { Sex::Male } else { Sex::Female },
                bmi: 21.0 + (i % 12) as f64,
                children: i % 3,
                smoker: i % 4 == 0,
                region: Region::Southwest,
                charges: 300.0 + 75.0 * i as f64,
                claim: i % 3 == 0,
            })
            .collect()
    }

    #[test]
    fn test_calculate_persists_result() {
        let store = Arc::new(InMemoryStore::new());
        let engine = ReserveEngine::new(EngineConfig::default()).with_store(store.clone());

        let result = engine
            .calculate(ReserveMethod::ChainLadder, &records())
            .unwrap();

        let recent = store.recent(5);
        assert_eq!(recent.len(), 1);
        match &recent[0] {
            StoredCalculation::Reserve(stored) => {
                assert_eq!(stored.total_reserves, result.total_reserves);
            }
            other => panic!("unexpected entry: {:?}", other),
        }
    }

    #[test]
    fn test_calculate_all_runs_every_method() {
        let engine = ReserveEngine::new(EngineConfig::default());
        let results = engine.calculate_all(&records());

        assert_eq!(results.len(), 3);
        for (method, result) in ReserveMethod::all().iter().zip(&results) {
            assert_eq!(result.as_ref().unwrap().method, *method);
        }
    }

    #[test]
    fn test_calculate_all_matches_single_calls() {
        let engine = ReserveEngine::new(EngineConfig::default());
        let records = records();

        let batch = engine.calculate_all(&records);
        for result in &batch {
            let result = result.as_ref().unwrap();
            let single = engine.calculate(result.method, &records).unwrap();
            assert_eq!(
                result.total_reserves.to_bits(),
                single.total_reserves.to_bits()
            );
        }
    }

    #[test]
    fn test_trends_persist_per_metric() {
        let store = Arc::new(InMemoryStore::new());
        let engine = ReserveEngine::new(EngineConfig::default()).with_store(store.clone());

        let trends = engine.analyze_trends(&records()).unwrap();
        assert_eq!(trends.len(), 4);
        assert_eq!(store.recent(10).len(), 4);
    }

    #[test]
    fn test_no_store_still_returns_results() {
        let engine = ReserveEngine::new(EngineConfig::default());
        assert!(engine
            .calculate(ReserveMethod::FrequencySeverity, &records())
            .is_ok());
    }
}
