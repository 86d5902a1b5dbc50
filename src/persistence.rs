//! Persistence port for calculation results
//!
//! The engine hands every completed result to a port with a single
//! append-only operation; the port never sees partial results and the
//! engine never reads back what it wrote. Storage technology is the
//! collaborator's concern — the in-memory store here backs tests, the CLI,
//! and the history summary.

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::reserves::ReserveResult;
use crate::trend::TrendResult;

/// A persisted calculation: a reserve result or a single-metric trend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum StoredCalculation {
    Reserve(ReserveResult),
    Trend {
        metric: String,
        result: TrendResult,
        recorded_at: DateTime<Utc>,
    },
}

impl StoredCalculation {
    /// Method or metric identifier for grouping
    pub fn key(&self) -> &str {
        match self {
            StoredCalculation::Reserve(r) => r.method.as_str(),
            StoredCalculation::Trend { metric, .. } => metric,
        }
    }

    /// Timestamp of the underlying calculation
    pub fn recorded_at(&self) -> DateTime<Utc> {
        match self {
            StoredCalculation::Reserve(r) => r.calculation_date,
            StoredCalculation::Trend { recorded_at, .. } => *recorded_at,
        }
    }
}

/// Append-only sink for completed calculations
///
/// Writes are independent operations; implementations serialize their own
/// writes and the engine never requires mutual exclusion beyond that.
pub trait PersistencePort: Send + Sync {
    fn append(&self, calculation: StoredCalculation) -> Result<(), EngineError>;
}

/// Summary of recent calculations, grouped by method
#[derive(Debug, Clone, Serialize)]
pub struct CalculationSummary {
    pub total_calculations: usize,
    pub latest_calculation: Option<DateTime<Utc>>,
    pub methods_used: Vec<String>,
    pub total_reserves_by_method: Vec<(String, Vec<f64>)>,
}

/// In-memory persistence backing tests and the CLI
#[derive(Debug, Default)]
pub struct InMemoryStore {
    entries: Mutex<Vec<StoredCalculation>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent `limit` calculations, newest first
    pub fn recent(&self, limit: usize) -> Vec<StoredCalculation> {
        let entries = self.entries.lock().expect("store mutex poisoned");
        entries.iter().rev().take(limit).cloned().collect()
    }

    /// Summary of the most recent reserve calculations, grouped by method
    pub fn summary(&self, limit: usize) -> CalculationSummary {
        let recent: Vec<_> = self
            .recent(limit)
            .into_iter()
            .filter_map(|c| match c {
                StoredCalculation::Reserve(r) => Some(r),
                StoredCalculation::Trend { .. } => None,
            })
            .collect();

        let mut methods_used: Vec<String> = Vec::new();
        let mut by_method: Vec<(String, Vec<f64>)> = Vec::new();
        for result in &recent {
            let name = result.method.as_str().to_string();
            if !methods_used.contains(&name) {
                methods_used.push(name.clone());
            }
            match by_method.iter_mut().find(|(m, _)| *m == name) {
                Some((_, totals)) => totals.push(result.total_reserves),
                None => by_method.push((name, vec![result.total_reserves])),
            }
        }

        CalculationSummary {
            total_calculations: recent.len(),
            latest_calculation: recent.first().map(|r| r.calculation_date),
            methods_used,
            total_reserves_by_method: by_method,
        }
    }
}

impl PersistencePort for InMemoryStore {
    fn append(&self, calculation: StoredCalculation) -> Result<(), EngineError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| EngineError::Persistence("store mutex poisoned".to_string()))?;
        entries.push(calculation);
        Ok(())
    }
}
