//! Reserving System - Actuarial reserve estimation for insurance claims
//!
//! This library provides:
//! - Loss development triangle construction from exposure records
//! - Age-to-age development factor estimation and ultimate-loss projection
//! - Three independent reserve estimators (Chain Ladder, Bornhuetter-Ferguson,
//!   Frequency-Severity) with confidence intervals
//! - OLS trend analysis over binned risk factors with significance testing
//! - An append-only persistence port for calculation history

pub mod config;
pub mod engine;
pub mod error;
pub mod persistence;
pub mod records;
pub mod reserves;
pub mod trend;
pub mod triangle;

// Re-export commonly used types
pub use config::EngineConfig;
pub use engine::ReserveEngine;
pub use error::EngineError;
pub use persistence::{InMemoryStore, PersistencePort, StoredCalculation};
pub use records::ExposureRecord;
pub use reserves::{calculate, ReserveMethod, ReserveResult};
pub use trend::{analyze_trends, TrendDirection, TrendResult};
pub use triangle::{build_triangle, estimate_factors, LossTriangle};
