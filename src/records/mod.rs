//! Exposure record types and dataset ingestion

mod data;
mod loader;

pub use data::{ExposureRecord, Region, Sex};
pub use loader::{load_records, load_records_from_reader};
