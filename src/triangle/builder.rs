//! Cumulative loss development triangle

use serde::{Deserialize, Serialize};

use super::cohorts::assign_cohorts;
use crate::config::EngineConfig;
use crate::records::ExposureRecord;

/// Cumulative loss development triangle
///
/// A dense matrix of C cohort rows by P development-period columns, with a
/// parallel vector of cohort labels. Each row is non-decreasing across
/// periods by construction (the completion fraction is monotone in p).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LossTriangle {
    labels: Vec<String>,
    cells: Vec<Vec<f64>>,
}

impl LossTriangle {
    /// Number of cohort rows
    pub fn cohort_count(&self) -> usize {
        self.cells.len()
    }

    /// Number of development-period columns
    pub fn period_count(&self) -> usize {
        self.cells.first().map_or(0, Vec::len)
    }

    /// Cohort labels in row order
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Full row for a cohort
    pub fn row(&self, cohort: usize) -> &[f64] {
        &self.cells[cohort]
    }

    /// Latest reported value for a cohort (last development column)
    pub fn latest_reported(&self, cohort: usize) -> f64 {
        self.cells[cohort].last().copied().unwrap_or(0.0)
    }

    /// Sum of one development column across all cohorts
    pub fn column_sum(&self, period: usize) -> f64 {
        self.cells.iter().map(|row| row[period]).sum()
    }

    /// Sum of the latest reported values across all cohorts
    pub fn total_reported(&self) -> f64 {
        (0..self.cohort_count())
            .map(|i| self.latest_reported(i))
            .sum()
    }
}

/// Fraction of ultimate loss assumed reported by development period `p`
///
/// f(p) = min(1.0, p/P * 0.8 + 0.2), so 20% of the loss is visible at
/// inception and the row completes by the final period.
fn completion_fraction(period: usize, total_periods: usize) -> f64 {
    (period as f64 / total_periods as f64 * 0.8 + 0.2).min(1.0)
}

/// Build the development triangle from exposure records
///
/// Records are partitioned into `config.cohort_count` equal-frequency age
/// bins; each cohort's base loss is the sum of its charges, developed
/// across `config.development_periods` columns via the completion
/// fraction. An empty record slice yields a zero-cohort triangle; an
/// empty bin within a non-empty dataset yields an all-zero row.
pub fn build_triangle(records: &[ExposureRecord], config: &EngineConfig) -> LossTriangle {
    if records.is_empty() || config.cohort_count == 0 {
        return LossTriangle {
            labels: Vec::new(),
            cells: Vec::new(),
        };
    }

    let periods = config.development_periods.max(1);
    let cohorts = assign_cohorts(records, config.cohort_count);

    let mut labels = Vec::with_capacity(cohorts.len());
    let mut cells = Vec::with_capacity(cohorts.len());

    for cohort in &cohorts {
        let base = cohort.total_charges(records);
        let row: Vec<f64> = (1..=periods)
            .map(|p| base * completion_fraction(p, periods))
            .collect();
        labels.push(cohort.label.clone());
        cells.push(row);
    }

    LossTriangle { labels, cells }
}
