//! Origin cohort assignment
//!
//! The dataset carries no real accident dates, so age acts as the proxy
//! variable: records are sorted by ascending age and split into
//! equal-frequency bins, each labeled with a synthetic origin year.

use crate::records::ExposureRecord;

/// First synthetic origin year; the default five cohorts read 2019..2023
pub const ORIGIN_YEAR_BASE: u32 = 2019;

/// An origin cohort: a synthetic period label plus the indices of its
/// member records in the input slice
#[derive(Debug, Clone)]
pub struct Cohort {
    /// Synthetic origin period label (e.g. "2019")
    pub label: String,

    /// Indices into the record slice this cohort was built from
    pub member_indices: Vec<usize>,
}

impl Cohort {
    /// Sum of charges across member records
    pub fn total_charges(&self, records: &[ExposureRecord]) -> f64 {
        self.member_indices
            .iter()
            .map(|&i| records[i].charges)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.member_indices.is_empty()
    }
}

/// Partition records into `count` equal-frequency cohorts by ascending age
///
/// Returns one cohort per bin with sequential origin-year labels. When the
/// record count is not divisible by `count` the earlier bins take the
/// remainder; when there are fewer records than bins the trailing bins are
/// empty (they become all-zero triangle rows downstream).
pub fn assign_cohorts(records: &[ExposureRecord], count: usize) -> Vec<Cohort> {
    let mut order: Vec<usize> = (0..records.len()).collect();
    order.sort_by_key(|&i| records[i].age);

    let n = records.len();
    let mut cohorts = Vec::with_capacity(count);

    for bin in 0..count {
        let start = bin * n / count;
        let end = (bin + 1) * n / count;
        cohorts.push(Cohort {
            label: (ORIGIN_YEAR_BASE + bin as u32).to_string(),
            member_indices: order[start..end].to_vec(),
        });
    }

    cohorts
}
