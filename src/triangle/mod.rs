//! Loss development triangle construction and factor estimation
//!
//! The dataset has no real accident or development dates, so the triangle
//! is synthesized: origin cohorts come from equal-frequency age binning and
//! each cohort's cumulative losses follow a fixed completion-fraction
//! pattern across development periods. The resulting triangle and factor
//! series feed the Chain Ladder and Bornhuetter-Ferguson estimators.

mod builder;
mod cohorts;
mod factors;

pub use builder::{build_triangle, LossTriangle};
pub use cohorts::{assign_cohorts, Cohort, ORIGIN_YEAR_BASE};
pub use factors::{estimate_factors, DevelopmentFactorSeries};
