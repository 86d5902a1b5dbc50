//! Exposure record data structures matching the claims dataset format

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Sex of the insured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    Female,
    Male,
}

impl Sex {
    /// Decode from the dataset's integer coding (0 = female, 1 = male)
    pub fn from_code(code: u8) -> Result<Self, EngineError> {
        match code {
            0 => Ok(Sex::Female),
            1 => Ok(Sex::Male),
            other => Err(EngineError::validation(
                "sex",
                format!("expected 0 or 1, got {}", other),
            )),
        }
    }
}

/// Geographic region of the insured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Region {
    Northeast,
    Northwest,
    Southeast,
    Southwest,
}

impl Region {
    /// Decode from the dataset's integer coding (0-3)
    pub fn from_code(code: u8) -> Result<Self, EngineError> {
        match code {
            0 => Ok(Region::Northeast),
            1 => Ok(Region::Northwest),
            2 => Ok(Region::Southeast),
            3 => Ok(Region::Southwest),
            other => Err(EngineError::validation(
                "region",
                format!("expected 0-3, got {}", other),
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Northeast => "northeast",
            Region::Northwest => "northwest",
            Region::Southeast => "southeast",
            Region::Southwest => "southwest",
        }
    }
}

/// A single validated exposure record from the claims dataset
///
/// Records arrive already cleaned from the ingestion collaborator and are
/// never mutated by the engine. Age acts as the proxy variable for origin
/// cohort assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExposureRecord {
    /// Age of the insured in years
    pub age: u32,

    /// Sex of the insured
    pub sex: Sex,

    /// Body mass index (must be positive)
    pub bmi: f64,

    /// Number of dependent children
    pub children: u32,

    /// Whether the insured is a smoker
    pub smoker: bool,

    /// Geographic region
    pub region: Region,

    /// Billed charges in dollars (non-negative)
    pub charges: f64,

    /// Whether a claim was filed against this exposure
    pub claim: bool,
}

impl ExposureRecord {
    /// Check the field range constraints
    pub fn validate(&self) -> Result<(), EngineError> {
        if !self.bmi.is_finite() || self.bmi <= 0.0 {
            return Err(EngineError::validation(
                "bmi",
                format!("must be positive and finite, got {}", self.bmi),
            ));
        }
        if !self.charges.is_finite() || self.charges < 0.0 {
            return Err(EngineError::validation(
                "charges",
                format!("must be non-negative and finite, got {}", self.charges),
            ));
        }
        Ok(())
    }

    /// Claim flag as a 0.0/1.0 value for aggregate rates
    pub fn claim_indicator(&self) -> f64 {
        if self.claim {
            1.0
        } else {
            0.0
        }
    }

    /// Smoker flag as a 0.0/1.0 value for aggregate rates
    pub fn smoker_indicator(&self) -> f64 {
        if self.smoker {
            1.0
        } else {
            0.0
        }
    }
}
