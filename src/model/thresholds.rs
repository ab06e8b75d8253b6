use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

pub const DEFAULT_Z_THRESHOLD: f64 = 2.0;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ThresholdError {
    #[error("invalid z-score threshold: {0}")]
    NotANumber(String),
    #[error("z-score threshold must be a positive number, got {0}")]
    NotPositive(f64),
}

/// Absolute z-score cut-off for outlier calls. Always finite and strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct ZThreshold(f64);

impl ZThreshold {
    pub fn new(value: f64) -> Result<Self, ThresholdError> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(ThresholdError::NotPositive(value))
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for ZThreshold {
    fn default() -> Self {
        Self(DEFAULT_Z_THRESHOLD)
    }
}

impl FromStr for ZThreshold {
    type Err = ThresholdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<f64>()
            .map_err(|_| ThresholdError::NotANumber(s.to_string()))?;
        Self::new(value)
    }
}

impl fmt::Display for ZThreshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}
