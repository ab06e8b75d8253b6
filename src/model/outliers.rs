use serde::Serialize;

use crate::model::thresholds::ZThreshold;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutlierClass {
    High,
    Low,
    Normal,
}

impl OutlierClass {
    pub fn classify(z: f64, threshold: ZThreshold) -> Self {
        let t = threshold.value();
        if z > t {
            OutlierClass::High
        } else if z < -t {
            OutlierClass::Low
        } else {
            OutlierClass::Normal
        }
    }
}

/// Why z-scores could not be computed for a cohort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum ZScoreUnavailable {
    TooFewSamples { found: usize },
    ZeroVariance,
    /// Mean or standard deviation overflowed.
    NonFinite,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleZScore {
    pub sample: String,
    pub tpm_unstranded: f64,
    pub z_score: f64,
    pub class: OutlierClass,
}

/// Outlier calls derived from a cohort. The cohort itself is left untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutlierReport {
    pub gene: String,
    pub threshold: ZThreshold,
    pub mean: Option<f64>,
    pub std_dev: Option<f64>,
    /// One entry per detected sample, in cohort order. Empty when unavailable.
    pub scores: Vec<SampleZScore>,
    /// Samples where the gene was not found. Never scored.
    pub absent: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unavailable: Option<ZScoreUnavailable>,
}

impl OutlierReport {
    pub fn high(&self) -> impl Iterator<Item = &SampleZScore> {
        self.by_class(OutlierClass::High)
    }

    pub fn low(&self) -> impl Iterator<Item = &SampleZScore> {
        self.by_class(OutlierClass::Low)
    }

    #[cfg(test)]
    pub fn z_score(&self, sample: &str) -> Option<f64> {
        self.scores
            .iter()
            .find(|s| s.sample == sample)
            .map(|s| s.z_score)
    }

    fn by_class(&self, class: OutlierClass) -> impl Iterator<Item = &SampleZScore> {
        self.scores.iter().filter(move |s| s.class == class)
    }
}
