//! Descriptive statistics over the detected subset of a cohort.
//!
//! Values that cannot be computed (no samples, fewer than two for the
//! standard deviation, or a non-finite result) are `None` rather than `NaN`
//! or a panic.

use serde::Serialize;

/// Running mean, so values near `f64::MAX` do not overflow a plain sum.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut m = 0.0f64;
    for (i, v) in values.iter().enumerate() {
        m += (v - m) / (i + 1) as f64;
    }
    Some(m).filter(|m| m.is_finite())
}

/// Midpoint average for even-length input.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let n = sorted.len();
    if n % 2 == 1 {
        Some(sorted[n / 2])
    } else {
        let (a, b) = (sorted[n / 2 - 1], sorted[n / 2]);
        Some(a + (b - a) / 2.0).filter(|m| m.is_finite())
    }
}

/// Sample standard deviation (n - 1 denominator). `None` if the result is not finite.
pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let ss: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    Some((ss / (values.len() - 1) as f64).sqrt()).filter(|sd| sd.is_finite())
}

pub fn min(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::min)
}

pub fn max(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::max)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DescriptiveStats {
    pub mean: Option<f64>,
    pub median: Option<f64>,
    pub std_dev: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl DescriptiveStats {
    pub fn from_values(values: &[f64]) -> Self {
        Self {
            mean: mean(values),
            median: median(values),
            std_dev: sample_std_dev(values),
            min: min(values),
            max: max(values),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StatValue {
    Count(usize),
    Value(Option<f64>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStatistics {
    pub gene: String,
    pub total_samples: usize,
    pub found_samples: usize,
    pub absent_samples: usize,
    pub tpm: DescriptiveStats,
    pub fpkm: DescriptiveStats,
    pub fpkm_uq: DescriptiveStats,
}

impl SummaryStatistics {
    /// Named values in report order, e.g. `Samples with CHRM3` or `Median TPM`.
    pub fn entries(&self) -> Vec<(String, StatValue)> {
        let mut out = vec![
            ("Total samples".to_string(), StatValue::Count(self.total_samples)),
            (
                format!("Samples with {}", self.gene),
                StatValue::Count(self.found_samples),
            ),
            (
                format!("Samples without {}", self.gene),
                StatValue::Count(self.absent_samples),
            ),
        ];
        for (label, stats) in [
            ("TPM", &self.tpm),
            ("FPKM", &self.fpkm),
            ("FPKM-UQ", &self.fpkm_uq),
        ] {
            out.push((format!("Mean {label}"), StatValue::Value(stats.mean)));
            out.push((format!("Median {label}"), StatValue::Value(stats.median)));
            out.push((format!("Std {label}"), StatValue::Value(stats.std_dev)));
            out.push((format!("Min {label}"), StatValue::Value(stats.min)));
            out.push((format!("Max {label}"), StatValue::Value(stats.max)));
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/stats.rs"]
mod tests;
