use serde::Serialize;

use crate::input::quant::RawMetrics;

/// The six expression metrics copied from a quantification row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ExpressionMetrics {
    pub tpm_unstranded: f64,
    pub fpkm_unstranded: f64,
    pub fpkm_uq_unstranded: f64,
    pub unstranded_count: f64,
    pub stranded_first: f64,
    pub stranded_second: f64,
}

impl ExpressionMetrics {
    pub const ZERO: Self = Self {
        tpm_unstranded: 0.0,
        fpkm_unstranded: 0.0,
        fpkm_uq_unstranded: 0.0,
        unstranded_count: 0.0,
        stranded_first: 0.0,
        stranded_second: 0.0,
    };

    /// Missing and non-numeric cells become `0.0`. Absent and measured-zero are
    /// not distinguished downstream.
    pub fn from_raw(raw: &RawMetrics) -> Self {
        Self {
            tpm_unstranded: raw.tpm_unstranded.unwrap_or(0.0),
            fpkm_unstranded: raw.fpkm_unstranded.unwrap_or(0.0),
            fpkm_uq_unstranded: raw.fpkm_uq_unstranded.unwrap_or(0.0),
            unstranded_count: raw.unstranded.unwrap_or(0.0),
            stranded_first: raw.stranded_first.unwrap_or(0.0),
            stranded_second: raw.stranded_second.unwrap_or(0.0),
        }
    }
}

/// One sample's result for the target gene.
///
/// A record is either detected, with a non-empty `gene_id`, or absent, with no
/// `gene_id` and all metrics zero. The constructors are the only way to build one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpressionRecord {
    sample: String,
    found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    gene_id: Option<String>,
    #[serde(flatten)]
    metrics: ExpressionMetrics,
}

impl ExpressionRecord {
    /// Falls back to [`ExpressionRecord::absent`] when `gene_id` is blank.
    pub fn detected(
        sample: impl Into<String>,
        gene_id: impl Into<String>,
        metrics: ExpressionMetrics,
    ) -> Self {
        let gene_id = gene_id.into();
        if gene_id.trim().is_empty() {
            return Self::absent(sample);
        }
        Self {
            sample: sample.into(),
            found: true,
            gene_id: Some(gene_id),
            metrics,
        }
    }

    pub fn absent(sample: impl Into<String>) -> Self {
        Self {
            sample: sample.into(),
            found: false,
            gene_id: None,
            metrics: ExpressionMetrics::ZERO,
        }
    }

    pub fn sample(&self) -> &str {
        &self.sample
    }

    pub fn is_found(&self) -> bool {
        self.found
    }

    pub fn gene_id(&self) -> Option<&str> {
        self.gene_id.as_deref()
    }

    pub fn metrics(&self) -> &ExpressionMetrics {
        &self.metrics
    }

    pub fn tpm(&self) -> f64 {
        self.metrics.tpm_unstranded
    }
}
