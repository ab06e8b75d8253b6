use serde::Serialize;

use crate::model::record::ExpressionRecord;

/// Per-sample records for one gene, in discovery order. Read-only once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cohort {
    gene: String,
    records: Vec<ExpressionRecord>,
}

impl Cohort {
    pub fn new(gene: impl Into<String>, records: Vec<ExpressionRecord>) -> Self {
        Self {
            gene: gene.into(),
            records,
        }
    }

    pub fn gene(&self) -> &str {
        &self.gene
    }

    pub fn records(&self) -> &[ExpressionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn found(&self) -> impl Iterator<Item = &ExpressionRecord> {
        self.records.iter().filter(|r| r.is_found())
    }

    pub fn absent(&self) -> impl Iterator<Item = &ExpressionRecord> {
        self.records.iter().filter(|r| !r.is_found())
    }

    pub fn found_count(&self) -> usize {
        self.found().count()
    }

    /// TPM of detected samples, in cohort order.
    pub fn found_tpm(&self) -> Vec<f64> {
        self.found().map(ExpressionRecord::tpm).collect()
    }
}
