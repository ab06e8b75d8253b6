use crate::input::SampleFile;
use crate::input::quant::{ParseError, QuantRow, parse_quant_file};
use crate::model::record::{ExpressionMetrics, ExpressionRecord};

/// Picks the first row whose `gene_name` equals `gene` exactly.
///
/// Later rows with the same symbol are ignored. Never fails: a missing gene
/// yields an absent record and bad cells read as zero.
pub fn extract_gene(rows: &[QuantRow], gene: &str, sample: &str) -> ExpressionRecord {
    match rows.iter().find(|row| row.gene_name == gene) {
        Some(row) => ExpressionRecord::detected(
            sample,
            row.gene_id.as_str(),
            ExpressionMetrics::from_raw(&row.values),
        ),
        None => {
            crate::warn!("{} not found in sample {}", gene, sample);
            ExpressionRecord::absent(sample)
        }
    }
}

pub fn run_stage2(file: &SampleFile, gene: &str) -> Result<ExpressionRecord, ParseError> {
    let table = parse_quant_file(&file.path)?;
    ::tracing::debug!(
        path = %table.path.display(),
        rows = table.rows.len(),
        summary_rows = table.summary_rows_dropped,
        "parsed quantification table"
    );
    Ok(extract_gene(&table.rows, gene, &file.sample))
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_extract.rs"]
mod tests;
