use crate::input::SampleFile;
use crate::model::cohort::Cohort;
use crate::model::record::ExpressionRecord;
use crate::model::stats::{DescriptiveStats, SummaryStatistics};
use crate::pipeline::stage2_extract::run_stage2;

/// Parses and extracts every file in order. Files that fail to parse are logged
/// and left out; they never abort the run.
pub fn run_stage3(files: &[SampleFile], gene: &str) -> Cohort {
    let mut records = Vec::with_capacity(files.len());
    let mut skipped = 0usize;
    for file in files {
        match run_stage2(file, gene) {
            Ok(record) => records.push(record),
            Err(err) => {
                skipped += 1;
                crate::error!("skipping sample {}: {}", file.sample, err);
            }
        }
    }

    let cohort = Cohort::new(gene, records);
    crate::info!(
        "processed {} samples ({} with {}, {} skipped)",
        cohort.len(),
        cohort.found_count(),
        gene,
        skipped
    );
    cohort
}

pub fn summarize(cohort: &Cohort) -> SummaryStatistics {
    let found: Vec<&ExpressionRecord> = cohort.found().collect();
    let column = |pick: fn(&ExpressionRecord) -> f64| -> Vec<f64> {
        found.iter().map(|r| pick(r)).collect()
    };

    SummaryStatistics {
        gene: cohort.gene().to_string(),
        total_samples: cohort.len(),
        found_samples: found.len(),
        absent_samples: cohort.len() - found.len(),
        tpm: DescriptiveStats::from_values(&column(|r| r.metrics().tpm_unstranded)),
        fpkm: DescriptiveStats::from_values(&column(|r| r.metrics().fpkm_unstranded)),
        fpkm_uq: DescriptiveStats::from_values(&column(|r| r.metrics().fpkm_uq_unstranded)),
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_aggregate.rs"]
mod tests;
