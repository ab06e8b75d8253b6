use std::path::PathBuf;

use thiserror::Error;

use crate::input::InputError;
use crate::model::cohort::Cohort;
use crate::model::outliers::OutlierReport;
use crate::model::stats::SummaryStatistics;
use crate::model::thresholds::ZThreshold;

pub mod stage1_discover;
pub mod stage2_extract;
pub mod stage3_aggregate;
pub mod stage4_outliers;
pub mod stage5_report;

use stage1_discover::run_stage1;
use stage3_aggregate::{run_stage3, summarize};
use stage4_outliers::run_stage4;
use stage5_report::{ReportPaths, Stage5Input, write_reports};

/// Everything the analysis needs. Defaults are resolved by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub base_dir: PathBuf,
    pub out_dir: PathBuf,
    pub gene: String,
    pub z_threshold: ZThreshold,
}

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("no samples could be processed under {}; no outputs written", .0.display())]
    EmptyCohort(PathBuf),
    #[error("failed to write reports: {0}")]
    Report(#[from] std::io::Error),
}

#[derive(Debug, Clone)]
pub struct AnalysisOutput {
    pub cohort: Cohort,
    pub summary: SummaryStatistics,
    pub outliers: OutlierReport,
    pub paths: ReportPaths,
}

pub fn run_analysis(config: &RunConfig) -> Result<AnalysisOutput, AnalysisError> {
    let files = run_stage1(&config.base_dir)?;
    let cohort = run_stage3(&files, &config.gene);
    if cohort.is_empty() {
        return Err(AnalysisError::EmptyCohort(config.base_dir.clone()));
    }

    let summary = summarize(&cohort);
    let outliers = run_stage4(&cohort, config.z_threshold);
    let paths = write_reports(
        &Stage5Input {
            cohort: &cohort,
            summary: &summary,
            outliers: &outliers,
        },
        &config.out_dir,
    )?;

    Ok(AnalysisOutput {
        cohort,
        summary,
        outliers,
        paths,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/mod.rs"]
mod tests;
