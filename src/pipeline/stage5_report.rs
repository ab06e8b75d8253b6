use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::model::cohort::Cohort;
use crate::model::outliers::OutlierReport;
use crate::model::stats::SummaryStatistics;
use crate::report::json::render_summary_json;
use crate::report::text::render_outlier_text;
use crate::report::tsv::{write_cohort_tsv, write_summary_tsv};

#[derive(Debug, Clone)]
pub struct Stage5Input<'a> {
    pub cohort: &'a Cohort,
    pub summary: &'a SummaryStatistics,
    pub outliers: &'a OutlierReport,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    pub expression: PathBuf,
    pub statistics: PathBuf,
    pub outliers: PathBuf,
    pub summary_json: PathBuf,
}

impl ReportPaths {
    pub fn for_gene(out_dir: &Path, gene: &str) -> Self {
        Self {
            expression: out_dir.join(format!("{gene}_expression.tsv")),
            statistics: out_dir.join(format!("{gene}_summary_statistics.tsv")),
            outliers: out_dir.join(format!("{gene}_outliers.txt")),
            summary_json: out_dir.join(format!("{gene}_summary.json")),
        }
    }
}

pub fn write_reports(input: &Stage5Input<'_>, out_dir: &Path) -> std::io::Result<ReportPaths> {
    fs::create_dir_all(out_dir)?;
    let paths = ReportPaths::for_gene(out_dir, input.cohort.gene());

    write_cohort_tsv(input.cohort, &paths.expression)?;
    write_summary_tsv(input.summary, &paths.statistics)?;
    write_text(&paths.outliers, &render_outlier_text(input.outliers))?;

    let json = render_summary_json(input.summary, input.outliers)?;
    write_text(&paths.summary_json, &json)?;

    for path in [
        &paths.expression,
        &paths.statistics,
        &paths.outliers,
        &paths.summary_json,
    ] {
        crate::info!("wrote {}", path.display());
    }
    Ok(paths)
}

fn write_text(path: &Path, text: &str) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    w.write_all(text.as_bytes())?;
    if !text.ends_with('\n') {
        w.write_all(b"\n")?;
    }
    w.flush()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage5_report.rs"]
mod tests;
