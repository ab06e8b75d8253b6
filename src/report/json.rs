use serde::Serialize;

use crate::model::outliers::OutlierReport;
use crate::model::stats::SummaryStatistics;

#[derive(Serialize)]
struct SummaryDocument<'a> {
    tool: &'static str,
    tool_version: &'static str,
    statistics: &'a SummaryStatistics,
    outliers: &'a OutlierReport,
}

/// Statistics and outlier calls as one JSON document. Undefined values are `null`.
pub fn render_summary_json(
    summary: &SummaryStatistics,
    outliers: &OutlierReport,
) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&SummaryDocument {
        tool: "kira-geneqc",
        tool_version: env!("CARGO_PKG_VERSION"),
        statistics: summary,
        outliers,
    })
}
