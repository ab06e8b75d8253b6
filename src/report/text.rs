use crate::model::outliers::{OutlierReport, SampleZScore, ZScoreUnavailable};
use crate::report::{format_f64_6, format_opt_f64_6};

pub fn render_outlier_text(report: &OutlierReport) -> String {
    let mut out = String::new();
    let gene = &report.gene;
    let t = report.threshold;

    let title = format!("{gene} Expression Outlier Report");
    out.push_str(&format!("{}\n{}\n\n", title, "=".repeat(title.len())));
    out.push_str(&format!("Z-score threshold: {t}\n"));
    out.push_str(&format!("Mean TPM: {}\n", format_opt_f64_6(report.mean)));
    out.push_str(&format!("Std TPM: {}\n", format_opt_f64_6(report.std_dev)));
    match report.unavailable {
        Some(ZScoreUnavailable::TooFewSamples { found }) => out.push_str(&format!(
            "Z-scores not computable: {found} sample(s) with {gene}, at least 2 required\n"
        )),
        Some(ZScoreUnavailable::ZeroVariance) => out.push_str(&format!(
            "Z-scores not computable: {gene} TPM is identical across samples\n"
        )),
        Some(ZScoreUnavailable::NonFinite) => out.push_str(&format!(
            "Z-scores not computable: {gene} TPM statistics are not finite\n"
        )),
        None => {}
    }
    out.push('\n');

    let high: Vec<&SampleZScore> = report.high().collect();
    out.push_str(&format!("High outliers (z > {t}): {}\n", high.len()));
    push_scored(&mut out, &high);
    out.push('\n');

    let low: Vec<&SampleZScore> = report.low().collect();
    out.push_str(&format!("Low outliers (z < -{t}): {}\n", low.len()));
    push_scored(&mut out, &low);
    out.push('\n');

    out.push_str(&format!(
        "Samples without {gene}: {}\n",
        report.absent.len()
    ));
    for sample in &report.absent {
        out.push_str(&format!("  {sample}\n"));
    }

    out
}

fn push_scored(out: &mut String, entries: &[&SampleZScore]) {
    for e in entries {
        out.push_str(&format!(
            "  {}\tTPM={}\tz={}\n",
            e.sample,
            format_f64_6(e.tpm_unstranded),
            format_f64_6(e.z_score)
        ));
    }
}
