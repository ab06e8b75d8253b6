use crate::model::cohort::Cohort;
use crate::model::outliers::{OutlierClass, OutlierReport, SampleZScore, ZScoreUnavailable};
use crate::model::stats::{mean, sample_std_dev};
use crate::model::thresholds::ZThreshold;

/// Scores detected samples by TPM z-score against the cohort's own mean and
/// sample standard deviation, recomputed on every call.
pub fn run_stage4(cohort: &Cohort, threshold: ZThreshold) -> OutlierReport {
    let tpm = cohort.found_tpm();
    let absent = cohort
        .absent()
        .map(|r| r.sample().to_string())
        .collect::<Vec<_>>();
    let mean = mean(&tpm);
    let std_dev = sample_std_dev(&tpm);

    let mut report = OutlierReport {
        gene: cohort.gene().to_string(),
        threshold,
        mean,
        std_dev,
        scores: Vec::new(),
        absent,
        unavailable: None,
    };

    let (m, sd) = match (mean, std_dev) {
        _ if tpm.len() < 2 => {
            report.unavailable = Some(ZScoreUnavailable::TooFewSamples { found: tpm.len() });
            return report;
        }
        (Some(m), Some(sd)) => (m, sd),
        _ => {
            crate::warn!("{} TPM statistics overflowed; z-scores skipped", cohort.gene());
            report.unavailable = Some(ZScoreUnavailable::NonFinite);
            return report;
        }
    };
    // Identical inputs can still leave a rounding residual in sd.
    if sd == 0.0 || tpm.iter().all(|v| *v == tpm[0]) {
        report.unavailable = Some(ZScoreUnavailable::ZeroVariance);
        return report;
    }

    report.scores = cohort
        .found()
        .map(|r| {
            let z = (r.tpm() - m) / sd;
            SampleZScore {
                sample: r.sample().to_string(),
                tpm_unstranded: r.tpm(),
                z_score: z,
                class: OutlierClass::classify(z, threshold),
            }
        })
        .collect();

    let n_high = report.high().count();
    let n_low = report.low().count();
    crate::info!(
        "outliers at |z| > {}: {} high, {} low",
        threshold,
        n_high,
        n_low
    );
    report
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_outliers.rs"]
mod tests;
