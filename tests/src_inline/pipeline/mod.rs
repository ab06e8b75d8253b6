use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("kira_geneqc_pipeline_test_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_sample(base: &Path, sample: &str, file: &str, tpm: Option<f64>) {
    let dir = base.join(sample);
    fs::create_dir_all(&dir).unwrap();
    let mut text = String::from(
        "# gene-model: GENCODE v36\n\
         gene_id\tgene_name\tgene_type\tunstranded\tstranded_first\tstranded_second\ttpm_unstranded\tfpkm_unstranded\tfpkm_uq_unstranded\n\
         N_unmapped\t\t\t2049\t2049\t2049\t\t\t\n\
         N_noFeature\t\t\t9000\t9000\t9000\t\t\t\n",
    );
    text.push_str("ENSG00000000003.15\tTSPAN6\tprotein_coding\t3000\t1500\t1510\t40.5\t12.0\t13.1\n");
    if let Some(tpm) = tpm {
        text.push_str(&format!(
            "ENSG00000133019.12\tCHRM3\tprotein_coding\t120\t60\t61\t{tpm}\t2.1\t3.3\n"
        ));
    }
    fs::write(dir.join(file), text).unwrap();
}

fn config(base: &Path, out: &Path, threshold: f64) -> RunConfig {
    RunConfig {
        base_dir: base.to_path_buf(),
        out_dir: out.to_path_buf(),
        gene: "CHRM3".to_string(),
        z_threshold: ZThreshold::new(threshold).unwrap(),
    }
}

#[test]
fn test_run_analysis_end_to_end() {
    let root = make_temp_dir();
    let base = root.join("data");
    let out = root.join("out");
    write_sample(&base, "TCGA-AA", "a.rna_seq.augmented_star_gene_counts.tsv", Some(1.0));
    write_sample(&base, "TCGA-BB", "b.rna_seq.augmented_star_gene_counts.tsv", Some(100.0));
    write_sample(&base, "TCGA-CC", "c.rna_seq.augmented_star_gene_counts.tsv", Some(2.0));
    write_sample(&base, "TCGA-DD", "d.rna_seq.augmented_star_gene_counts.tsv", None);
    fs::create_dir_all(base.join("TCGA-EE")).unwrap();
    fs::write(base.join("TCGA-EE").join("bad.tsv"), "not\ta\tquant\ttable\n").unwrap();

    let output = run_analysis(&config(&base, &out, 1.0)).unwrap();
    assert_eq!(output.cohort.len(), 4);
    assert_eq!(output.summary.total_samples, 4);
    assert_eq!(output.summary.found_samples, 3);
    assert_eq!(output.summary.absent_samples, 1);

    let high: Vec<&str> = output.outliers.high().map(|s| s.sample.as_str()).collect();
    assert_eq!(high, vec!["TCGA-BB"]);
    assert_eq!(output.outliers.absent, vec!["TCGA-DD".to_string()]);

    for path in [
        &output.paths.expression,
        &output.paths.statistics,
        &output.paths.outliers,
        &output.paths.summary_json,
    ] {
        assert!(path.is_file(), "missing {}", path.display());
    }
}

#[test]
fn test_run_analysis_missing_base_dir() {
    let root = make_temp_dir();
    let out = root.join("out");
    let err = run_analysis(&config(&root.join("nope"), &out, 2.0)).unwrap_err();
    assert!(matches!(
        err,
        AnalysisError::Input(InputError::DirectoryNotFound(_))
    ));
    assert!(!out.exists());
}

#[test]
fn test_run_analysis_empty_cohort_writes_nothing() {
    let root = make_temp_dir();
    let base = root.join("data");
    let out = root.join("out");
    fs::create_dir_all(base.join("TCGA-AA")).unwrap();
    fs::write(base.join("TCGA-AA").join("broken.tsv"), "gene_id\n").unwrap();

    let err = run_analysis(&config(&base, &out, 2.0)).unwrap_err();
    assert!(matches!(err, AnalysisError::EmptyCohort(_)));
    assert!(!out.exists());
}

#[test]
fn test_run_analysis_all_absent_still_reports() {
    let root = make_temp_dir();
    let base = root.join("data");
    let out = root.join("out");
    write_sample(&base, "S1", "x.tsv", None);
    write_sample(&base, "S2", "y.tsv", None);

    let output = run_analysis(&config(&base, &out, 2.0)).unwrap();
    assert_eq!(output.summary.found_samples, 0);
    assert_eq!(output.summary.tpm.mean, None);
    assert_eq!(output.outliers.high().count(), 0);
    assert_eq!(output.outliers.low().count(), 0);
    assert_eq!(output.outliers.absent.len(), 2);
    assert!(output.paths.outliers.is_file());
}
