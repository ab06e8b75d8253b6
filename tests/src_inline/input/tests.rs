use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use flate2::Compression;
use flate2::write::GzEncoder;

use super::*;

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("kira_geneqc_input_test_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn touch(path: &Path) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, "gene_id\n").unwrap();
}

#[test]
fn test_discovery_uses_directory_name_as_sample() {
    let base = make_temp_dir();
    touch(&base.join("TCGA-B").join("b1.rna_seq.augmented_star_gene_counts.tsv"));
    touch(&base.join("TCGA-A").join("a2.tsv"));
    touch(&base.join("TCGA-A").join("a1.tsv.gz"));
    touch(&base.join("TCGA-A").join("notes.txt"));
    touch(&base.join("top_level.tsv"));
    touch(&base.join("TCGA-C").join("nested").join("deep.tsv"));

    let files = discover_samples(&base).unwrap();
    let got: Vec<(String, String)> = files
        .iter()
        .map(|f| {
            (
                f.sample.clone(),
                f.path.file_name().unwrap().to_string_lossy().into_owned(),
            )
        })
        .collect();
    assert_eq!(
        got,
        vec![
            ("TCGA-A".to_string(), "a1.tsv.gz".to_string()),
            ("TCGA-A".to_string(), "a2.tsv".to_string()),
            (
                "TCGA-B".to_string(),
                "b1.rna_seq.augmented_star_gene_counts.tsv".to_string()
            ),
        ]
    );
}

#[test]
fn test_unreadable_entry_is_skipped() {
    let dir = make_temp_dir().join("TCGA-A");
    touch(&dir.join("b.tsv"));
    touch(&dir.join("a.tsv"));

    let entries = vec![
        Ok(dir.join("b.tsv")),
        Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "entry vanished",
        )),
        Ok(dir.join("a.tsv")),
    ];
    let files = collect_quant_files(&dir, entries);
    assert_eq!(files, vec![dir.join("a.tsv"), dir.join("b.tsv")]);
}

#[test]
fn test_discovery_empty_is_ok() {
    let base = make_temp_dir();
    fs::create_dir_all(base.join("empty_sample")).unwrap();
    assert!(discover_samples(&base).unwrap().is_empty());
}

#[test]
fn test_discovery_missing_base_dir() {
    let base = make_temp_dir().join("does_not_exist");
    let err = discover_samples(&base).unwrap_err();
    assert!(matches!(err, InputError::DirectoryNotFound(ref p) if p == &base));
}

#[test]
fn test_is_quant_file() {
    assert!(is_quant_file(Path::new("x/a.tsv")));
    assert!(is_quant_file(Path::new("x/a.tsv.gz")));
    assert!(!is_quant_file(Path::new("x/a.csv")));
    assert!(!is_quant_file(Path::new("x/a.tsv.bak")));
}

#[test]
fn test_open_maybe_gz_plain_and_gzip() {
    let dir = make_temp_dir();
    let plain = dir.join("plain.tsv");
    fs::write(&plain, "hello\n").unwrap();

    let gz = dir.join("packed.tsv.gz");
    let mut enc = GzEncoder::new(File::create(&gz).unwrap(), Compression::default());
    enc.write_all(b"hello\n").unwrap();
    enc.finish().unwrap();

    for path in [plain, gz] {
        let mut s = String::new();
        open_maybe_gz(&path).unwrap().read_to_string(&mut s).unwrap();
        assert_eq!(s, "hello\n");
    }
}
