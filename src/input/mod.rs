use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use flate2::read::MultiGzDecoder;
use thiserror::Error;

pub mod quant;

/// File name suffixes recognised as gene quantification tables.
pub const QUANT_SUFFIXES: &[&str] = &[".tsv", ".tsv.gz"];

#[derive(Debug, Error)]
pub enum InputError {
    #[error("base directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// One quantification file and the sample it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleFile {
    pub path: PathBuf,
    /// Name of the directory holding the file, not the file name.
    pub sample: String,
}

/// Lists quantification files one level below `base_dir`, one subdirectory per sample.
///
/// Sample directories and the files inside each are visited in lexical order so
/// repeated runs over the same tree produce the same cohort order. Files placed
/// directly in `base_dir` are ignored.
pub fn discover_samples(base_dir: &Path) -> Result<Vec<SampleFile>, InputError> {
    if !base_dir.is_dir() {
        return Err(InputError::DirectoryNotFound(base_dir.to_path_buf()));
    }

    let mut sample_dirs = Vec::new();
    for entry in fs::read_dir(base_dir)? {
        let path = entry?.path();
        if path.is_dir() {
            sample_dirs.push(path);
        }
    }
    sample_dirs.sort();

    let mut out = Vec::new();
    for dir in sample_dirs {
        let sample = match dir.file_name() {
            Some(name) => name.to_string_lossy().into_owned(),
            None => continue,
        };
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(err) => {
                crate::warn!(
                    "cannot list sample directory {}; skipping: {}",
                    dir.display(),
                    err
                );
                continue;
            }
        };

        let files = collect_quant_files(&dir, entries.map(|entry| entry.map(|e| e.path())));
        for path in files {
            out.push(SampleFile {
                path,
                sample: sample.clone(),
            });
        }
    }

    Ok(out)
}

/// Keeps quantification files from one sample directory listing, sorted.
/// Entries that fail to read are logged and skipped; they never abort discovery.
fn collect_quant_files<I>(dir: &Path, entries: I) -> Vec<PathBuf>
where
    I: IntoIterator<Item = std::io::Result<PathBuf>>,
{
    let mut files = Vec::new();
    for entry in entries {
        let path = match entry {
            Ok(path) => path,
            Err(err) => {
                crate::warn!(
                    "cannot read entry in sample directory {}; skipping: {}",
                    dir.display(),
                    err
                );
                continue;
            }
        };
        if path.is_file() && is_quant_file(&path) {
            files.push(path);
        }
    }
    files.sort();
    files
}

pub fn is_quant_file(path: &Path) -> bool {
    let Some(name) = path.file_name() else {
        return false;
    };
    let name = name.to_string_lossy();
    QUANT_SUFFIXES.iter().any(|suffix| name.ends_with(suffix))
}

pub fn open_maybe_gz(path: &Path) -> std::io::Result<Box<dyn BufRead>> {
    let file = File::open(path)?;
    if path.extension().is_some_and(|ext| ext == "gz") {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
