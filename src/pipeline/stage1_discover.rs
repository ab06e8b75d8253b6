use std::path::Path;

use crate::input::{InputError, SampleFile, discover_samples};

pub fn run_stage1(base_dir: &Path) -> Result<Vec<SampleFile>, InputError> {
    let files = discover_samples(base_dir)?;
    if files.is_empty() {
        crate::warn!(
            "no quantification files found under {}",
            base_dir.display()
        );
    } else {
        crate::info!(
            "discovered {} quantification files under {}",
            files.len(),
            base_dir.display()
        );
    }
    Ok(files)
}
