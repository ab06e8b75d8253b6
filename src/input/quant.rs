use std::collections::HashMap;
use std::io::BufRead;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::input::open_maybe_gz;

/// `gene_id` prefix of STAR mapping-summary rows (`N_unmapped`, `N_multimapping`, ...).
pub const SUMMARY_ROW_PREFIX: &str = "N_";

pub const COL_GENE_ID: &str = "gene_id";
pub const COL_GENE_NAME: &str = "gene_name";
pub const COL_TPM: &str = "tpm_unstranded";
pub const COL_FPKM: &str = "fpkm_unstranded";
pub const COL_FPKM_UQ: &str = "fpkm_uq_unstranded";
pub const COL_UNSTRANDED: &str = "unstranded";
pub const COL_STRANDED_FIRST: &str = "stranded_first";
pub const COL_STRANDED_SECOND: &str = "stranded_second";

pub const REQUIRED_COLUMNS: [&str; 8] = [
    COL_GENE_ID,
    COL_GENE_NAME,
    COL_TPM,
    COL_FPKM,
    COL_FPKM_UQ,
    COL_UNSTRANDED,
    COL_STRANDED_FIRST,
    COL_STRANDED_SECOND,
];

#[derive(Debug, Error)]
#[error("failed to parse {}: {cause}", .path.display())]
pub struct ParseError {
    pub path: PathBuf,
    pub cause: ParseCause,
}

#[derive(Debug, Error)]
pub enum ParseCause {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("no header line found")]
    MissingHeader,
    #[error("missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

/// Numeric cells of one row. `None` marks an empty or non-numeric cell.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RawMetrics {
    pub tpm_unstranded: Option<f64>,
    pub fpkm_unstranded: Option<f64>,
    pub fpkm_uq_unstranded: Option<f64>,
    pub unstranded: Option<f64>,
    pub stranded_first: Option<f64>,
    pub stranded_second: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuantRow {
    pub gene_id: String,
    pub gene_name: String,
    pub values: RawMetrics,
}

#[derive(Debug, Clone)]
pub struct QuantTable {
    pub path: PathBuf,
    pub rows: Vec<QuantRow>,
    pub summary_rows_dropped: usize,
}

struct ColumnIndex {
    gene_id: usize,
    gene_name: usize,
    tpm: usize,
    fpkm: usize,
    fpkm_uq: usize,
    unstranded: usize,
    stranded_first: usize,
    stranded_second: usize,
}

impl ColumnIndex {
    fn from_header(header: &[String]) -> Result<Self, ParseCause> {
        let mut positions: HashMap<&str, usize> = HashMap::new();
        for (idx, name) in header.iter().enumerate() {
            positions.entry(name.as_str()).or_insert(idx);
        }

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|col| !positions.contains_key(*col))
            .map(|col| col.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ParseCause::MissingColumns(missing));
        }

        let at = |col: &str| positions[col];
        Ok(Self {
            gene_id: at(COL_GENE_ID),
            gene_name: at(COL_GENE_NAME),
            tpm: at(COL_TPM),
            fpkm: at(COL_FPKM),
            fpkm_uq: at(COL_FPKM_UQ),
            unstranded: at(COL_UNSTRANDED),
            stranded_first: at(COL_STRANDED_FIRST),
            stranded_second: at(COL_STRANDED_SECOND),
        })
    }

    fn row(&self, fields: &[&str]) -> QuantRow {
        let text = |idx: usize| fields.get(idx).map(|s| s.trim()).unwrap_or("");
        let num = |idx: usize| parse_numeric(text(idx));
        QuantRow {
            gene_id: text(self.gene_id).to_string(),
            gene_name: text(self.gene_name).to_string(),
            values: RawMetrics {
                tpm_unstranded: num(self.tpm),
                fpkm_unstranded: num(self.fpkm),
                fpkm_uq_unstranded: num(self.fpkm_uq),
                unstranded: num(self.unstranded),
                stranded_first: num(self.stranded_first),
                stranded_second: num(self.stranded_second),
            },
        }
    }
}

/// Parses one quantification file. The file handle is released before returning,
/// on success and on error alike.
pub fn parse_quant_file(path: &Path) -> Result<QuantTable, ParseError> {
    let wrap = |cause: ParseCause| ParseError {
        path: path.to_path_buf(),
        cause,
    };
    let reader = open_maybe_gz(path).map_err(|e| wrap(ParseCause::Io(e)))?;
    let rows = parse_quant_reader(reader).map_err(wrap)?;
    let before = rows.len();
    let rows = drop_summary_rows(rows);
    Ok(QuantTable {
        path: path.to_path_buf(),
        summary_rows_dropped: before - rows.len(),
        rows,
    })
}

/// Reads `#` comments, a header line and tab-separated rows. Summary rows are
/// still present in the result; see [`drop_summary_rows`].
pub fn parse_quant_reader<R: BufRead>(mut reader: R) -> Result<Vec<QuantRow>, ParseCause> {
    let mut buf = String::new();
    let mut line_no = 0usize;

    if !read_data_line(&mut reader, &mut buf, &mut line_no)? {
        return Err(ParseCause::MissingHeader);
    }
    let header: Vec<String> = buf.split('\t').map(|s| s.trim().to_string()).collect();
    let columns = ColumnIndex::from_header(&header)?;

    let mut rows = Vec::new();
    while read_data_line(&mut reader, &mut buf, &mut line_no)? {
        let fields: Vec<&str> = buf.split('\t').collect();
        let row = columns.row(&fields);
        if row.gene_id.is_empty() {
            crate::warn!("row without gene_id; skipping (line {})", line_no);
            continue;
        }
        rows.push(row);
    }
    Ok(rows)
}

/// Loads the next line that is neither blank nor a `#` comment into `buf`,
/// without its line terminator. Returns `false` at end of input.
fn read_data_line<R: BufRead>(
    reader: &mut R,
    buf: &mut String,
    line_no: &mut usize,
) -> std::io::Result<bool> {
    loop {
        buf.clear();
        if reader.read_line(buf)? == 0 {
            return Ok(false);
        }
        *line_no += 1;
        let len = buf.trim_end_matches(['\r', '\n']).len();
        buf.truncate(len);
        if !buf.starts_with('#') && !buf.trim().is_empty() {
            return Ok(true);
        }
    }
}

pub fn is_summary_row(row: &QuantRow) -> bool {
    row.gene_id.starts_with(SUMMARY_ROW_PREFIX)
}

pub fn drop_summary_rows(rows: Vec<QuantRow>) -> Vec<QuantRow> {
    rows.into_iter().filter(|row| !is_summary_row(row)).collect()
}

/// Empty, non-numeric and non-finite cells all read as `None`.
pub fn parse_numeric(cell: &str) -> Option<f64> {
    let cell = cell.trim();
    if cell.is_empty() {
        return None;
    }
    cell.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/quant.rs"]
mod tests;
