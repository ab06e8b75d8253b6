use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::input::quant::parse_numeric;
use crate::model::cohort::Cohort;
use crate::model::record::{ExpressionMetrics, ExpressionRecord};
use crate::model::stats::{StatValue, SummaryStatistics};
use crate::report::format_opt_f64_6;

pub const COHORT_COLUMNS: [&str; 9] = [
    "sample",
    "found",
    "gene_id",
    "tpm_unstranded",
    "fpkm_unstranded",
    "fpkm_uq_unstranded",
    "unstranded_count",
    "stranded_first",
    "stranded_second",
];

/// One row per sample. Metrics use the shortest representation that parses
/// back to the same `f64`.
pub fn write_cohort_tsv(cohort: &Cohort, path: &Path) -> io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    writeln!(w, "{}", COHORT_COLUMNS.join("\t"))?;
    for record in cohort.records() {
        let m = record.metrics();
        writeln!(
            w,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            record.sample(),
            record.is_found(),
            record.gene_id().unwrap_or(""),
            m.tpm_unstranded,
            m.fpkm_unstranded,
            m.fpkm_uq_unstranded,
            m.unstranded_count,
            m.stranded_first,
            m.stranded_second
        )?;
    }
    w.flush()
}

pub fn read_cohort_tsv(path: &Path) -> io::Result<Vec<ExpressionRecord>> {
    let reader = BufReader::new(File::open(path)?);
    let mut lines = reader.lines();

    let header = match lines.next() {
        Some(line) => line?,
        None => return Err(invalid("expression table is empty")),
    };
    let header: Vec<&str> = header.split('\t').map(str::trim).collect();
    let mut idx = [0usize; COHORT_COLUMNS.len()];
    for (slot, col) in idx.iter_mut().zip(COHORT_COLUMNS) {
        *slot = header
            .iter()
            .position(|h| *h == col)
            .ok_or_else(|| invalid(&format!("expression table lacks column {col}")))?;
    }

    let mut records = Vec::new();
    for line in lines {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split('\t').collect();
        let cell = |i: usize| fields.get(idx[i]).map(|s| s.trim()).unwrap_or("");
        let num = |i: usize| parse_numeric(cell(i)).unwrap_or(0.0);

        let sample = cell(0);
        let record = match cell(1) {
            "true" => ExpressionRecord::detected(
                sample,
                cell(2),
                ExpressionMetrics {
                    tpm_unstranded: num(3),
                    fpkm_unstranded: num(4),
                    fpkm_uq_unstranded: num(5),
                    unstranded_count: num(6),
                    stranded_first: num(7),
                    stranded_second: num(8),
                },
            ),
            "false" => ExpressionRecord::absent(sample),
            other => {
                return Err(invalid(&format!(
                    "invalid found value '{other}' for sample {sample}"
                )));
            }
        };
        records.push(record);
    }
    Ok(records)
}

pub fn write_summary_tsv(summary: &SummaryStatistics, path: &Path) -> io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    writeln!(w, "statistic\tvalue")?;
    for (name, value) in summary.entries() {
        let value = match value {
            StatValue::Count(n) => n.to_string(),
            StatValue::Value(v) => format_opt_f64_6(v),
        };
        writeln!(w, "{}\t{}", name, value)?;
    }
    w.flush()
}

fn invalid(msg: &str) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, msg.to_string())
}
