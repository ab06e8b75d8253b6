mod input;
mod logging;
mod model;
mod pipeline;
mod report;

use std::path::PathBuf;

use clap::builder::NonEmptyStringValueParser;
use clap::{Args, Parser, Subcommand};

use crate::model::thresholds::ZThreshold;
use crate::pipeline::{AnalysisError, RunConfig, run_analysis};

pub const DEFAULT_GENE: &str = "CHRM3";

#[derive(Debug, Parser)]
#[command(
    name = "kira-geneqc",
    version,
    about = "Single-gene expression summary and outlier detection over per-sample quantification TSVs"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Run(RunArgs),
}

#[derive(Debug, Args)]
struct RunArgs {
    #[arg(
        env = "KIRA_GENEQC_DATA_DIR",
        default_value = "data",
        help = "Base directory with one subdirectory per sample"
    )]
    base_dir: PathBuf,

    #[arg(long, default_value = "results", help = "Output directory")]
    out: PathBuf,

    #[arg(long, default_value_t = ZThreshold::default(), help = "Absolute z-score cut-off (> 0)")]
    z_threshold: ZThreshold,

    #[arg(long, default_value = DEFAULT_GENE, value_parser = NonEmptyStringValueParser::new())]
    gene: String,
}

impl RunArgs {
    fn into_config(self) -> RunConfig {
        RunConfig {
            base_dir: self.base_dir,
            out_dir: self.out,
            gene: self.gene,
            z_threshold: self.z_threshold,
        }
    }
}

fn main() {
    logging::init();
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        crate::error!("{err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), AnalysisError> {
    match cli.command {
        Commands::Run(args) => {
            let config = args.into_config();
            crate::info!(
                "analysing {} under {} (z threshold {})",
                config.gene,
                config.base_dir.display(),
                config.z_threshold
            );
            let output = run_analysis(&config)?;
            crate::info!(
                "{} of {} samples express {}; {} high and {} low outliers",
                output.summary.found_samples,
                output.cohort.len(),
                output.cohort.gene(),
                output.outliers.high().count(),
                output.outliers.low().count()
            );
            Ok(())
        }
    }
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
