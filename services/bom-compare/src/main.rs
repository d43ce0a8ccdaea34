//! BOM Compare
//!
//! Command-line front end: compares one master BOM against one or more
//! target BOMs and writes the JSON comparison result.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use bomdiff_utils::{init_logging, AppConfig, BomDiffError};

mod runner;

use runner::{ComparisonRequest, ComparisonRunner};

#[derive(Debug, Parser)]
#[command(name = "bom-compare", version, about = "Compare a master BOM against target BOMs")]
struct Cli {
    /// Master BOM file (xlsx, csv, txt, docx or pdf)
    #[arg(short, long)]
    master: PathBuf,

    /// Target BOM file; repeat for several targets
    #[arg(short, long = "target", required = true)]
    targets: Vec<PathBuf>,

    /// Token delimiter for .txt files (whitespace when omitted)
    #[arg(short, long)]
    delimiter: Option<String>,

    /// Configuration file (defaults to config/{default,ENVIRONMENT,local})
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the JSON result here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also write one flat CSV per target into this directory
    #[arg(long)]
    export_dir: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(e.exit_code() as u8);
        }
    };

    if let Err(e) = init_logging(&config.logging) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let request = ComparisonRequest {
        master: cli.master,
        targets: cli.targets,
        output: cli.output,
        export_dir: cli.export_dir.or_else(|| config.output.export_dir.clone().map(PathBuf::from)),
    };

    match ComparisonRunner::new(&config).run(&request) {
        Ok(result) => {
            info!(targets = result.targets.len(), "Comparison completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(code = e.error_code(), error = %e, "Comparison failed");
            eprintln!("{}", e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

fn load_config(cli: &Cli) -> Result<AppConfig, BomDiffError> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };

    if cli.delimiter.is_some() {
        config.extraction.txt_delimiter = cli.delimiter.clone();
    }

    Ok(config)
}
