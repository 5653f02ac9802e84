use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use hoopshot_datagen::{DatagenConfig, generate};

#[derive(Parser)]
#[command(name = "hoopshot-datagen")]
#[command(about = "Generate calibrated shot rows for force-prediction training", long_about = None)]
struct Cli {
    /// TOML grid/calibration config (defaults when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output CSV file path
    #[arg(long)]
    out: PathBuf,

    /// Optional JSON-lines dump of every calibration trace
    #[arg(long)]
    trace_out: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = DatagenConfig::load(cli.config.as_deref())?;
    tracing::info!(points = config.grid().len(), out = %cli.out.display(), "Generating shots");

    let mut rows = csv::Writer::from_path(&cli.out)
        .with_context(|| format!("creating {}", cli.out.display()))?;

    let mut trace_file = match &cli.trace_out {
        Some(path) => Some(BufWriter::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        )),
        None => None,
    };

    let summary = generate(
        &config,
        &mut rows,
        trace_file.as_mut().map(|w| w as &mut dyn Write),
    )?;

    if let Some(mut file) = trace_file {
        file.flush().context("flushing trace")?;
    }

    tracing::info!(
        attempted = summary.attempted,
        accepted = summary.accepted,
        infeasible = summary.infeasible,
        rejected = summary.rejected,
        "Done"
    );
    Ok(())
}
