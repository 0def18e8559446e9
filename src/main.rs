use anyhow::Context;
use clap::Parser;
use parcelog::Ledger;
use std::io::{self, BufWriter};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Input file with one event or query per line
    input: PathBuf,

    /// Print run statistics and elapsed time to stderr
    #[arg(long)]
    timed: bool,

    /// JSON or TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "parcelog=warn".into()),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let mut builder = Ledger::builder();
    if let Some(path) = &args.config {
        builder = builder
            .config_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?;
    }
    let mut ledger = builder.build()?;

    let stdout = io::stdout();
    let summary = ledger.run_path(&args.input, BufWriter::new(stdout.lock()))?;

    if args.timed {
        eprintln!("{}", serde_json::to_string_pretty(&summary)?);
    }

    Ok(())
}
