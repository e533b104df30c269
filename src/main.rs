use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use quantscope::{AnalysisConfig, Analyzer, PriceBar};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(version, about = "Technical and risk analysis of one price series")]
struct Cli {
    /// JSON array of price bars, oldest first
    bars: PathBuf,

    /// Print the analysis as single-line JSON
    #[arg(long)]
    compact: bool,
}

fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quantscope=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let path = &cli.bars;

    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let bars: Vec<PriceBar> = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse bars from {}", path.display()))?;
    info!("Loaded {} bars from {}", bars.len(), path.display());

    let analyzer = Analyzer::new(AnalysisConfig::from_env());
    let analysis = analyzer.analyze_bars(bars)?;

    let json = if cli.compact {
        serde_json::to_string(&analysis)?
    } else {
        serde_json::to_string_pretty(&analysis)?
    };
    println!("{}", json);
    eprintln!("{}", analysis.recommendation);

    Ok(())
}
