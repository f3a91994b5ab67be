//! Galaxy Collector CLI
//!
//! `galaxy-collector -nodes host1:8080,host2:8080 [-output galaxy.json]`

use anyhow::{Context, Result};
use clap::Parser;
use galaxy_collector::cli::{normalize_args, Args};
use galaxy_collector::report::ConsoleReport;
use galaxy_collector::{run_survey, CollectorConfig};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse_from(normalize_args(std::env::args()));

    // Logs on stderr, report on stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Galaxy Collector v{} starting", env!("CARGO_PKG_VERSION"));

    let mut config = CollectorConfig::load(args.config.as_deref())
        .await
        .context("Failed to load configuration")?;
    args.apply_to(&mut config);
    config.validate().context("Invalid configuration")?;
    debug!("Effective config: {:?}", config);

    let addresses = args.addresses();
    let mut report = ConsoleReport::stdout();
    let result = run_survey(&config, &addresses, &mut report).await?;

    report.summary(&result.stats).context("Failed to print summary")?;
    if report.write_failed() {
        warn!("Some per-node report lines could not be written");
    }
    Ok(())
}
