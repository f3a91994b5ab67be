//! End-to-end run: collect, aggregate, write

use crate::aggregator::{self, GalaxyStats};
use crate::collector::{CollectObserver, Collector};
use crate::config::CollectorConfig;
use crate::model::GalaxySnapshot;
use crate::output;
use anyhow::{Context, Result};
use tracing::info;

#[derive(Debug)]
pub struct SurveyResult {
    pub snapshot: GalaxySnapshot,
    pub stats: GalaxyStats,
    pub failed_nodes: usize,
}

/// Run one survey and write the snapshot to `config.output`
///
/// Nothing is written unless at least one node answered and the snapshot
/// serialized cleanly.
pub async fn run_survey<O: CollectObserver>(
    config: &CollectorConfig,
    addresses: &[String],
    observer: &mut O,
) -> Result<SurveyResult> {
    let collector = Collector::from_config(config).context("Failed to create collector")?;

    let collection = collector
        .collect(addresses, observer)
        .await
        .context("Collection failed")?;
    let failed_nodes = collection.failures.len();

    let stats = aggregator::summarize(&collection.records);
    let snapshot = aggregator::build_snapshot(collection.records)
        .context("Failed to build snapshot")?;

    output::write_snapshot(&snapshot, &config.output)
        .await
        .with_context(|| format!("Failed to save snapshot to {}", config.output.display()))?;

    info!(
        "Survey complete: {} systems, {} failed nodes, timestamp {}",
        snapshot.node_count, failed_nodes, snapshot.timestamp
    );
    Ok(SurveyResult { snapshot, stats, failed_nodes })
}
