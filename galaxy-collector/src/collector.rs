//! Fan-out collection across all requested nodes
//!
//! One task per address, launched eagerly. Outcomes flow back through a channel
//! sized to the number of addresses, so no task ever waits on the consumer.
//! The channel closing (every task dropped its sender) is the join barrier.

use crate::config::CollectorConfig;
use crate::fetcher::{FetchError, Fetcher};
use crate::model::SystemRecord;
use std::sync::Arc;
use tokio::sync::{mpsc, Semaphore};
use tracing::{debug, info, warn};

#[derive(Debug, thiserror::Error)]
pub enum CollectError {
    #[error("no star systems collected ({failed} of {requested} nodes failed)")]
    NoRecords { requested: usize, failed: usize },
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Receives each fetch outcome as soon as it arrives
pub trait CollectObserver {
    fn on_record(&mut self, _address: &str, _record: &SystemRecord) {}
    fn on_failure(&mut self, _error: &FetchError) {}
}

/// Observer that ignores everything
pub struct Silent;

impl CollectObserver for Silent {}

/// Everything gathered in one run, in completion order
#[derive(Debug)]
pub struct Collection {
    pub requested: usize,
    pub records: Vec<SystemRecord>,
    pub failures: Vec<FetchError>,
}

struct FetchOutcome {
    address: String,
    result: Result<SystemRecord, FetchError>,
}

pub struct Collector {
    fetcher: Fetcher,
    max_in_flight: Option<usize>,
}

impl Collector {
    pub fn new(fetcher: Fetcher) -> Self {
        Self { fetcher, max_in_flight: None }
    }

    pub fn from_config(config: &CollectorConfig) -> Result<Self, CollectError> {
        let fetcher = Fetcher::new(config)?;
        Ok(Self::new(fetcher).with_max_in_flight(config.max_in_flight))
    }

    /// Bound concurrent fetches. `None` (or 0) keeps one task per address running at once.
    pub fn with_max_in_flight(mut self, limit: Option<usize>) -> Self {
        self.max_in_flight = limit.filter(|n| *n > 0);
        self
    }

    /// Fetch every address and wait for all of them to finish
    ///
    /// Duplicate addresses are fetched independently. Returns
    /// [`CollectError::NoRecords`] when nothing was collected.
    pub async fn collect<O: CollectObserver>(
        &self,
        addresses: &[String],
        observer: &mut O,
    ) -> Result<Collection, CollectError> {
        let requested = addresses.len();
        if requested == 0 {
            warn!("No node addresses supplied");
            return Err(CollectError::NoRecords { requested: 0, failed: 0 });
        }

        info!("Collecting from {} nodes", requested);
        let (tx, mut rx) = mpsc::channel::<FetchOutcome>(requested);
        let limiter = self.max_in_flight.map(|n| Arc::new(Semaphore::new(n)));

        for address in addresses {
            let tx = tx.clone();
            let fetcher = self.fetcher.clone();
            let address = address.clone();
            let limiter = limiter.clone();

            tokio::spawn(async move {
                let _permit = match limiter {
                    Some(semaphore) => semaphore.acquire_owned().await.ok(),
                    None => None,
                };
                let result = fetcher.fetch(&address).await;
                // capacity == task count, never blocks
                let _ = tx.send(FetchOutcome { address, result }).await;
            });
        }
        drop(tx);

        let mut records = Vec::with_capacity(requested);
        let mut failures = Vec::new();
        while let Some(outcome) = rx.recv().await {
            match outcome.result {
                Ok(record) => {
                    observer.on_record(&outcome.address, &record);
                    records.push(record);
                }
                Err(error) => {
                    warn!("Node {} failed at {} stage: {}", outcome.address, error.stage(), error);
                    observer.on_failure(&error);
                    failures.push(error);
                }
            }
        }

        debug!("All {} fetches finished", requested);
        if records.is_empty() {
            return Err(CollectError::NoRecords { requested, failed: failures.len() });
        }

        info!("Collected {} systems, {} nodes failed", records.len(), failures.len());
        Ok(Collection { requested, records, failures })
    }
}
