//! Galaxy Collector - star-system survey across galaxy nodes
//!
//! Pipeline:
//! - [`collector`] fans out one [`fetcher`] call per node address
//! - [`aggregator`] turns the successful records into a snapshot and statistics
//! - [`output`] writes the snapshot JSON, [`report`] prints the console summary

pub mod aggregator;
pub mod cli;
pub mod collector;
pub mod config;
pub mod fetcher;
pub mod model;
pub mod output;
pub mod report;
pub mod survey;

pub use aggregator::{build_snapshot, summarize, GalaxyStats};
pub use collector::{CollectError, CollectObserver, Collection, Collector};
pub use config::CollectorConfig;
pub use fetcher::{FetchError, Fetcher};
pub use model::{GalaxySnapshot, Position, StarType, StellarClass, SystemRecord};
pub use survey::{run_survey, SurveyResult};
