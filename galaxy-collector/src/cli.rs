//! Command line surface
//!
//! Long flags also accept the single-dash spelling (`-nodes a:1,b:1`), which is
//! how existing scripts invoke the collector.

use crate::config::CollectorConfig;
use clap::{CommandFactory, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "galaxy-collector")]
#[command(version)]
#[command(about = "Collect star systems from galaxy nodes into one snapshot", long_about = None)]
pub struct Args {
    /// Comma-separated node addresses (host:port)
    #[arg(long, value_delimiter = ',', required = true)]
    pub nodes: Vec<String>,

    /// Snapshot file [default: galaxy.json]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Per-node request deadline in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Maximum number of nodes fetched at once
    #[arg(long)]
    pub max_in_flight: Option<usize>,

    /// TOML config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Trimmed addresses, empty entries dropped
    pub fn addresses(&self) -> Vec<String> {
        self.nodes
            .iter()
            .map(|n| n.trim())
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Flags win over file settings
    pub fn apply_to(&self, config: &mut CollectorConfig) {
        if let Some(output) = &self.output {
            config.output = output.clone();
        }
        if self.timeout_secs.is_some() {
            config.timeout_secs = self.timeout_secs;
        }
        if self.max_in_flight.is_some() {
            config.max_in_flight = self.max_in_flight;
        }
    }
}

/// Rewrite `-name` / `-name=value` into `--name` forms for known long flags
pub fn normalize_args<I>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let command = Args::command();
    let longs: Vec<String> = command
        .get_arguments()
        .filter_map(|arg| arg.get_long().map(str::to_string))
        .chain(["help".to_string(), "version".to_string()])
        .collect();

    args.into_iter()
        .map(|arg| {
            let Some(rest) = arg.strip_prefix('-') else { return arg };
            if rest.starts_with('-') {
                return arg;
            }
            let name = rest.split('=').next().unwrap_or(rest);
            if longs.iter().any(|long| long == name) {
                format!("-{}", arg)
            } else {
                arg
            }
        })
        .collect()
}
