//! Console report on stdout: one line per node as it answers, then the summary
//!
//! Per-node lines cannot fail the collection, so a write error there is logged
//! once and remembered. The summary returns its error to the caller.

use crate::aggregator::GalaxyStats;
use crate::collector::CollectObserver;
use crate::fetcher::FetchError;
use crate::model::SystemRecord;
use std::fmt;
use std::io::{self, Write};
use tracing::warn;

pub struct ConsoleReport<W: Write> {
    out: W,
    write_failed: bool,
}

impl ConsoleReport<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleReport<W> {
    pub fn new(out: W) -> Self {
        Self { out, write_failed: false }
    }

    pub fn summary(&mut self, stats: &GalaxyStats) -> io::Result<()> {
        write!(self.out, "{}", stats)?;
        self.out.flush()
    }

    /// True once any per-node line could not be written
    pub fn write_failed(&self) -> bool {
        self.write_failed
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, args: fmt::Arguments<'_>) {
        if let Err(e) = self.out.write_fmt(args).and_then(|()| self.out.write_all(b"\n")) {
            if !self.write_failed {
                warn!("Console report output failed: {}", e);
            }
            self.write_failed = true;
        }
    }
}

impl<W: Write> CollectObserver for ConsoleReport<W> {
    fn on_record(&mut self, address: &str, record: &SystemRecord) {
        self.line(format_args!(
            "Received data from {}: {} (class {}, {})",
            address, record.name, record.star_type.class, record.star_type.description
        ));
    }

    fn on_failure(&mut self, error: &FetchError) {
        self.line(format_args!(
            "Failed to fetch data from {} ({} error): {}",
            error.address(),
            error.stage(),
            error
        ));
    }
}
