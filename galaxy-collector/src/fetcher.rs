//! Single-node fetch: one `GET http://<address>/system`, decoded into a record
//!
//! Failures are classified by the stage that broke (connect, body, decode) and
//! returned to the caller. Nothing is retried.

use crate::config::CollectorConfig;
use crate::model::SystemRecord;
use std::fmt;
use tracing::debug;

/// Path every node serves its system on
pub const SYSTEM_PATH: &str = "/system";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStage {
    Connect,
    Body,
    Decode,
}

impl fmt::Display for FetchStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FetchStage::Connect => "connect",
            FetchStage::Body => "body read",
            FetchStage::Decode => "decode",
        };
        f.write_str(label)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("could not reach {address}: {source}")]
    Connect {
        address: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("could not read response from {address}: {source}")]
    Body {
        address: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("invalid system data from {address} (HTTP {status}): {source}")]
    Decode {
        address: String,
        status: u16,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    pub fn address(&self) -> &str {
        match self {
            FetchError::Connect { address, .. }
            | FetchError::Body { address, .. }
            | FetchError::Decode { address, .. } => address,
        }
    }

    pub fn stage(&self) -> FetchStage {
        match self {
            FetchError::Connect { .. } => FetchStage::Connect,
            FetchError::Body { .. } => FetchStage::Body,
            FetchError::Decode { .. } => FetchStage::Decode,
        }
    }
}

/// Shared HTTP client for node fetches; cheap to clone into tasks
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: reqwest::Client,
}

impl Fetcher {
    pub fn new(config: &CollectorConfig) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(Self { client: builder.build()? })
    }

    pub fn system_url(address: &str) -> String {
        format!("http://{}{}", address, SYSTEM_PATH)
    }

    /// Fetch and decode one node's system
    pub async fn fetch(&self, address: &str) -> Result<SystemRecord, FetchError> {
        let url = Self::system_url(address);
        debug!("Fetching {}", url);

        let response = self.client.get(&url).send().await.map_err(|source| {
            debug!("Connect failed for {}: {}", address, source);
            FetchError::Connect { address: address.to_string(), source }
        })?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(|source| {
            debug!("Body read failed for {}: {}", address, source);
            FetchError::Body { address: address.to_string(), source }
        })?;

        let record: SystemRecord = serde_json::from_slice(&body).map_err(|source| {
            debug!("Decode failed for {} ({} bytes): {}", address, body.len(), source);
            FetchError::Decode { address: address.to_string(), status, source }
        })?;

        debug!(
            "Fetched {} from {}: class {} ({})",
            record.name, address, record.star_type.class, record.star_type.description
        );
        Ok(record)
    }
}
