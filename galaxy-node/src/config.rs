use crate::models::{Position, StarType};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use tokio::fs;
use tracing::{info, warn};

pub const CONFIG_ENV_VAR: &str = "GALAXY_NODE_CONFIG";
pub const ADDR_ENV_VAR: &str = "GALAXY_NODE_ADDR";
pub const DEFAULT_CONFIG_FILE: &str = "node.yaml";
pub const DEFAULT_ADDR: &str = "0.0.0.0:8080";

/// The star system this node reports
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct NodeConfig {
    pub name: String,
    pub star_type: StarType,
    #[serde(default)]
    pub position: Position,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            name: "Sol".into(),
            star_type: StarType { class: "G".into(), description: "Yellow dwarf".into() },
            position: Position::default(),
        }
    }
}

impl NodeConfig {
    pub fn from_yaml(txt: &str) -> Result<Self> {
        if txt.trim().is_empty() {
            return Ok(Self::default());
        }
        let cfg: NodeConfig = serde_yaml::from_str(txt).context("invalid node yaml")?;
        if cfg.name.trim().is_empty() {
            anyhow::bail!("node name must not be empty");
        }
        Ok(cfg)
    }
}

/// Load from `GALAXY_NODE_CONFIG` (default `node.yaml`); a missing file means the default node
pub async fn load_config() -> Result<NodeConfig> {
    let path = std::env::var(CONFIG_ENV_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.into());
    load_config_from(Path::new(&path)).await
}

pub async fn load_config_from(path: &Path) -> Result<NodeConfig> {
    if !path.exists() {
        warn!("no {}, serving default node", path.display());
        return Ok(NodeConfig::default());
    }
    let txt = fs::read_to_string(path)
        .await
        .with_context(|| format!("cannot read {}", path.display()))?;
    let cfg = NodeConfig::from_yaml(&txt).with_context(|| format!("in {}", path.display()))?;
    info!("loaded node {} from {}", cfg.name, path.display());
    Ok(cfg)
}

pub fn listen_addr() -> Result<SocketAddr> {
    let raw = std::env::var(ADDR_ENV_VAR).unwrap_or_else(|_| DEFAULT_ADDR.into());
    raw.parse().with_context(|| format!("invalid {}: {}", ADDR_ENV_VAR, raw))
}
