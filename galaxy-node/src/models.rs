use serde::{Deserialize, Serialize};

// Wire format of GET /system, mirrored by the collector's SystemRecord
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarType {
    pub class: String,       // O, B, A, F, G, K, M
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

#[derive(Debug, Serialize)]
pub struct SystemReport {
    pub name: String,
    pub star_type: StarType,
    pub position: Position,
    pub last_seen_at: String, // RFC3339, second precision
}
