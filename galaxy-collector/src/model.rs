//! Survey data model shared by the fetcher, collector and aggregator
//!
//! A node answers `GET /system` with one [`SystemRecord`]. The collector merges
//! the successful answers into a single [`GalaxySnapshot`] written to disk.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Format of the snapshot `timestamp` field
pub const SNAPSHOT_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Harvard stellar classification
///
/// Symbols outside `O,B,A,F,G,K,M` still decode (a node may report anything)
/// and are kept verbatim in `Other` so the snapshot round-trips.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StellarClass {
    O,
    B,
    A,
    F,
    G,
    K,
    M,
    Other(String),
}

impl StellarClass {
    /// Recognized classes, hottest first. Reports iterate in this order.
    pub const CANONICAL: [StellarClass; 7] = [
        StellarClass::O,
        StellarClass::B,
        StellarClass::A,
        StellarClass::F,
        StellarClass::G,
        StellarClass::K,
        StellarClass::M,
    ];

    pub fn symbol(&self) -> &str {
        match self {
            StellarClass::O => "O",
            StellarClass::B => "B",
            StellarClass::A => "A",
            StellarClass::F => "F",
            StellarClass::G => "G",
            StellarClass::K => "K",
            StellarClass::M => "M",
            StellarClass::Other(raw) => raw,
        }
    }

    pub fn is_canonical(&self) -> bool {
        !matches!(self, StellarClass::Other(_))
    }
}

impl From<String> for StellarClass {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "O" => StellarClass::O,
            "B" => StellarClass::B,
            "A" => StellarClass::A,
            "F" => StellarClass::F,
            "G" => StellarClass::G,
            "K" => StellarClass::K,
            "M" => StellarClass::M,
            _ => StellarClass::Other(raw),
        }
    }
}

impl From<StellarClass> for String {
    fn from(class: StellarClass) -> Self {
        match class {
            StellarClass::Other(raw) => raw,
            known => known.symbol().to_string(),
        }
    }
}

impl fmt::Display for StellarClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Star classification as reported by a node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarType {
    pub class: StellarClass,
    pub description: String,
}

/// Coordinates in the shared survey space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance
    pub fn distance_to(&self, other: &Position) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

/// One node's reported star system (body of `GET /system`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemRecord {
    pub name: String,
    pub star_type: StarType,
    pub position: Position,
    pub last_seen_at: DateTime<Utc>,
}

impl SystemRecord {
    pub fn distance_to(&self, other: &SystemRecord) -> f64 {
        self.position.distance_to(&other.position)
    }
}

/// Merged result of one collection run, as written to the output file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalaxySnapshot {
    pub systems: Vec<SystemRecord>,
    pub timestamp: String,
    pub node_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stellar_class_decoding() {
        let known: StellarClass = serde_json::from_str("\"K\"").unwrap();
        assert_eq!(known, StellarClass::K);
        assert!(known.is_canonical());

        let odd: StellarClass = serde_json::from_str("\"WR\"").unwrap();
        assert_eq!(odd, StellarClass::Other("WR".to_string()));
        assert!(!odd.is_canonical());
        assert_eq!(serde_json::to_string(&odd).unwrap(), "\"WR\"");
    }

    #[test]
    fn test_class_symbols_are_case_sensitive() {
        assert_eq!(StellarClass::from("g".to_string()), StellarClass::Other("g".into()));
    }

    #[test]
    fn test_position_distance() {
        let origin = Position::default();
        let p = Position::new(3.0, 4.0, 0.0);
        assert_eq!(origin.distance_to(&p), 5.0);
        assert_eq!(p.distance_to(&origin), 5.0);
        assert_eq!(p.distance_to(&p), 0.0);
    }

    #[test]
    fn test_record_decoding() {
        let body = r#"{
            "name": "Sol",
            "star_type": {"class": "G", "description": "Yellow dwarf"},
            "position": {"x": 1.5, "y": -2.0, "z": 0.0},
            "last_seen_at": "2024-03-01T12:30:45Z"
        }"#;

        let record: SystemRecord = serde_json::from_str(body).unwrap();
        assert_eq!(record.name, "Sol");
        assert_eq!(record.star_type.class, StellarClass::G);
        assert_eq!(record.star_type.description, "Yellow dwarf");
        assert_eq!(record.position, Position::new(1.5, -2.0, 0.0));
        assert_eq!(
            record.last_seen_at.format(SNAPSHOT_TIMESTAMP_FORMAT).to_string(),
            "2024-03-01T12:30:45Z"
        );
    }

    #[test]
    fn test_record_missing_field_is_rejected() {
        let body = r#"{"name": "Sol", "star_type": {"class": "G", "description": "x"}}"#;
        assert!(serde_json::from_str::<SystemRecord>(body).is_err());
    }

    #[test]
    fn test_offset_timestamps_are_normalized_to_utc() {
        let body = r#"{
            "name": "Altair",
            "star_type": {"class": "A", "description": "White"},
            "position": {"x": 0.0, "y": 0.0, "z": 0.0},
            "last_seen_at": "2024-06-01T12:00:00+02:00"
        }"#;

        let record: SystemRecord = serde_json::from_str(body).unwrap();
        let encoded = serde_json::to_value(&record).unwrap();
        assert_eq!(encoded["last_seen_at"], "2024-06-01T10:00:00Z");

        let snapshot = crate::aggregator::build_snapshot(vec![record]).unwrap();
        assert_eq!(snapshot.timestamp, "2024-06-01T10:00:00Z");
    }
}
