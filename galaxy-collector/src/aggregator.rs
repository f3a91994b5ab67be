//! Snapshot and statistics over the collected records
//!
//! Pure functions: same records in, same snapshot and stats out.

use crate::model::{GalaxySnapshot, StellarClass, SystemRecord, SNAPSHOT_TIMESTAMP_FORMAT};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, thiserror::Error)]
pub enum AggregateError {
    #[error("cannot build a snapshot from zero records")]
    Empty,
}

/// One histogram bucket
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassShare {
    pub class: StellarClass,
    pub count: usize,
    /// `count / total * 100`, unrounded
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GalaxyStats {
    /// All collected records, recognized class or not
    pub total: usize,
    /// Non-empty canonical classes in `O,B,A,F,G,K,M` order
    pub classes: Vec<ClassShare>,
    /// Mean over all unordered pairs; absent below two records
    pub mean_distance: Option<f64>,
}

/// Wrap the records into a snapshot, keeping their arrival order
///
/// The timestamp is the first record's `last_seen_at`, not the current time.
pub fn build_snapshot(records: Vec<SystemRecord>) -> Result<GalaxySnapshot, AggregateError> {
    let first = records.first().ok_or(AggregateError::Empty)?;
    let timestamp = first.last_seen_at.format(SNAPSHOT_TIMESTAMP_FORMAT).to_string();

    Ok(GalaxySnapshot {
        node_count: records.len(),
        timestamp,
        systems: records,
    })
}

pub fn summarize(records: &[SystemRecord]) -> GalaxyStats {
    GalaxyStats {
        total: records.len(),
        classes: class_histogram(records),
        mean_distance: mean_pairwise_distance(records),
    }
}

fn class_histogram(records: &[SystemRecord]) -> Vec<ClassShare> {
    let total = records.len();
    let mut counts: HashMap<&StellarClass, usize> = HashMap::new();
    for record in records {
        *counts.entry(&record.star_type.class).or_insert(0) += 1;
    }

    StellarClass::CANONICAL
        .iter()
        .filter_map(|class| {
            let count = counts.get(class).copied().unwrap_or(0);
            (count > 0).then(|| ClassShare {
                class: class.clone(),
                count,
                percentage: count as f64 / total as f64 * 100.0,
            })
        })
        .collect()
}

fn mean_pairwise_distance(records: &[SystemRecord]) -> Option<f64> {
    let n = records.len();
    if n < 2 {
        return None;
    }

    let mut sum = 0.0;
    for (i, a) in records.iter().enumerate() {
        for b in &records[i + 1..] {
            sum += a.distance_to(b);
        }
    }

    let pairs = (n * (n - 1) / 2) as f64;
    Some(sum / pairs)
}

impl fmt::Display for GalaxyStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Collected data from {} star systems", self.total)?;
        writeln!(f, "Star class distribution:")?;
        for share in &self.classes {
            writeln!(f, "{}: {} ({:.1}%)", share.class, share.count, share.percentage)?;
        }
        if let Some(mean) = self.mean_distance {
            writeln!(f, "Average distance between systems: {:.2}", mean)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Position, StarType};
    use chrono::{TimeZone, Utc};

    fn record(name: &str, class: &str, x: f64, y: f64, z: f64) -> SystemRecord {
        SystemRecord {
            name: name.to_string(),
            star_type: StarType {
                class: StellarClass::from(class.to_string()),
                description: format!("{class}-type star"),
            },
            position: Position::new(x, y, z),
            last_seen_at: Utc.with_ymd_and_hms(2024, 5, 17, 8, 15, 0).unwrap(),
        }
    }

    #[test]
    fn test_snapshot_keeps_arrival_order_and_first_timestamp() {
        let mut late = record("Late", "M", 0.0, 0.0, 0.0);
        late.last_seen_at = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let records = vec![record("First", "K", 0.0, 0.0, 0.0), late];

        let snapshot = build_snapshot(records).unwrap();
        assert_eq!(snapshot.node_count, 2);
        assert_eq!(snapshot.systems[0].name, "First");
        assert_eq!(snapshot.systems[1].name, "Late");
        assert_eq!(snapshot.timestamp, "2024-05-17T08:15:00Z");
    }

    #[test]
    fn test_snapshot_of_nothing_is_an_error() {
        assert!(matches!(build_snapshot(Vec::new()), Err(AggregateError::Empty)));
    }

    #[test]
    fn test_single_g_record() {
        let stats = summarize(&[record("Sol", "G", 0.0, 0.0, 0.0)]);
        assert_eq!(stats.total, 1);
        assert_eq!(stats.classes.len(), 1);
        assert_eq!(stats.classes[0].class, StellarClass::G);
        assert_eq!(stats.classes[0].percentage, 100.0);
        assert_eq!(stats.mean_distance, None);

        let report = stats.to_string();
        assert!(report.contains("G: 1 (100.0%)"));
        assert!(!report.contains("Average distance"));
    }

    #[test]
    fn test_three_point_mean_distance() {
        let records = vec![
            record("A", "O", 0.0, 0.0, 0.0),
            record("B", "B", 3.0, 0.0, 0.0),
            record("C", "A", 0.0, 4.0, 0.0),
        ];
        let stats = summarize(&records);

        let expected = (3.0 + 4.0 + 5.0) / 3.0;
        let mean = stats.mean_distance.unwrap();
        assert!((mean - expected).abs() < 1e-12);
        assert!(stats.to_string().contains("Average distance between systems: 4.00"));
    }

    #[test]
    fn test_histogram_order_and_omitted_classes() {
        let records = vec![
            record("a", "M", 0.0, 0.0, 0.0),
            record("b", "O", 0.0, 0.0, 0.0),
            record("c", "M", 0.0, 0.0, 0.0),
            record("d", "G", 0.0, 0.0, 0.0),
        ];
        let stats = summarize(&records);

        let order: Vec<_> = stats.classes.iter().map(|s| s.class.symbol()).collect();
        assert_eq!(order, vec!["O", "G", "M"]);
        assert_eq!(stats.classes[2].count, 2);

        let report = stats.to_string();
        assert!(report.contains("M: 2 (50.0%)"));
        assert!(report.contains("O: 1 (25.0%)"));
        assert!(!report.contains("B:"));
        assert!(!report.contains("K:"));
    }

    #[test]
    fn test_unrecognized_classes_count_toward_total_only() {
        let records = vec![
            record("a", "G", 0.0, 0.0, 0.0),
            record("b", "WR", 0.0, 0.0, 0.0),
            record("c", "G", 0.0, 0.0, 0.0),
        ];
        let stats = summarize(&records);

        assert_eq!(stats.total, 3);
        assert_eq!(stats.classes.len(), 1);
        let sum: f64 = stats.classes.iter().map(|s| s.percentage).sum();
        assert!(sum < 100.0);
        assert!(stats.to_string().contains("G: 2 (66.7%)"));
    }

    #[test]
    fn test_percentages_sum_to_hundred_when_all_recognized() {
        let classes = ["O", "B", "A", "F", "G", "K", "M", "K", "G"];
        let records: Vec<_> = classes
            .iter()
            .enumerate()
            .map(|(i, c)| record(&format!("s{i}"), c, i as f64, 0.0, 0.0))
            .collect();
        let stats = summarize(&records);

        let sum: f64 = stats.classes.iter().map(|s| s.percentage).sum();
        assert!((sum - 100.0).abs() < 1e-9);
        for share in &stats.classes {
            let expected = 100.0 * share.count as f64 / records.len() as f64;
            assert_eq!(format!("{:.1}", share.percentage), format!("{:.1}", expected));
        }
    }

    #[test]
    fn test_identical_positions_have_zero_mean() {
        let records = vec![record("a", "K", 1.0, 1.0, 1.0), record("b", "K", 1.0, 1.0, 1.0)];
        assert_eq!(summarize(&records).mean_distance, Some(0.0));
    }
}
