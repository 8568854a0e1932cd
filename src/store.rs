//! Health record store
//!
//! This module keeps per-user vitals history alongside the risk assessment
//! each submission produced. The store is an external collaborator from the
//! scoring pipeline's point of view: scoring works on values, the store just
//! remembers them.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::RiskError;
use crate::types::{RiskAssessment, VitalReading};

/// Default number of readings returned for trend queries
pub const DEFAULT_HISTORY_LIMIT: usize = 6;

/// One stored submission: the reading plus the assessment it produced, if any
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredRecord {
    pub reading: VitalReading,
    pub assessment: Option<RiskAssessment>,
}

/// Persistence seam for health records
///
/// History order is insertion order, newest last; `get_history` returns
/// most-recent-first. Timestamps on readings are informational and do not
/// drive ordering.
pub trait RecordStore {
    /// Append a record for a user.
    fn save(
        &mut self,
        user_id: &str,
        reading: VitalReading,
        assessment: Option<RiskAssessment>,
    ) -> Result<(), RiskError>;

    /// The most recently saved record for a user, if any.
    fn get_latest(&self, user_id: &str) -> Option<&StoredRecord>;

    /// Up to `limit` records for a user, most-recent-first.
    fn get_history(&self, user_id: &str, limit: usize) -> Vec<&StoredRecord>;
}

/// In-memory record store, serializable for simple file persistence
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryRecordStore {
    records: HashMap<String, Vec<StoredRecord>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records stored for a user
    pub fn record_count(&self, user_id: &str) -> usize {
        self.records.get(user_id).map_or(0, Vec::len)
    }

    /// Load a store from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize the store to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl RecordStore for MemoryRecordStore {
    fn save(
        &mut self,
        user_id: &str,
        reading: VitalReading,
        assessment: Option<RiskAssessment>,
    ) -> Result<(), RiskError> {
        self.records
            .entry(user_id.to_string())
            .or_default()
            .push(StoredRecord {
                reading,
                assessment,
            });
        Ok(())
    }

    fn get_latest(&self, user_id: &str) -> Option<&StoredRecord> {
        self.records.get(user_id).and_then(|records| records.last())
    }

    fn get_history(&self, user_id: &str, limit: usize) -> Vec<&StoredRecord> {
        match self.records.get(user_id) {
            Some(records) => records.iter().rev().take(limit).collect(),
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BloodPressure;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    fn make_reading(heart_rate: f64) -> VitalReading {
        let mut reading = VitalReading::at(Utc::now());
        reading.blood_pressure = Some(BloodPressure::new(120, 80));
        reading.heart_rate = Some(heart_rate);
        reading
    }

    #[test]
    fn test_latest_follows_insertion_order() {
        let mut store = MemoryRecordStore::new();
        store.save("alice", make_reading(60.0), None).unwrap();
        store.save("alice", make_reading(72.0), None).unwrap();

        let latest = store.get_latest("alice").unwrap();
        assert_eq!(latest.reading.heart_rate, Some(72.0));
    }

    #[test]
    fn test_history_is_most_recent_first() {
        let mut store = MemoryRecordStore::new();
        for hr in [60.0, 65.0, 70.0, 75.0] {
            store.save("alice", make_reading(hr), None).unwrap();
        }

        let history = store.get_history("alice", 3);
        let rates: Vec<f64> = history
            .iter()
            .filter_map(|record| record.reading.heart_rate)
            .collect();
        assert_eq!(rates, vec![75.0, 70.0, 65.0]);
    }

    #[test]
    fn test_unknown_user_is_empty() {
        let store = MemoryRecordStore::new();
        assert!(store.get_latest("nobody").is_none());
        assert!(store.get_history("nobody", 10).is_empty());
        assert_eq!(store.record_count("nobody"), 0);
    }

    #[test]
    fn test_users_are_isolated() {
        let mut store = MemoryRecordStore::new();
        store.save("alice", make_reading(60.0), None).unwrap();
        store.save("bob", make_reading(90.0), None).unwrap();

        assert_eq!(
            store.get_latest("alice").unwrap().reading.heart_rate,
            Some(60.0)
        );
        assert_eq!(
            store.get_latest("bob").unwrap().reading.heart_rate,
            Some(90.0)
        );
    }

    #[test]
    fn test_serialization_round_trip() {
        let mut store = MemoryRecordStore::new();
        store.save("alice", make_reading(64.0), None).unwrap();
        store.save("alice", make_reading(68.0), None).unwrap();

        let json = store.to_json().unwrap();
        let loaded = MemoryRecordStore::from_json(&json).unwrap();

        assert_eq!(loaded.record_count("alice"), 2);
        assert_eq!(
            loaded.get_latest("alice").unwrap().reading.heart_rate,
            Some(68.0)
        );
    }
}
