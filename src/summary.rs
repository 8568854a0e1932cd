//! Read-only summaries for chat context and trend charts
//!
//! This module builds the two views other components consume: a text summary
//! of the latest record for prompt assembly, and a chronological series of
//! history points for charts.
//!
//! Absent fields render as an explicit "not recorded" sentinel rather than
//! being omitted; the consuming prompt text depends on that distinction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::StoredRecord;

/// Sentinel rendered for any field with no recorded value
pub const NOT_RECORDED: &str = "not recorded";

/// Snapshot of a user's latest record, nullable field by field
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthSummary {
    /// Blood pressure in "systolic/diastolic" form
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_pressure: Option<String>,
    /// Heart rate (bpm)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heart_rate: Option<f64>,
    /// Body temperature (celsius)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature_c: Option<f64>,
    /// Body weight (kg)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    /// Total cholesterol (mg/dL)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cholesterol: Option<f64>,
    /// Risk percentage from the record's assessment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_score: Option<f64>,
    /// When the underlying reading was recorded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recorded_at: Option<DateTime<Utc>>,
}

impl HealthSummary {
    /// Summary with every field unrecorded.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Summary of one stored record.
    pub fn from_record(record: &StoredRecord) -> Self {
        Self {
            blood_pressure: record.reading.blood_pressure.map(|bp| bp.as_string()),
            heart_rate: record.reading.heart_rate,
            temperature_c: record.reading.temperature_c,
            weight_kg: record.reading.weight_kg,
            cholesterol: record.reading.cholesterol,
            risk_score: record.assessment.as_ref().map(|a| a.percentage),
            recorded_at: Some(record.reading.recorded_at),
        }
    }

    /// Whether any field carries a value.
    pub fn has_data(&self) -> bool {
        self.blood_pressure.is_some()
            || self.heart_rate.is_some()
            || self.temperature_c.is_some()
            || self.weight_kg.is_some()
            || self.cholesterol.is_some()
            || self.risk_score.is_some()
    }

    /// Render the summary as the context block handed to prompt assembly.
    /// Every field appears, recorded or not.
    pub fn render(&self) -> String {
        let lines = [
            format!(
                "- Blood pressure: {}",
                or_sentinel(self.blood_pressure.clone())
            ),
            format!(
                "- Heart rate: {}",
                or_sentinel(self.heart_rate.map(|v| format!("{} bpm", v)))
            ),
            format!(
                "- Temperature: {}",
                or_sentinel(self.temperature_c.map(|v| format!("{} C", v)))
            ),
            format!(
                "- Weight: {}",
                or_sentinel(self.weight_kg.map(|v| format!("{} kg", v)))
            ),
            format!(
                "- Cholesterol: {}",
                or_sentinel(self.cholesterol.map(|v| format!("{} mg/dL", v)))
            ),
            format!(
                "- Risk score: {}",
                or_sentinel(self.risk_score.map(|v| format!("{:.1}%", v)))
            ),
            format!(
                "- Recorded: {}",
                or_sentinel(
                    self.recorded_at
                        .map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string())
                )
            ),
        ];
        format!("Latest recorded health data:\n{}", lines.join("\n"))
    }
}

fn or_sentinel(value: Option<String>) -> String {
    value.unwrap_or_else(|| NOT_RECORDED.to_string())
}

/// One point of the trend series shown on dashboard charts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    /// Short date label, e.g. "Jan 05"
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub systolic: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diastolic: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heart_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature_c: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_score: Option<f64>,
}

impl HistoryPoint {
    pub fn from_record(record: &StoredRecord) -> Self {
        Self {
            label: record.reading.recorded_at.format("%b %d").to_string(),
            systolic: record.reading.blood_pressure.map(|bp| bp.systolic),
            diastolic: record.reading.blood_pressure.map(|bp| bp.diastolic),
            heart_rate: record.reading.heart_rate,
            temperature_c: record.reading.temperature_c,
            weight_kg: record.reading.weight_kg,
            risk_score: record.assessment.as_ref().map(|a| a.percentage),
        }
    }
}

/// Chart series from a most-recent-first history slice.
///
/// The store hands out history newest first; charts plot left to right, so
/// the series is reversed into chronological order here.
pub fn history_series(records: &[&StoredRecord]) -> Vec<HistoryPoint> {
    records
        .iter()
        .rev()
        .map(|record| HistoryPoint::from_record(record))
        .collect()
}
