use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque vehicle identifier as issued by the data store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VehicleId(pub String);

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VehicleId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Fleet categories recognised by the log; anything else falls back to `General`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleCategory {
    Fire,
    Ambulance,
    Marine,
    #[default]
    #[serde(other)]
    General,
}

impl VehicleCategory {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "fire" => Self::Fire,
            "ambulance" => Self::Ambulance,
            "marine" => Self::Marine,
            _ => Self::General,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fire => "fire",
            Self::Ambulance => "ambulance",
            Self::Marine => "marine",
            Self::General => "general",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Fire => "Fire Apparatus",
            Self::Ambulance => "Medical Transport",
            Self::Marine => "Marine Vessel",
            Self::General => "General Purpose",
        }
    }
}

/// Vehicle row from the `vehicles` collection.
///
/// `last_test_date` is kept as the raw `YYYY-MM-DD` string the store hands back so that a
/// malformed value surfaces as an indeterminate status instead of a load failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: VehicleId,
    pub name: String,
    #[serde(rename = "type", default)]
    pub category: VehicleCategory,
    #[serde(default)]
    pub has_pump: bool,
    #[serde(default)]
    pub last_test_date: Option<String>,
}

impl Vehicle {
    pub fn last_tested_on(&self) -> Option<NaiveDate> {
        self.last_test_date.as_deref().and_then(parse_calendar_date)
    }
}

/// Driver row from the `drivers` collection. The name is the identifier used by test logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Driver {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestType {
    Drive,
    Pump,
}

impl TestType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Drive => "drive",
            Self::Pump => "pump",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Drive => "Test Drive",
            Self::Pump => "Pump Test",
        }
    }
}

impl fmt::Display for TestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestOutcome {
    Pass,
    Fail,
}

impl TestOutcome {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Fail => "fail",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    #[serde(rename = "item")]
    pub label: String,
    #[serde(default)]
    pub passed: bool,
}

impl ChecklistItem {
    pub fn new(label: impl Into<String>, passed: bool) -> Self {
        Self {
            label: label.into(),
            passed,
        }
    }
}

/// Input to the submission workflow, as assembled by a test form or an API caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestSubmission {
    pub vehicle_id: VehicleId,
    pub test_type: TestType,
    pub tester: String,
    #[serde(default)]
    pub notes: Option<String>,
    pub checklist: Vec<ChecklistItem>,
    #[serde(default)]
    pub pressure: Option<f64>,
    #[serde(default)]
    pub flow_rate: Option<f64>,
}

/// A validated test log ready to be written; the store assigns `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestLogRecord {
    pub vehicle_id: VehicleId,
    pub tester: String,
    pub test_type: TestType,
    pub test_date: NaiveDate,
    #[serde(default)]
    pub notes: Option<String>,
    pub checklist_results: Vec<ChecklistItem>,
    #[serde(default)]
    pub pressure: Option<f64>,
    #[serde(default)]
    pub flow_rate: Option<f64>,
    pub status: TestOutcome,
}

/// Immutable row from the `testLogs` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestLogEntry {
    pub id: u64,
    #[serde(flatten)]
    pub record: TestLogRecord,
    pub created_at: DateTime<Utc>,
}

impl TestLogEntry {
    pub fn vehicle_id(&self) -> &VehicleId {
        &self.record.vehicle_id
    }
}

/// Parses a stored date, accepting `YYYY-MM-DD` or a full RFC 3339 timestamp.
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }

    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|timestamp| timestamp.date_naive())
}

pub fn format_calendar_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
