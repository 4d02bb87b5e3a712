use super::domain::Vehicle;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A vehicle is overdue once its last inspection is more than this many calendar days old.
pub const INSPECTION_INTERVAL_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InspectionState {
    Operational,
    NeedsInspection,
    Unknown,
}

impl InspectionState {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Operational => "operational",
            Self::NeedsInspection => "needs-inspection",
            Self::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleStatus {
    pub state: InspectionState,
    pub days_overdue: u32,
}

impl VehicleStatus {
    pub const UNKNOWN: Self = Self {
        state: InspectionState::Unknown,
        days_overdue: 0,
    };

    pub const OPERATIONAL: Self = Self {
        state: InspectionState::Operational,
        days_overdue: 0,
    };

    pub const fn overdue(days_overdue: u32) -> Self {
        Self {
            state: InspectionState::NeedsInspection,
            days_overdue,
        }
    }

    pub fn needs_inspection(&self) -> bool {
        self.state == InspectionState::NeedsInspection
    }

    /// Short dashboard badge text.
    pub fn badge(&self) -> String {
        match self.state {
            InspectionState::Operational => "OK".to_string(),
            InspectionState::NeedsInspection => format!("{}d OVERDUE", self.days_overdue),
            InspectionState::Unknown => "UNKNOWN".to_string(),
        }
    }
}

/// Whole calendar days between two dates; negative when `last_test` is in the future.
pub fn days_since(last_test: NaiveDate, today: NaiveDate) -> i64 {
    today.signed_duration_since(last_test).num_days()
}

/// Derives the inspection status of `vehicle` as of `today`.
///
/// Working on `NaiveDate` keeps the arithmetic at midnight-to-midnight granularity, so the
/// time of day a check runs never shifts the result. Missing vehicles and unparsable dates
/// evaluate to [`VehicleStatus::UNKNOWN`].
pub fn evaluate(vehicle: Option<&Vehicle>, today: NaiveDate) -> VehicleStatus {
    let Some(last_test) = vehicle.and_then(Vehicle::last_tested_on) else {
        return VehicleStatus::UNKNOWN;
    };

    let elapsed = days_since(last_test, today);
    if elapsed <= INSPECTION_INTERVAL_DAYS {
        VehicleStatus::OPERATIONAL
    } else {
        let overdue = elapsed - INSPECTION_INTERVAL_DAYS;
        VehicleStatus::overdue(u32::try_from(overdue).unwrap_or(u32::MAX))
    }
}
