use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use super::checklist::checklist_for;
use super::domain::{
    ChecklistItem, TestLogEntry, TestOutcome, TestType, Vehicle, VehicleCategory, VehicleId,
};
use super::ranking::{rank, summarize, FleetSummary};
use super::status::{evaluate, InspectionState};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleStatusView {
    pub id: VehicleId,
    pub name: String,
    pub category: VehicleCategory,
    pub category_label: &'static str,
    pub has_pump: bool,
    pub last_test_date: Option<String>,
    pub state: InspectionState,
    pub days_overdue: u32,
    pub status_label: String,
}

impl VehicleStatusView {
    pub fn new(vehicle: &Vehicle, today: NaiveDate) -> Self {
        let status = evaluate(Some(vehicle), today);
        Self {
            id: vehicle.id.clone(),
            name: vehicle.name.clone(),
            category: vehicle.category,
            category_label: vehicle.category.label(),
            has_pump: vehicle.has_pump,
            last_test_date: vehicle.last_test_date.clone(),
            state: status.state,
            days_overdue: status.days_overdue,
            status_label: status.badge(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetDashboard {
    pub evaluated_on: NaiveDate,
    pub vehicles: Vec<VehicleStatusView>,
    pub summary: FleetSummary,
}

impl FleetDashboard {
    pub fn build(vehicles: &[Vehicle], today: NaiveDate) -> Self {
        Self {
            evaluated_on: today,
            vehicles: rank(vehicles, today)
                .iter()
                .map(|vehicle| VehicleStatusView::new(vehicle, today))
                .collect(),
            summary: summarize(vehicles, today),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestLogView {
    pub id: u64,
    pub test_date: NaiveDate,
    pub tester: String,
    pub test_type: TestType,
    pub status: TestOutcome,
    /// e.g. `DRIVE - PASS`
    pub headline: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&TestLogEntry> for TestLogView {
    fn from(entry: &TestLogEntry) -> Self {
        let record = &entry.record;
        Self {
            id: entry.id,
            test_date: record.test_date,
            tester: record.tester.clone(),
            test_type: record.test_type,
            status: record.status,
            headline: format!(
                "{} - {}",
                record.test_type.as_str().to_uppercase(),
                record.status.as_str().to_uppercase()
            ),
            notes: record.notes.clone(),
            created_at: entry.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleDetail {
    pub vehicle: VehicleStatusView,
    pub test_types: Vec<TestType>,
    pub drive_checklist: Vec<ChecklistItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pump_checklist: Option<Vec<ChecklistItem>>,
    pub history: Vec<TestLogView>,
}

impl VehicleDetail {
    pub fn build(vehicle: &Vehicle, history: &[&TestLogEntry], today: NaiveDate) -> Self {
        let mut test_types = vec![TestType::Drive];
        let pump_checklist = if vehicle.has_pump {
            test_types.push(TestType::Pump);
            Some(checklist_for(vehicle, TestType::Pump))
        } else {
            None
        };

        Self {
            vehicle: VehicleStatusView::new(vehicle, today),
            test_types,
            drive_checklist: checklist_for(vehicle, TestType::Drive),
            pump_checklist,
            history: history.iter().map(|entry| TestLogView::from(*entry)).collect(),
        }
    }
}
