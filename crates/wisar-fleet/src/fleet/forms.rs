//! Serializable view-state for the dashboard and test forms.
//!
//! Nothing here touches the store; a front end keeps these values, mutates them in response
//! to input and hands the finished form to [`TestForm::to_submission`].

use serde::{Deserialize, Serialize};

use super::checklist::checklist_for;
use super::domain::{ChecklistItem, TestSubmission, TestType, Vehicle, VehicleId};
use super::workflow::ValidationError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DetailTab {
    #[default]
    TestDrive,
    PumpTest,
    History,
}

/// Which vehicle, if any, is open and which of its tabs is showing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetViewState {
    pub selected_vehicle: Option<VehicleId>,
    pub active_tab: DetailTab,
}

impl FleetViewState {
    pub fn select(&mut self, id: VehicleId) {
        self.selected_vehicle = Some(id);
        self.active_tab = DetailTab::TestDrive;
    }

    pub fn back_to_dashboard(&mut self) {
        self.selected_vehicle = None;
        self.active_tab = DetailTab::TestDrive;
    }

    /// Switches tabs; the pump tab is refused for vehicles without a pump.
    pub fn open_tab(&mut self, tab: DetailTab, vehicle: &Vehicle) -> bool {
        if tab == DetailTab::PumpTest && !vehicle.has_pump {
            return false;
        }
        self.active_tab = tab;
        true
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestForm {
    pub vehicle_id: VehicleId,
    pub test_type: TestType,
    pub tester: String,
    pub notes: String,
    pub checklist: Vec<ChecklistItem>,
    pub pressure: Option<f64>,
    pub flow_rate: Option<f64>,
}

impl TestForm {
    pub fn new(vehicle: &Vehicle, test_type: TestType) -> Self {
        Self {
            vehicle_id: vehicle.id.clone(),
            test_type,
            tester: String::new(),
            notes: String::new(),
            checklist: checklist_for(vehicle, test_type),
            pressure: None,
            flow_rate: None,
        }
    }

    pub fn set_item(&mut self, index: usize, passed: bool) -> Result<(), ValidationError> {
        let len = self.checklist.len();
        let item = self
            .checklist
            .get_mut(index)
            .ok_or(ValidationError::ChecklistIndex { index, len })?;
        item.passed = passed;
        Ok(())
    }

    pub fn all_passed(&self) -> bool {
        self.checklist.iter().all(|item| item.passed)
    }

    pub fn is_ready(&self) -> bool {
        !self.tester.trim().is_empty()
    }

    /// Clears the form after a submission, rebuilding the checklist from the catalog.
    pub fn reset(&mut self, vehicle: &Vehicle) {
        *self = Self::new(vehicle, self.test_type);
    }

    pub fn to_submission(&self) -> TestSubmission {
        TestSubmission {
            vehicle_id: self.vehicle_id.clone(),
            test_type: self.test_type,
            tester: self.tester.clone(),
            notes: Some(self.notes.clone()),
            checklist: self.checklist.clone(),
            pressure: self.pressure,
            flow_rate: self.flow_rate,
        }
    }
}
