use chrono::NaiveDate;

use super::checklist::{catalog_for, completed_checklist, matches_catalog, verdict};
use super::domain::{TestLogRecord, TestSubmission, TestType, Vehicle, VehicleId};

/// Tester recorded on quick logs when nobody is on the driver roster.
pub const QUICK_CHECK_TESTER: &str = "Quick Check";

/// Reasons a request is refused before the data store is contacted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("tester required")]
    TesterRequired,
    #[error("checklist is empty")]
    EmptyChecklist,
    #[error("checklist does not match the {test_type} catalog for vehicle {vehicle_id}")]
    ChecklistMismatch {
        vehicle_id: VehicleId,
        test_type: TestType,
    },
    #[error("vehicle {0} has no pump fitted")]
    PumpNotFitted(VehicleId),
    #[error("unknown vehicle {0}")]
    UnknownVehicle(VehicleId),
    #[error("driver name required")]
    DriverNameRequired,
    #[error("driver {0} is already on the roster")]
    DuplicateDriver(String),
    #[error("checklist has no item at position {index} (length {len})")]
    ChecklistIndex { index: usize, len: usize },
}

/// Checks a submission against its vehicle and turns it into a log record dated `today`.
pub fn prepare_record(
    vehicle: &Vehicle,
    submission: TestSubmission,
    today: NaiveDate,
) -> Result<TestLogRecord, ValidationError> {
    let TestSubmission {
        vehicle_id,
        test_type,
        tester,
        notes,
        checklist,
        pressure,
        flow_rate,
    } = submission;

    let tester = tester.trim();
    if tester.is_empty() {
        return Err(ValidationError::TesterRequired);
    }

    if vehicle_id != vehicle.id {
        return Err(ValidationError::UnknownVehicle(vehicle_id));
    }

    if test_type == TestType::Pump && !vehicle.has_pump {
        return Err(ValidationError::PumpNotFitted(vehicle_id));
    }

    if checklist.is_empty() {
        return Err(ValidationError::EmptyChecklist);
    }

    if !matches_catalog(&checklist, &catalog_for(vehicle, test_type)) {
        return Err(ValidationError::ChecklistMismatch {
            vehicle_id,
            test_type,
        });
    }

    let status = verdict(&checklist);
    let notes = notes
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty());

    Ok(TestLogRecord {
        vehicle_id,
        tester: tester.to_string(),
        test_type,
        test_date: today,
        notes,
        checklist_results: checklist,
        pressure,
        flow_rate,
        status,
    })
}

/// All-pass submission with a synthesized note, credited to `first_driver` when present.
pub fn quick_submission(
    vehicle: &Vehicle,
    test_type: TestType,
    first_driver: Option<&str>,
) -> TestSubmission {
    let notes = match test_type {
        TestType::Drive => format!("Quick check - all systems operational for {}", vehicle.name),
        TestType::Pump => format!(
            "Quick pump check - all systems operational for {}",
            vehicle.name
        ),
    };

    TestSubmission {
        vehicle_id: vehicle.id.clone(),
        test_type,
        tester: first_driver.unwrap_or(QUICK_CHECK_TESTER).to_string(),
        notes: Some(notes),
        checklist: completed_checklist(vehicle, test_type),
        pressure: None,
        flow_rate: None,
    }
}
