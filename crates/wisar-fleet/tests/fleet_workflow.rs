use chrono::NaiveDate;
use std::io::Cursor;
use std::sync::Arc;
use wisar_fleet::fleet::{
    checklist_for, evaluate, rank, FleetLogService, FleetServiceError, InMemoryFleetStore,
    InspectionState, RosterImporter, TestOutcome, TestType, ValidationError, Vehicle,
    VehicleCategory, VehicleId, VehicleStatus,
};

const ROSTER: &str = "id,name,type,has_pump,last_test\n\
pump-truck,Engine 1,fire,true,2025-07-05\n\
rescue-boat,Rescue Boat,marine,false,2025-07-12\n\
medic-1,Medic 1,ambulance,false,2025-06-25\n\
utility,Utility Pickup,,false,not recorded\n";

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 7, 15).expect("valid date")
}

fn roster() -> Vec<Vehicle> {
    RosterImporter::vehicles_from_reader(Cursor::new(ROSTER)).expect("roster parses")
}

fn service(drivers: &[&str]) -> FleetLogService<InMemoryFleetStore> {
    let store = Arc::new(InMemoryFleetStore::with_fleet(
        roster(),
        drivers.iter().copied(),
    ));
    let service = FleetLogService::new(store);
    service.load().expect("fleet loads");
    service
}

#[test]
fn imported_roster_ranks_by_urgency() {
    let ranked = rank(&roster(), today());
    let order: Vec<&str> = ranked.iter().map(|vehicle| vehicle.id.0.as_str()).collect();

    // medic-1 is 13 days overdue, pump-truck 3, utility has no usable date
    assert_eq!(order, vec!["medic-1", "pump-truck", "utility", "rescue-boat"]);

    let utility = ranked
        .iter()
        .find(|vehicle| vehicle.id == VehicleId::from("utility"))
        .expect("utility imported");
    assert_eq!(evaluate(Some(utility), today()).state, InspectionState::Unknown);
}

#[test]
fn variant_checklists_follow_category_and_pump() {
    let vehicles = roster();
    let by_id = |id: &str| {
        vehicles
            .iter()
            .find(|vehicle| vehicle.id.0 == id)
            .expect("vehicle imported")
    };

    let boat = checklist_for(by_id("rescue-boat"), TestType::Drive);
    assert_eq!(boat.len(), 8);
    assert!(boat.iter().all(|item| item.label != "Tires in good condition"));

    let engine = checklist_for(by_id("pump-truck"), TestType::Drive);
    assert_eq!(engine.len(), 8);
    assert_eq!(engine[7].label, "Emergency lights operational");

    let medic = checklist_for(by_id("medic-1"), TestType::Drive);
    assert_eq!(medic.len(), 7);
}

#[test]
fn overdue_vehicle_recovers_after_quick_log() {
    let service = service(&["Alice"]);
    let id = VehicleId::from("pump-truck");

    assert_eq!(
        evaluate(service.snapshot().vehicle(&id), today()),
        VehicleStatus::overdue(3)
    );

    let entry = service
        .quick_log(&id, TestType::Drive, today())
        .expect("quick log recorded");
    assert_eq!(entry.record.status, TestOutcome::Pass);

    assert_eq!(
        evaluate(service.snapshot().vehicle(&id), today()),
        VehicleStatus::OPERATIONAL
    );
    let dashboard = service.dashboard(today());
    assert_eq!(dashboard.summary.needs_inspection, 1);
}

#[test]
fn drivers_differing_only_in_case_are_both_kept() {
    let service = service(&["Alice"]);

    service.add_driver("alice").expect("lowercase alice accepted");
    let names: Vec<String> = service
        .drivers()
        .into_iter()
        .map(|driver| driver.name)
        .collect();
    assert_eq!(names, vec!["Alice".to_string(), "alice".to_string()]);

    assert!(matches!(
        service.add_driver("alice"),
        Err(FleetServiceError::Validation(ValidationError::DuplicateDriver(_)))
    ));
}

#[test]
fn unknown_category_is_standard_drive_test() {
    let service = service(&[]);
    let form = service
        .new_form(&VehicleId::from("utility"), TestType::Drive)
        .expect("form builds");

    assert_eq!(form.checklist.len(), 7);
    assert!(roster()
        .iter()
        .any(|vehicle| vehicle.category == VehicleCategory::General));
}
