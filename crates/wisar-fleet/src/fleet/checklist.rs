use super::domain::{ChecklistItem, TestOutcome, TestType, Vehicle, VehicleCategory};

pub const DRIVE_CHECKLIST: [&str; 7] = [
    "Engine starts properly",
    "Brakes function correctly",
    "Steering responsive",
    "Warning lights check",
    "Fluid levels adequate",
    TIRES_ITEM,
    "Headlights operational",
];

pub const PUMP_CHECKLIST: [&str; 6] = [
    "Pump primes properly",
    "Pressure gauge accurate",
    "Water flow consistent",
    "No leaks detected",
    "Engine RPM stable",
    "Discharge pressure adequate",
];

pub const TIRES_ITEM: &str = "Tires in good condition";
pub const EMERGENCY_LIGHTS_ITEM: &str = "Emergency lights operational";
pub const MARINE_LIGHTS_ITEM: &str = "Special marine lights operational";
pub const RADIO_ITEM: &str = "Radio communication works";

/// Drive-checklist variant, resolved from the vehicle's declared category and pump capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChecklistVariant {
    Standard,
    PumpTruck,
    RescueBoat,
}

impl ChecklistVariant {
    pub fn for_vehicle(vehicle: &Vehicle) -> Self {
        match vehicle.category {
            VehicleCategory::Marine => Self::RescueBoat,
            VehicleCategory::Fire if vehicle.has_pump => Self::PumpTruck,
            _ => Self::Standard,
        }
    }
}

pub fn base_checklist(test_type: TestType) -> &'static [&'static str] {
    match test_type {
        TestType::Drive => &DRIVE_CHECKLIST,
        TestType::Pump => &PUMP_CHECKLIST,
    }
}

/// Ordered item labels a vehicle must be inspected against for `test_type`.
pub fn catalog_for(vehicle: &Vehicle, test_type: TestType) -> Vec<&'static str> {
    let mut catalog = base_checklist(test_type).to_vec();
    if test_type == TestType::Pump {
        return catalog;
    }

    match ChecklistVariant::for_vehicle(vehicle) {
        ChecklistVariant::Standard => {}
        ChecklistVariant::PumpTruck => catalog.push(EMERGENCY_LIGHTS_ITEM),
        ChecklistVariant::RescueBoat => {
            catalog.retain(|item| *item != TIRES_ITEM);
            catalog.push(MARINE_LIGHTS_ITEM);
            catalog.push(RADIO_ITEM);
        }
    }

    catalog
}

/// Fresh checklist with every item unchecked.
pub fn checklist_for(vehicle: &Vehicle, test_type: TestType) -> Vec<ChecklistItem> {
    catalog_for(vehicle, test_type)
        .into_iter()
        .map(|label| ChecklistItem::new(label, false))
        .collect()
}

/// Checklist with every item marked passed, as used by quick logs.
pub fn completed_checklist(vehicle: &Vehicle, test_type: TestType) -> Vec<ChecklistItem> {
    catalog_for(vehicle, test_type)
        .into_iter()
        .map(|label| ChecklistItem::new(label, true))
        .collect()
}

/// `Pass` only when there is at least one item and all of them passed.
pub fn verdict(checklist: &[ChecklistItem]) -> TestOutcome {
    if !checklist.is_empty() && checklist.iter().all(|item| item.passed) {
        TestOutcome::Pass
    } else {
        TestOutcome::Fail
    }
}

pub fn matches_catalog(checklist: &[ChecklistItem], catalog: &[&str]) -> bool {
    checklist.len() == catalog.len()
        && checklist
            .iter()
            .zip(catalog)
            .all(|(item, expected)| item.label == *expected)
}
