use std::sync::{Mutex, MutexGuard};

use chrono::{NaiveDate, Utc};

use super::domain::{format_calendar_date, Driver, TestLogEntry, TestLogRecord, Vehicle, VehicleId};
use super::repository::{FleetStore, StoreError};

/// Process-local store used by the demo service and tests.
#[derive(Debug, Default)]
pub struct InMemoryFleetStore {
    state: Mutex<MemoryState>,
}

#[derive(Debug, Default)]
struct MemoryState {
    vehicles: Vec<Vehicle>,
    drivers: Vec<Driver>,
    logs: Vec<TestLogEntry>,
    next_driver_id: u64,
    next_log_id: u64,
}

impl MemoryState {
    fn push_driver(&mut self, name: &str) -> Driver {
        self.next_driver_id += 1;
        let driver = Driver {
            id: self.next_driver_id,
            name: name.to_string(),
        };
        self.drivers.push(driver.clone());
        driver
    }

    fn push_log(&mut self, record: TestLogRecord) -> TestLogEntry {
        self.next_log_id += 1;
        let entry = TestLogEntry {
            id: self.next_log_id,
            record,
            created_at: Utc::now(),
        };
        self.logs.push(entry.clone());
        entry
    }

    fn vehicle_mut(&mut self, id: &VehicleId) -> Option<&mut Vehicle> {
        self.vehicles.iter_mut().find(|vehicle| vehicle.id == *id)
    }
}

impl InMemoryFleetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store with a roster; duplicate driver names are skipped.
    pub fn with_fleet<I, N>(vehicles: Vec<Vehicle>, driver_names: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: AsRef<str>,
    {
        let mut state = MemoryState {
            vehicles,
            ..MemoryState::default()
        };
        for name in driver_names {
            let name = name.as_ref().trim();
            if !name.is_empty() && !state.drivers.iter().any(|driver| driver.name == name) {
                state.push_driver(name);
            }
        }

        Self {
            state: Mutex::new(state),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryState>, StoreError> {
        self.state
            .lock()
            .map_err(|_| StoreError::Unavailable("in-memory store lock poisoned".to_string()))
    }
}

fn newest_first(logs: &mut [TestLogEntry]) {
    logs.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
}

impl FleetStore for InMemoryFleetStore {
    fn vehicles(&self) -> Result<Vec<Vehicle>, StoreError> {
        let mut vehicles = self.lock()?.vehicles.clone();
        // ascending with unparsable dates last, like the hosted store's NULLS LAST
        vehicles.sort_by_key(|vehicle| {
            let date = vehicle.last_tested_on();
            (date.is_none(), date)
        });
        Ok(vehicles)
    }

    fn vehicle(&self, id: &VehicleId) -> Result<Option<Vehicle>, StoreError> {
        let guard = self.lock()?;
        Ok(guard
            .vehicles
            .iter()
            .find(|vehicle| vehicle.id == *id)
            .cloned())
    }

    fn update_last_test_date(&self, id: &VehicleId, date: NaiveDate) -> Result<(), StoreError> {
        let mut guard = self.lock()?;
        let vehicle = guard.vehicle_mut(id).ok_or(StoreError::NotFound)?;
        vehicle.last_test_date = Some(format_calendar_date(date));
        Ok(())
    }

    fn drivers(&self) -> Result<Vec<Driver>, StoreError> {
        let mut drivers = self.lock()?.drivers.clone();
        drivers.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(drivers)
    }

    fn insert_driver(&self, name: &str) -> Result<Driver, StoreError> {
        let mut guard = self.lock()?;
        if guard.drivers.iter().any(|driver| driver.name == name) {
            return Err(StoreError::Conflict);
        }
        Ok(guard.push_driver(name))
    }

    fn test_logs(&self) -> Result<Vec<TestLogEntry>, StoreError> {
        let mut logs = self.lock()?.logs.clone();
        newest_first(&mut logs);
        Ok(logs)
    }

    fn test_logs_for(&self, id: &VehicleId) -> Result<Vec<TestLogEntry>, StoreError> {
        let mut logs: Vec<TestLogEntry> = self
            .lock()?
            .logs
            .iter()
            .filter(|entry| entry.vehicle_id() == id)
            .cloned()
            .collect();
        newest_first(&mut logs);
        Ok(logs)
    }

    fn insert_test_log(&self, record: TestLogRecord) -> Result<TestLogEntry, StoreError> {
        Ok(self.lock()?.push_log(record))
    }

    /// Both writes happen under one lock, so a log never lands without the date advance.
    fn record_test(&self, record: TestLogRecord) -> Result<TestLogEntry, StoreError> {
        let mut guard = self.lock()?;
        let test_date = record.test_date;
        let vehicle = guard
            .vehicle_mut(&record.vehicle_id)
            .ok_or(StoreError::NotFound)?;
        vehicle.last_test_date = Some(format_calendar_date(test_date));
        Ok(guard.push_log(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fleet::domain::{ChecklistItem, TestOutcome, TestType, VehicleCategory};

    fn boat() -> Vehicle {
        Vehicle {
            id: VehicleId::from("rescue-boat"),
            name: "Rescue Boat".to_string(),
            category: VehicleCategory::Marine,
            has_pump: false,
            last_test_date: Some("2025-07-01".to_string()),
        }
    }

    fn record(vehicle_id: &str, test_date: NaiveDate) -> TestLogRecord {
        TestLogRecord {
            vehicle_id: VehicleId::from(vehicle_id),
            tester: "Dana".to_string(),
            test_type: TestType::Drive,
            test_date,
            notes: None,
            checklist_results: vec![ChecklistItem::new("Radio communication works", true)],
            pressure: None,
            flow_rate: None,
            status: TestOutcome::Pass,
        }
    }

    #[test]
    fn record_test_writes_log_and_date_together() {
        let store = InMemoryFleetStore::with_fleet(vec![boat()], ["Dana"]);
        let date = NaiveDate::from_ymd_opt(2025, 7, 12).expect("valid date");

        let entry = store
            .record_test(record("rescue-boat", date))
            .expect("record succeeds");

        assert_eq!(entry.id, 1);
        let stored = store
            .vehicle(&VehicleId::from("rescue-boat"))
            .expect("fetch succeeds")
            .expect("vehicle present");
        assert_eq!(stored.last_test_date.as_deref(), Some("2025-07-12"));
        assert_eq!(store.test_logs().expect("logs load").len(), 1);
    }

    #[test]
    fn record_test_for_unknown_vehicle_writes_nothing() {
        let store = InMemoryFleetStore::with_fleet(vec![boat()], Vec::<String>::new());
        let date = NaiveDate::from_ymd_opt(2025, 7, 12).expect("valid date");

        let result = store.record_test(record("ghost", date));

        assert!(matches!(result, Err(StoreError::NotFound)));
        assert!(store.test_logs().expect("logs load").is_empty());
    }

    #[test]
    fn logs_come_back_newest_first() {
        let store = InMemoryFleetStore::with_fleet(vec![boat()], Vec::<String>::new());
        let date = NaiveDate::from_ymd_opt(2025, 7, 12).expect("valid date");
        for _ in 0..3 {
            store
                .insert_test_log(record("rescue-boat", date))
                .expect("insert succeeds");
        }

        let ids: Vec<u64> = store
            .test_logs_for(&VehicleId::from("rescue-boat"))
            .expect("logs load")
            .iter()
            .map(|entry| entry.id)
            .collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn duplicate_driver_names_conflict() {
        let store = InMemoryFleetStore::with_fleet(Vec::new(), ["Alice", "Alice", " "]);
        assert_eq!(store.drivers().expect("drivers load").len(), 1);
        assert!(matches!(
            store.insert_driver("Alice"),
            Err(StoreError::Conflict)
        ));
        store.insert_driver("alice").expect("case differs");
    }
}
