use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use axum::response::Response;
use chrono::{Duration, Local, NaiveDate};
use serde_json::Value;

use crate::fleet::domain::{
    format_calendar_date, Driver, TestLogEntry, TestLogRecord, Vehicle, VehicleCategory,
    VehicleId,
};
use crate::fleet::memory::InMemoryFleetStore;
use crate::fleet::repository::{FleetStore, StoreError};
use crate::fleet::service::FleetLogService;

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 7, 15).expect("valid date")
}

pub(super) fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

pub(super) fn vehicle(
    id: &str,
    category: VehicleCategory,
    has_pump: bool,
    tested_on: NaiveDate,
) -> Vehicle {
    Vehicle {
        id: VehicleId::from(id),
        name: id.replace('-', " ").to_uppercase(),
        category,
        has_pump,
        last_test_date: Some(format_calendar_date(tested_on)),
    }
}

/// Pump truck 10 days out, rescue boat 3 days out, ambulance 20 days out, relative to `base`.
pub(super) fn fleet(base: NaiveDate) -> Vec<Vehicle> {
    vec![
        vehicle(
            "pump-truck",
            VehicleCategory::Fire,
            true,
            base - Duration::days(10),
        ),
        vehicle(
            "rescue-boat",
            VehicleCategory::Marine,
            false,
            base - Duration::days(3),
        ),
        vehicle(
            "medic-1",
            VehicleCategory::Ambulance,
            false,
            base - Duration::days(20),
        ),
    ]
}

pub(super) fn build_service(
    base: NaiveDate,
    drivers: &[&str],
) -> (FleetLogService<InMemoryFleetStore>, Arc<InMemoryFleetStore>) {
    let store = Arc::new(InMemoryFleetStore::with_fleet(
        fleet(base),
        drivers.iter().copied(),
    ));
    let service = FleetLogService::new(store.clone());
    service.load().expect("initial load succeeds");
    (service, store)
}

/// Delegates to an in-memory store but can be told to fail reads or vehicle updates, and
/// counts every call. Keeps the trait's default two-step `record_test`.
#[derive(Default)]
pub(super) struct ScriptedStore {
    pub(super) inner: InMemoryFleetStore,
    pub(super) fail_reads: AtomicBool,
    pub(super) fail_updates: AtomicBool,
    pub(super) calls: AtomicUsize,
}

impl ScriptedStore {
    pub(super) fn new(inner: InMemoryFleetStore) -> Self {
        Self {
            inner,
            ..Self::default()
        }
    }

    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn touch(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    fn check_reads(&self) -> Result<(), StoreError> {
        self.touch();
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("connection reset".to_string()));
        }
        Ok(())
    }
}

impl FleetStore for ScriptedStore {
    fn vehicles(&self) -> Result<Vec<Vehicle>, StoreError> {
        self.check_reads()?;
        self.inner.vehicles()
    }

    fn vehicle(&self, id: &VehicleId) -> Result<Option<Vehicle>, StoreError> {
        self.check_reads()?;
        self.inner.vehicle(id)
    }

    fn update_last_test_date(&self, id: &VehicleId, date: NaiveDate) -> Result<(), StoreError> {
        self.touch();
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("update timed out".to_string()));
        }
        self.inner.update_last_test_date(id, date)
    }

    fn drivers(&self) -> Result<Vec<Driver>, StoreError> {
        self.check_reads()?;
        self.inner.drivers()
    }

    fn insert_driver(&self, name: &str) -> Result<Driver, StoreError> {
        self.touch();
        self.inner.insert_driver(name)
    }

    fn test_logs(&self) -> Result<Vec<TestLogEntry>, StoreError> {
        self.check_reads()?;
        self.inner.test_logs()
    }

    fn test_logs_for(&self, id: &VehicleId) -> Result<Vec<TestLogEntry>, StoreError> {
        self.check_reads()?;
        self.inner.test_logs_for(id)
    }

    fn insert_test_log(&self, record: TestLogRecord) -> Result<TestLogEntry, StoreError> {
        self.touch();
        self.inner.insert_test_log(record)
    }
}

pub(super) fn scripted_service(
    base: NaiveDate,
) -> (FleetLogService<ScriptedStore>, Arc<ScriptedStore>) {
    let store = Arc::new(ScriptedStore::new(InMemoryFleetStore::with_fleet(
        fleet(base),
        ["Alice"],
    )));
    let service = FleetLogService::new(store.clone());
    service.load().expect("initial load succeeds");
    (service, store)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
