use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use super::cache::FleetSnapshot;
use super::domain::{Driver, TestLogEntry, TestSubmission, TestType, Vehicle, VehicleId};
use super::forms::TestForm;
use super::repository::{FleetStore, StoreError};
use super::views::{FleetDashboard, VehicleDetail};
use super::workflow::{prepare_record, quick_submission, ValidationError};

pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// Service composing the data store with a read-through snapshot of the fleet.
pub struct FleetLogService<S> {
    store: Arc<S>,
    snapshot: RwLock<FleetSnapshot>,
    history_limit: usize,
}

impl<S> FleetLogService<S>
where
    S: FleetStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            snapshot: RwLock::new(FleetSnapshot::default()),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }

    pub fn with_history_limit(mut self, history_limit: usize) -> Self {
        self.history_limit = history_limit;
        self
    }

    fn read(&self) -> RwLockReadGuard<'_, FleetSnapshot> {
        self.snapshot.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, FleetSnapshot> {
        self.snapshot.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Reloads vehicles, drivers and logs. On failure the previous snapshot is kept.
    pub fn load(&self) -> Result<(), FleetServiceError> {
        let mut snapshot = self.write();
        snapshot.reload(self.store.as_ref()).map_err(|err| {
            warn!(error = %err, "fleet reload failed, keeping previous snapshot");
            err
        })?;

        debug!(
            vehicles = snapshot.vehicles.len(),
            drivers = snapshot.drivers.len(),
            logs = snapshot.test_logs.len(),
            "fleet snapshot reloaded"
        );
        Ok(())
    }

    pub fn snapshot(&self) -> FleetSnapshot {
        self.read().clone()
    }

    pub fn dashboard(&self, today: NaiveDate) -> FleetDashboard {
        FleetDashboard::build(&self.read().vehicles, today)
    }

    pub fn vehicle_detail(
        &self,
        id: &VehicleId,
        today: NaiveDate,
    ) -> Result<VehicleDetail, FleetServiceError> {
        let vehicle = self.resolve_vehicle(id)?;
        let snapshot = self.read();
        let history = snapshot.history(id, self.history_limit);
        Ok(VehicleDetail::build(&vehicle, &history, today))
    }

    pub fn history(&self, id: &VehicleId) -> Vec<TestLogEntry> {
        self.read()
            .history(id, self.history_limit)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn drivers(&self) -> Vec<Driver> {
        self.read().drivers.clone()
    }

    /// Adds a driver after trimming. Names compare case-sensitively, so `alice` and `Alice`
    /// are different drivers; an exact repeat is rejected.
    pub fn add_driver(&self, name: &str) -> Result<Driver, FleetServiceError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::DriverNameRequired.into());
        }
        if self.read().has_driver(name) {
            return Err(ValidationError::DuplicateDriver(name.to_string()).into());
        }

        let driver = self.store.insert_driver(name).map_err(|err| match err {
            StoreError::Conflict => {
                FleetServiceError::from(ValidationError::DuplicateDriver(name.to_string()))
            }
            other => other.into(),
        })?;

        info!(driver = %driver.name, "driver added to roster");
        let mut snapshot = self.write();
        snapshot.drivers.push(driver.clone());
        snapshot.drivers.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(driver)
    }

    /// Blank form for `test_type`, built from the vehicle's catalog.
    pub fn new_form(
        &self,
        id: &VehicleId,
        test_type: TestType,
    ) -> Result<TestForm, FleetServiceError> {
        let vehicle = self.resolve_vehicle(id)?;
        if test_type == TestType::Pump && !vehicle.has_pump {
            return Err(ValidationError::PumpNotFitted(vehicle.id).into());
        }
        Ok(TestForm::new(&vehicle, test_type))
    }

    /// Validates and records a test, then refreshes only the affected vehicle and history.
    pub fn submit(
        &self,
        submission: TestSubmission,
        today: NaiveDate,
    ) -> Result<TestLogEntry, FleetServiceError> {
        if submission.tester.trim().is_empty() {
            return Err(ValidationError::TesterRequired.into());
        }

        let vehicle = self.resolve_vehicle(&submission.vehicle_id)?;
        let record = prepare_record(&vehicle, submission, today)?;

        let entry = match self.store.record_test(record) {
            Ok(entry) => entry,
            Err(err) => {
                warn!(vehicle = %vehicle.id, error = %err, "test log submission failed");
                if matches!(err, StoreError::PartialWrite { .. }) {
                    // the log exists in the store even though the vehicle date did not move
                    self.refresh_history_after_partial_write(&vehicle.id);
                }
                return Err(err.into());
            }
        };

        info!(
            vehicle = %vehicle.id,
            log_id = entry.id,
            test_type = %entry.record.test_type,
            status = entry.record.status.as_str(),
            "test log recorded"
        );

        self.refresh_after_write(&vehicle.id);
        Ok(entry)
    }

    /// Records an all-pass test credited to the first rostered driver.
    pub fn quick_log(
        &self,
        id: &VehicleId,
        test_type: TestType,
        today: NaiveDate,
    ) -> Result<TestLogEntry, FleetServiceError> {
        let vehicle = self.resolve_vehicle(id)?;
        let submission = {
            let snapshot = self.read();
            quick_submission(&vehicle, test_type, snapshot.first_driver())
        };
        self.submit(submission, today)
    }

    fn resolve_vehicle(&self, id: &VehicleId) -> Result<Vehicle, FleetServiceError> {
        if let Some(vehicle) = self.read().vehicle(id) {
            return Ok(vehicle.clone());
        }

        let vehicle = self
            .store
            .vehicle(id)?
            .ok_or_else(|| ValidationError::UnknownVehicle(id.clone()))?;
        self.write().vehicles.push(vehicle.clone());
        Ok(vehicle)
    }

    fn refresh_history_after_partial_write(&self, id: &VehicleId) {
        if let Err(err) = self.write().refresh_history(self.store.as_ref(), id) {
            warn!(vehicle = %id, error = %err, "history refresh after partial write failed");
        }
    }

    fn refresh_after_write(&self, id: &VehicleId) {
        let store = self.store.as_ref();
        let mut snapshot = self.write();
        let refreshed = match snapshot.refresh_vehicle(store, id) {
            Ok(()) => snapshot.refresh_history(store, id),
            Err(err) => Err(err),
        };

        // the write itself succeeded; a stale snapshot is corrected by the next reload
        if let Err(err) = refreshed {
            warn!(vehicle = %id, error = %err, "post-submission refresh failed");
        }
    }
}

/// Error raised by the fleet log service.
#[derive(Debug, thiserror::Error)]
pub enum FleetServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
