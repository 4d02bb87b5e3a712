use serde::Serialize;

use super::domain::{Driver, TestLogEntry, Vehicle, VehicleId};
use super::repository::{FleetStore, StoreError};

/// Last successfully loaded view of the three collections.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetSnapshot {
    pub vehicles: Vec<Vehicle>,
    pub drivers: Vec<Driver>,
    pub test_logs: Vec<TestLogEntry>,
}

impl FleetSnapshot {
    pub fn load<S: FleetStore + ?Sized>(store: &S) -> Result<Self, StoreError> {
        Ok(Self {
            vehicles: store.vehicles()?,
            drivers: store.drivers()?,
            test_logs: store.test_logs()?,
        })
    }

    /// Replaces the snapshot only when every collection loaded.
    pub fn reload<S: FleetStore + ?Sized>(&mut self, store: &S) -> Result<(), StoreError> {
        *self = Self::load(store)?;
        Ok(())
    }

    /// Re-reads a single vehicle, dropping it from the snapshot if the store no longer has it.
    pub fn refresh_vehicle<S: FleetStore + ?Sized>(
        &mut self,
        store: &S,
        id: &VehicleId,
    ) -> Result<(), StoreError> {
        let fresh = store.vehicle(id)?;
        let position = self.vehicles.iter().position(|vehicle| vehicle.id == *id);

        match (fresh, position) {
            (Some(vehicle), Some(index)) => self.vehicles[index] = vehicle,
            (Some(vehicle), None) => self.vehicles.push(vehicle),
            (None, Some(index)) => {
                self.vehicles.remove(index);
            }
            (None, None) => {}
        }

        Ok(())
    }

    /// Re-reads one vehicle's logs and merges them back in newest-first order.
    pub fn refresh_history<S: FleetStore + ?Sized>(
        &mut self,
        store: &S,
        id: &VehicleId,
    ) -> Result<(), StoreError> {
        let fresh = store.test_logs_for(id)?;
        self.test_logs.retain(|entry| entry.vehicle_id() != id);
        self.test_logs.extend(fresh);
        self.test_logs
            .sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(())
    }

    pub fn vehicle(&self, id: &VehicleId) -> Option<&Vehicle> {
        self.vehicles.iter().find(|vehicle| vehicle.id == *id)
    }

    pub fn history(&self, id: &VehicleId, limit: usize) -> Vec<&TestLogEntry> {
        self.test_logs
            .iter()
            .filter(|entry| entry.vehicle_id() == id)
            .take(limit)
            .collect()
    }

    pub fn has_driver(&self, name: &str) -> bool {
        self.drivers.iter().any(|driver| driver.name == name)
    }

    pub fn first_driver(&self) -> Option<&str> {
        self.drivers.first().map(|driver| driver.name.as_str())
    }
}
