use chrono::NaiveDate;

use super::domain::{Driver, TestLogEntry, TestLogRecord, Vehicle, VehicleId};

/// Access to the hosted `vehicles`, `drivers` and `testLogs` collections.
pub trait FleetStore: Send + Sync {
    /// All vehicles, ordered by last test date ascending.
    fn vehicles(&self) -> Result<Vec<Vehicle>, StoreError>;
    fn vehicle(&self, id: &VehicleId) -> Result<Option<Vehicle>, StoreError>;
    fn update_last_test_date(&self, id: &VehicleId, date: NaiveDate) -> Result<(), StoreError>;

    /// All drivers, ordered by name.
    fn drivers(&self) -> Result<Vec<Driver>, StoreError>;
    fn insert_driver(&self, name: &str) -> Result<Driver, StoreError>;

    /// All test logs, newest first.
    fn test_logs(&self) -> Result<Vec<TestLogEntry>, StoreError>;
    /// Test logs for one vehicle, newest first.
    fn test_logs_for(&self, id: &VehicleId) -> Result<Vec<TestLogEntry>, StoreError>;
    fn insert_test_log(&self, record: TestLogRecord) -> Result<TestLogEntry, StoreError>;

    /// Inserts the log and advances the vehicle's last test date to the log's test date.
    ///
    /// The default issues two independent writes. If the second one fails the log stays
    /// recorded and [`StoreError::PartialWrite`] is returned. Stores that can cover both
    /// writes in one transaction should override this.
    fn record_test(&self, record: TestLogRecord) -> Result<TestLogEntry, StoreError> {
        let vehicle_id = record.vehicle_id.clone();
        let test_date = record.test_date;
        let entry = self.insert_test_log(record)?;

        self.update_last_test_date(&vehicle_id, test_date)
            .map_err(|source| StoreError::PartialWrite {
                log_id: entry.id,
                source: Box::new(source),
            })?;

        Ok(entry)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,
    #[error("record already exists")]
    Conflict,
    #[error("data store unavailable: {0}")]
    Unavailable(String),
    #[error("test log {log_id} was recorded but the vehicle update failed: {source}")]
    PartialWrite {
        log_id: u64,
        #[source]
        source: Box<StoreError>,
    },
}
