//! Vehicle inspection tracking: checklists, overdue status, fleet ranking and the test
//! submission workflow, plus the store seam and HTTP router built on top of them.

pub mod cache;
pub mod checklist;
pub mod domain;
pub mod forms;
pub mod memory;
pub mod ranking;
pub mod repository;
pub mod roster;
pub mod router;
pub mod service;
pub mod status;
pub mod views;
pub mod workflow;

#[cfg(test)]
mod tests;

pub use cache::FleetSnapshot;
pub use checklist::{base_checklist, checklist_for, verdict, ChecklistVariant};
pub use domain::{
    ChecklistItem, Driver, TestLogEntry, TestLogRecord, TestOutcome, TestSubmission, TestType,
    Vehicle, VehicleCategory, VehicleId,
};
pub use forms::{DetailTab, FleetViewState, TestForm};
pub use memory::InMemoryFleetStore;
pub use ranking::{rank, summarize, FleetSummary};
pub use repository::{FleetStore, StoreError};
pub use roster::{RosterImportError, RosterImporter};
pub use router::fleet_router;
pub use service::{FleetLogService, FleetServiceError};
pub use status::{evaluate, InspectionState, VehicleStatus, INSPECTION_INTERVAL_DAYS};
pub use views::{FleetDashboard, TestLogView, VehicleDetail, VehicleStatusView};
pub use workflow::{ValidationError, QUICK_CHECK_TESTER};
