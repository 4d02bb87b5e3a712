use chrono::{Duration, NaiveDate};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::{info, warn};
use wisar_fleet::error::AppError;
use wisar_fleet::fleet::domain::format_calendar_date;
use wisar_fleet::fleet::{InMemoryFleetStore, RosterImporter, Vehicle, VehicleCategory, VehicleId};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

const DEMO_DRIVERS: [&str; 3] = ["Alice Moreno", "Ben Okafor", "Casey Lund"];

/// Seed fleet used when no roster export is configured. Dates are relative to `today` so the
/// dashboard always shows a mix of states.
pub(crate) fn demo_fleet(today: NaiveDate) -> Vec<Vehicle> {
    let tested = |days_ago: i64| Some(format_calendar_date(today - Duration::days(days_ago)));
    vec![
        Vehicle {
            id: VehicleId::from("engine-1"),
            name: "Engine 1".to_string(),
            category: VehicleCategory::Fire,
            has_pump: true,
            last_test_date: tested(10),
        },
        Vehicle {
            id: VehicleId::from("rescue-boat"),
            name: "Rescue Boat".to_string(),
            category: VehicleCategory::Marine,
            has_pump: false,
            last_test_date: tested(3),
        },
        Vehicle {
            id: VehicleId::from("medic-1"),
            name: "Medic 1".to_string(),
            category: VehicleCategory::Ambulance,
            has_pump: false,
            last_test_date: tested(21),
        },
        Vehicle {
            id: VehicleId::from("utility-4x4"),
            name: "Utility 4x4".to_string(),
            category: VehicleCategory::General,
            has_pump: false,
            last_test_date: None,
        },
    ]
}

/// Builds the in-process store from roster exports, falling back to the demo fleet.
pub(crate) fn build_store(
    roster: Option<&Path>,
    drivers: Option<&Path>,
    today: NaiveDate,
) -> Result<InMemoryFleetStore, AppError> {
    let vehicles = match roster {
        Some(path) => {
            let vehicles = RosterImporter::vehicles_from_path(path)?;
            info!(path = %path.display(), vehicles = vehicles.len(), "vehicle roster imported");
            vehicles
        }
        None => {
            warn!("no vehicle roster configured, seeding demo fleet");
            demo_fleet(today)
        }
    };

    let driver_names = match drivers {
        Some(path) => RosterImporter::drivers_from_path(path)?,
        None if roster.is_none() => DEMO_DRIVERS.iter().map(|name| name.to_string()).collect(),
        None => Vec::new(),
    };

    Ok(InMemoryFleetStore::with_fleet(vehicles, driver_names))
}
