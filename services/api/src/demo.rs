use crate::infra::build_store;
use chrono::{Local, NaiveDate};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use wisar_fleet::error::AppError;
use wisar_fleet::fleet::{
    FleetDashboard, FleetLogService, InMemoryFleetStore, InspectionState, TestType,
};

#[derive(Args, Debug, Default)]
pub(crate) struct FleetStatusArgs {
    /// Vehicle roster CSV (id,name,type,has_pump,last_test). Defaults to the demo fleet.
    #[arg(long)]
    pub(crate) roster: Option<PathBuf>,
    /// Driver roster CSV with a single name column
    #[arg(long)]
    pub(crate) drivers: Option<PathBuf>,
    /// Evaluation date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Evaluation date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

pub(crate) fn run_fleet_status(args: FleetStatusArgs) -> Result<(), AppError> {
    let FleetStatusArgs {
        roster,
        drivers,
        today,
    } = args;

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let service = load_service(build_store(roster.as_deref(), drivers.as_deref(), today)?)?;

    render_dashboard(&service.dashboard(today));
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let service = load_service(build_store(None, None, today)?)?;

    println!("WISAR fleet log demo");
    render_dashboard(&service.dashboard(today));

    let dashboard = service.dashboard(today);
    let Some(target) = dashboard
        .vehicles
        .iter()
        .find(|vehicle| vehicle.state == InspectionState::NeedsInspection)
    else {
        println!("\nNo overdue vehicles; nothing to log.");
        return Ok(());
    };
    let target_id = target.id.clone();

    println!("\nQuick check for {} ({})", target.name, target.status_label);
    match service.quick_log(&target_id, TestType::Drive, today) {
        Ok(entry) => {
            println!(
                "  Logged {} by {} on {}: {}",
                entry.record.test_type.label(),
                entry.record.tester,
                entry.record.test_date,
                entry.record.status.as_str()
            );
            if let Some(notes) = &entry.record.notes {
                println!("  Notes: {}", notes);
            }
        }
        Err(err) => {
            println!("  Quick check rejected: {}", err);
            return Ok(());
        }
    }

    match service.vehicle_detail(&target_id, today) {
        Ok(detail) => {
            println!(
                "  Status now {} ({} log entries on record)",
                detail.vehicle.status_label,
                detail.history.len()
            );
        }
        Err(err) => println!("  Vehicle detail unavailable: {}", err),
    }

    println!();
    render_dashboard(&service.dashboard(today));
    Ok(())
}

fn load_service(
    store: InMemoryFleetStore,
) -> Result<FleetLogService<InMemoryFleetStore>, AppError> {
    let service = FleetLogService::new(Arc::new(store));
    service.load()?;
    Ok(service)
}

fn render_dashboard(dashboard: &FleetDashboard) {
    println!("Fleet status (evaluated {})", dashboard.evaluated_on);

    for vehicle in &dashboard.vehicles {
        let last_test = vehicle.last_test_date.as_deref().unwrap_or("never");
        let pump = if vehicle.has_pump { ", pump" } else { "" };
        println!(
            "- [{}] {} ({}{}), last tested {}",
            vehicle.status_label, vehicle.name, vehicle.category_label, pump, last_test
        );
    }

    let summary = &dashboard.summary;
    println!(
        "\n{} vehicles: {} operational, {} need inspection, {} unknown",
        summary.total(),
        summary.operational,
        summary.needs_inspection,
        summary.unknown
    );
}
