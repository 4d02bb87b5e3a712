use super::domain::Vehicle;
use super::status::{evaluate, InspectionState};
use chrono::NaiveDate;
use serde::Serialize;
use std::cmp::Reverse;

/// Sort key: every overdue vehicle (most overdue first) ahead of everything else, which is
/// ordered by oldest test first. `None` dates order before any real date, so vehicles with an
/// indeterminate status lead the non-overdue group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum RankKey {
    Overdue(Reverse<u32>),
    Current(Option<NaiveDate>),
}

fn rank_key(vehicle: &Vehicle, today: NaiveDate) -> RankKey {
    let status = evaluate(Some(vehicle), today);
    if status.needs_inspection() {
        RankKey::Overdue(Reverse(status.days_overdue))
    } else {
        RankKey::Current(vehicle.last_tested_on())
    }
}

/// Returns the fleet in display order without touching `vehicles`. Equal keys keep their
/// input order.
pub fn rank(vehicles: &[Vehicle], today: NaiveDate) -> Vec<Vehicle> {
    let mut ranked = vehicles.to_vec();
    ranked.sort_by_cached_key(|vehicle| rank_key(vehicle, today));
    ranked
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetSummary {
    pub operational: usize,
    pub needs_inspection: usize,
    pub unknown: usize,
}

impl FleetSummary {
    pub fn total(&self) -> usize {
        self.operational + self.needs_inspection + self.unknown
    }
}

pub fn summarize(vehicles: &[Vehicle], today: NaiveDate) -> FleetSummary {
    vehicles
        .iter()
        .fold(FleetSummary::default(), |mut summary, vehicle| {
            match evaluate(Some(vehicle), today).state {
                InspectionState::Operational => summary.operational += 1,
                InspectionState::NeedsInspection => summary.needs_inspection += 1,
                InspectionState::Unknown => summary.unknown += 1,
            }
            summary
        })
}
