use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Local;
use serde::Deserialize;
use serde_json::json;

use super::domain::{ChecklistItem, TestSubmission, TestType, VehicleId};
use super::repository::FleetStore;
use super::service::{FleetLogService, FleetServiceError};
use super::workflow::ValidationError;

/// Router builder exposing the fleet dashboard, test submission and driver roster.
pub fn fleet_router<S>(service: Arc<FleetLogService<S>>) -> Router
where
    S: FleetStore + 'static,
{
    Router::new()
        .route("/api/v1/fleet", get(dashboard_handler::<S>))
        .route("/api/v1/fleet/reload", post(reload_handler::<S>))
        .route("/api/v1/fleet/:vehicle_id", get(detail_handler::<S>))
        .route(
            "/api/v1/fleet/:vehicle_id/tests",
            post(submit_handler::<S>),
        )
        .route(
            "/api/v1/fleet/:vehicle_id/quick-log",
            post(quick_log_handler::<S>),
        )
        .route(
            "/api/v1/drivers",
            get(drivers_handler::<S>).post(add_driver_handler::<S>),
        )
        .with_state(service)
}

/// Test submission body; the vehicle comes from the path.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TestSubmissionRequest {
    pub(crate) test_type: TestType,
    #[serde(default)]
    pub(crate) tester: String,
    #[serde(default)]
    pub(crate) notes: Option<String>,
    pub(crate) checklist: Vec<ChecklistItem>,
    #[serde(default)]
    pub(crate) pressure: Option<f64>,
    #[serde(default)]
    pub(crate) flow_rate: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QuickLogRequest {
    #[serde(default = "default_test_type")]
    pub(crate) test_type: TestType,
}

fn default_test_type() -> TestType {
    TestType::Drive
}

#[derive(Debug, Deserialize)]
pub(crate) struct NewDriverRequest {
    pub(crate) name: String,
}

fn error_response(error: FleetServiceError) -> Response {
    let status = match &error {
        FleetServiceError::Validation(ValidationError::UnknownVehicle(_)) => StatusCode::NOT_FOUND,
        FleetServiceError::Validation(ValidationError::DuplicateDriver(_)) => StatusCode::CONFLICT,
        FleetServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        FleetServiceError::Store(_) => StatusCode::SERVICE_UNAVAILABLE,
    };

    let payload = json!({
        "error": error.to_string(),
    });
    (status, Json(payload)).into_response()
}

pub(crate) async fn dashboard_handler<S>(State(service): State<Arc<FleetLogService<S>>>) -> Response
where
    S: FleetStore + 'static,
{
    let today = Local::now().date_naive();
    (StatusCode::OK, Json(service.dashboard(today))).into_response()
}

pub(crate) async fn reload_handler<S>(State(service): State<Arc<FleetLogService<S>>>) -> Response
where
    S: FleetStore + 'static,
{
    match service.load() {
        Ok(()) => {
            let today = Local::now().date_naive();
            (StatusCode::OK, Json(service.dashboard(today))).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn detail_handler<S>(
    State(service): State<Arc<FleetLogService<S>>>,
    Path(vehicle_id): Path<String>,
) -> Response
where
    S: FleetStore + 'static,
{
    let today = Local::now().date_naive();
    match service.vehicle_detail(&VehicleId(vehicle_id), today) {
        Ok(detail) => (StatusCode::OK, Json(detail)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn submit_handler<S>(
    State(service): State<Arc<FleetLogService<S>>>,
    Path(vehicle_id): Path<String>,
    Json(request): Json<TestSubmissionRequest>,
) -> Response
where
    S: FleetStore + 'static,
{
    let submission = TestSubmission {
        vehicle_id: VehicleId(vehicle_id),
        test_type: request.test_type,
        tester: request.tester,
        notes: request.notes,
        checklist: request.checklist,
        pressure: request.pressure,
        flow_rate: request.flow_rate,
    };

    let today = Local::now().date_naive();
    match service.submit(submission, today) {
        Ok(entry) => (StatusCode::CREATED, Json(entry)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn quick_log_handler<S>(
    State(service): State<Arc<FleetLogService<S>>>,
    Path(vehicle_id): Path<String>,
    Json(request): Json<QuickLogRequest>,
) -> Response
where
    S: FleetStore + 'static,
{
    let today = Local::now().date_naive();
    match service.quick_log(&VehicleId(vehicle_id), request.test_type, today) {
        Ok(entry) => (StatusCode::CREATED, Json(entry)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn drivers_handler<S>(State(service): State<Arc<FleetLogService<S>>>) -> Response
where
    S: FleetStore + 'static,
{
    (StatusCode::OK, Json(service.drivers())).into_response()
}

pub(crate) async fn add_driver_handler<S>(
    State(service): State<Arc<FleetLogService<S>>>,
    Json(request): Json<NewDriverRequest>,
) -> Response
where
    S: FleetStore + 'static,
{
    match service.add_driver(&request.name) {
        Ok(driver) => (StatusCode::CREATED, Json(driver)).into_response(),
        Err(error) => error_response(error),
    }
}
