use super::common::*;
use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tower::ServiceExt;

use crate::fleet::checklist::checklist_for;
use crate::fleet::domain::{TestType, VehicleId};
use crate::fleet::memory::InMemoryFleetStore;
use crate::fleet::router::{fleet_router, reload_handler, submit_handler, TestSubmissionRequest};

fn router() -> axum::Router {
    let (service, _) = build_service(local_today(), &["Alice"]);
    fleet_router(Arc::new(service))
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

#[tokio::test]
async fn dashboard_lists_most_overdue_first() {
    let response = router()
        .oneshot(
            Request::get("/api/v1/fleet")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["vehicles"][0]["id"], "medic-1");
    assert_eq!(body["vehicles"][0]["state"], "needs-inspection");
    assert_eq!(body["vehicles"][0]["daysOverdue"], 13);
    assert_eq!(body["vehicles"][2]["statusLabel"], "OK");
    assert_eq!(body["summary"]["needsInspection"], 2);
}

#[tokio::test]
async fn detail_for_unknown_vehicle_is_not_found() {
    let response = router()
        .oneshot(
            Request::get("/api/v1/fleet/hovercraft")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn detail_includes_pump_checklist_for_pump_truck() {
    let response = router()
        .oneshot(
            Request::get("/api/v1/fleet/pump-truck")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["testTypes"], json!(["drive", "pump"]));
    assert_eq!(body["driveChecklist"].as_array().map(Vec::len), Some(8));
    assert_eq!(body["pumpChecklist"].as_array().map(Vec::len), Some(6));
    assert_eq!(body["driveChecklist"][7]["item"], "Emergency lights operational");
}

#[tokio::test]
async fn quick_log_route_creates_passing_entry() {
    let response = router()
        .oneshot(json_request(
            "POST",
            "/api/v1/fleet/rescue-boat/quick-log",
            json!({}),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json_body(response).await;
    assert_eq!(body["status"], "pass");
    assert_eq!(body["testType"], "drive");
    assert_eq!(body["tester"], "Alice");
    assert_eq!(body["vehicleId"], "rescue-boat");
}

#[tokio::test]
async fn submit_without_tester_is_unprocessable() {
    let (service, _) = build_service(local_today(), &["Alice"]);
    let service = Arc::new(service);
    let truck = service
        .snapshot()
        .vehicle(&VehicleId::from("pump-truck"))
        .cloned()
        .expect("truck loaded");

    let request = TestSubmissionRequest {
        test_type: TestType::Drive,
        tester: String::new(),
        notes: None,
        checklist: checklist_for(&truck, TestType::Drive),
        pressure: None,
        flow_rate: None,
    };

    let response = submit_handler(
        State(service.clone()),
        Path("pump-truck".to_string()),
        axum::Json(request),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json_body(response).await;
    assert_eq!(body["error"], "tester required");
    assert!(service.history(&truck.id).is_empty());
}

#[tokio::test]
async fn duplicate_driver_conflicts() {
    let router = router();

    let created = router
        .clone()
        .oneshot(json_request("POST", "/api/v1/drivers", json!({ "name": "alice" })))
        .await
        .expect("router responds");
    assert_eq!(created.status(), StatusCode::CREATED);

    let duplicate = router
        .oneshot(json_request("POST", "/api/v1/drivers", json!({ "name": " Alice " })))
        .await
        .expect("router responds");
    assert_eq!(duplicate.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn reload_failure_reports_unavailable() {
    let (service, store) = scripted_service(local_today());
    store.fail_reads.store(true, Ordering::SeqCst);

    let response = reload_handler(State(Arc::new(service))).await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn empty_store_serves_empty_dashboard() {
    let service = crate::fleet::service::FleetLogService::new(Arc::new(InMemoryFleetStore::new()));
    let response = fleet_router(Arc::new(service))
        .oneshot(
            Request::post("/api/v1/fleet/reload")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["vehicles"], json!([]));
}
