use super::common::*;
use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use crate::flows::FlowKind;
use crate::intake::router::{intake_router, session_handler};

async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

fn post(uri: &str) -> Request<Body> {
    Request::post(uri).body(Body::empty()).expect("request builds")
}

fn patch_json(uri: &str, payload: Value) -> Request<Body> {
    Request::patch(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .expect("request builds")
}

#[tokio::test]
async fn flows_route_lists_every_wizard() {
    let (service, _) = immediate_service();
    let response = intake_router(service)
        .oneshot(
            Request::get("/api/v1/flows")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let flows: Vec<&str> = payload
        .as_array()
        .expect("array payload")
        .iter()
        .filter_map(|entry| entry["flow"].as_str())
        .collect();
    assert_eq!(
        flows,
        vec!["family-visit", "professional-referral", "join-our-team"]
    );
}

#[tokio::test]
async fn open_route_creates_a_session_on_the_first_step() {
    let (service, _) = immediate_service();
    let response = intake_router(service)
        .oneshot(post("/api/v1/flows/family-visit/sessions"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = read_json_body(response).await;
    assert_eq!(payload["state"], json!("active"));
    assert_eq!(payload["step_index"], json!(0));
    assert_eq!(payload["step_count"], json!(3));
    assert_eq!(payload["progress"]["label"], json!("Step 1 of 3"));
    assert_eq!(payload["controls"]["back_enabled"], json!(false));
}

#[tokio::test]
async fn open_route_rejects_unknown_flows() {
    let (service, _) = immediate_service();
    let response = intake_router(service)
        .oneshot(post("/api/v1/flows/book-a-spa-day/sessions"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(response).await;
    assert!(payload["error"]
        .as_str()
        .expect("error message")
        .contains("book-a-spa-day"));
}

#[tokio::test]
async fn fields_route_rejects_answers_for_other_steps() {
    let (service, _) = immediate_service();
    let id = service.open(FlowKind::FamilyVisit).expect("opens").id;

    let response = intake_router(service)
        .oneshot(patch_json(
            &format!("/api/v1/sessions/{id}/fields"),
            json!({ "timePreference": "evening" }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn advance_route_reports_completion() {
    let (service, sink) = immediate_service();
    let id = service.open(FlowKind::JoinOurTeam).expect("opens").id;
    let router = intake_router(service);

    for expected in [json!("moved"), json!("moved"), json!("completed")] {
        let response = router
            .clone()
            .oneshot(post(&format!("/api/v1/sessions/{id}/advance")))
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json_body(response).await;
        assert_eq!(payload["event"], expected);
    }

    assert_eq!(sink.receipts().len(), 1);
}

#[tokio::test]
async fn updating_a_cancelled_session_conflicts() {
    let (service, _) = immediate_service();
    let id = service.open(FlowKind::ProfessionalReferral).expect("opens").id;
    service.cancel(&id).expect("cancel");

    let response = intake_router(service)
        .oneshot(patch_json(
            &format!("/api/v1/sessions/{id}/fields"),
            json!({ "caseManagerName": "Dr. Kay" }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn session_handler_returns_not_found_for_unknown_ids() {
    let (service, _) = immediate_service();

    let response = session_handler(State(service), Path(Uuid::new_v4())).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(response).await;
    assert_eq!(payload, json!({ "error": "session not found" }));
}

#[tokio::test]
async fn delete_route_tears_down_the_session() {
    let (service, _) = immediate_service();
    let id = service.open(FlowKind::FamilyVisit).expect("opens").id;
    let router = intake_router(service);

    let response = router
        .clone()
        .oneshot(
            Request::delete(format!("/api/v1/sessions/{id}"))
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = router
        .oneshot(
            Request::get(format!("/api/v1/sessions/{id}"))
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
