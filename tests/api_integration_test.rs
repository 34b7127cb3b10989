use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use mechanic_match::api::handlers::{InboxResponse, RejectedResponse, RequestDetailResponse, SubmitResponse};
use mechanic_match::api::{self, AppState};
use mechanic_match::{builtin_roster, MatcherService, RequestStore};
use std::sync::Arc;
use tower::ServiceExt;

fn test_app() -> Router {
    let state = AppState {
        matcher: Arc::new(MatcherService::new(builtin_roster(), 3)),
        store: Arc::new(RequestStore::new()),
    };
    api::router(state)
}

fn submit_body() -> String {
    serde_json::json!({
        "location": { "county": "Meath", "city": "Kells" },
        "vehicle": { "make": "Toyota", "model": "Corolla", "year": "2015" },
        "category": "brakes",
        "description": "Grinding noise when braking",
        "phone": "089 219 3220"
    })
    .to_string()
}

fn post_request(body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/requests")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

#[tokio::test]
async fn health_returns_ok() {
    let app = test_app();
    let response = app.oneshot(get_request("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, b"OK");
}

#[tokio::test]
async fn submit_returns_ranked_top_matches() {
    let app = test_app();
    let response = app.oneshot(post_request(submit_body())).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let parsed: SubmitResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert!(parsed.success);
    assert!(parsed.request_id.starts_with("r-"));
    assert_eq!(parsed.matches.len(), 3);
    assert_eq!(parsed.stats.roster_size, 4);
    assert_eq!(parsed.stats.returned, 3);
    assert_eq!(parsed.stats.top_score, Some(parsed.matches[0].score));
    for pair in parsed.matches.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
    // 两家 Meath 车行在县加成下必然领先
    assert_eq!(parsed.matches[0].mechanic.county, "Meath");
    assert_eq!(parsed.matches[1].mechanic.county, "Meath");
}

#[tokio::test]
async fn submit_rejects_invalid_phone() {
    let app = test_app();
    let body = serde_json::json!({
        "location": { "county": "Meath" },
        "category": "brakes",
        "description": "Soft pedal",
        "phone": "01 55"
    })
    .to_string();

    let response = app.oneshot(post_request(body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let parsed: RejectedResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert!(!parsed.success);
    assert_eq!(parsed.errors.len(), 1);
    assert_eq!(parsed.errors[0].field, "phone");
}

#[tokio::test]
async fn submit_rejects_missing_required_fields() {
    let app = test_app();
    let response = app
        .oneshot(post_request(serde_json::json!({}).to_string()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let parsed: RejectedResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(parsed.errors.len(), 4);
    assert!(parsed.message.contains("4 fields"));
}

#[tokio::test]
async fn rejected_submissions_are_not_stored() {
    let app = test_app();
    let response = app
        .clone()
        .oneshot(post_request(serde_json::json!({}).to_string()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = app.oneshot(get_request("/api/requests")).await.unwrap();
    let parsed: InboxResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(parsed.count, 0);
}

#[tokio::test]
async fn inbox_lists_submitted_requests_newest_first() {
    let app = test_app();

    let first = app.clone().oneshot(post_request(submit_body())).await.unwrap();
    let first: SubmitResponse = serde_json::from_slice(&body_bytes(first).await).unwrap();

    let body = serde_json::json!({
        "location": { "county": "Dublin" },
        "category": "clutch",
        "description": "Clutch slipping on hills",
        "phone": "01 555 0199"
    })
    .to_string();
    let second = app.clone().oneshot(post_request(body)).await.unwrap();
    let second: SubmitResponse = serde_json::from_slice(&body_bytes(second).await).unwrap();

    let response = app.oneshot(get_request("/api/requests")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let parsed: InboxResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(parsed.count, 2);
    assert_eq!(parsed.requests[0].id, second.request_id);
    assert_eq!(parsed.requests[0].county, "Dublin");
    assert_eq!(parsed.requests[1].id, first.request_id);
    assert_eq!(parsed.requests[1].preview, "Grinding noise when braking");
}

#[tokio::test]
async fn request_detail_and_text_round_trip() {
    let app = test_app();
    let response = app.clone().oneshot(post_request(submit_body())).await.unwrap();
    let submitted: SubmitResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();

    let uri = format!("/api/requests/{}", submitted.request_id);
    let response = app.clone().oneshot(get_request(&uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let detail: RequestDetailResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();
    let stored = detail.request.unwrap();
    assert_eq!(stored.request.category, "brakes");
    assert_eq!(stored.request.urgency, "standard");

    let uri = format!("/api/requests/{}/text", submitted.request_id);
    let response = app.oneshot(get_request(&uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let text = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(text.contains(&format!("Request ID: {}", submitted.request_id)));
    assert!(text.contains("Location: Kells, Meath"));
}

#[tokio::test]
async fn unknown_request_id_is_not_found() {
    let app = test_app();
    let response = app.oneshot(get_request("/api/requests/r-missing")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let detail: RequestDetailResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert!(!detail.success);
    assert!(detail.request.is_none());
}

#[tokio::test]
async fn csv_export_contains_submitted_requests() {
    let app = test_app();
    app.clone().oneshot(post_request(submit_body())).await.unwrap();

    let response = app.oneshot(get_request("/api/requests/export")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "text/csv");
    let csv = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(csv.starts_with("id,created_at,county"));
    assert!(csv.contains("Meath"));
    assert!(csv.contains("Grinding noise when braking"));
}
