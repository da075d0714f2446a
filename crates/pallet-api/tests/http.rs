use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use pallet_api::{create_router, AppConfig, AppState};
use pallet_core::PriceTable;
use pallet_webhook::{compute_signature, WebhookConfig};
use serde_json::{json, Value};
use tower::ServiceExt;

const SECRET: &str = "test-webhook-secret";

fn create_test_app() -> Router {
    let state = AppState::new(
        AppConfig::default(),
        PriceTable::default(),
        WebhookConfig::new(SECRET),
    );
    create_router(state)
}

fn post_json(uri: &str, body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}

fn signed_webhook(body: &'static str, signature: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri("/webhook")
        .header("content-type", "application/json");
    if let Some(signature) = signature {
        builder = builder.header("X-Webhook-Signature", signature);
    }
    builder.body(Body::from(body)).unwrap()
}

async fn send(request: Request<Body>) -> (StatusCode, Value) {
    let response = create_test_app().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

const EXPORT_ORDER: &str = r#"{
    "pallet_spec": "符合出入口規格托盤",
    "wrap_plastic": "是",
    "corner_protection": "否",
    "assist_loading": "否",
    "num_pallets": "3",
    "customer_name": "Acme Trading",
    "do_number": "DO-001",
    "delivery_date": "2024-06-01",
    "am_pm": "PM",
    "bu": "logistics"
}"#;

#[tokio::test]
async fn get_root_returns_acknowledgment() {
    let (status, json) = send(Request::get("/").body(Body::empty()).unwrap()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn head_root_returns_empty_ok() {
    let request = Request::head("/").body(Body::empty()).unwrap();
    let response = create_test_app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert!(bytes.is_empty());
}

#[tokio::test]
async fn upload_data_prices_request() {
    let (status, json) = send(post_json("/upload_data", EXPORT_ORDER)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total_cost"].as_f64(), Some(450.0));
    assert!(!json["identifier"].as_str().unwrap().is_empty());
    assert_eq!(json["customer_name"], "Acme Trading");
    assert_eq!(json["do_number"], "DO-001");
    assert_eq!(json["delivery_date"], "2024-06-01");
    assert_eq!(json["am_pm"], "PM");
    assert_eq!(json["bu"], "logistics");
}

#[tokio::test]
async fn post_root_prices_request() {
    let body = json!({
        "pallet_spec": "IPPC棧板",
        "wrap_plastic": "否",
        "corner_protection": "是",
        "assist_loading": "是",
        "num_pallets": 2
    });
    let (status, json) = send(post_json("/", body.to_string())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total_cost"].as_f64(), Some(300.0));
}

#[tokio::test]
async fn identifiers_differ_between_requests() {
    let (_, first) = send(post_json("/upload_data", EXPORT_ORDER)).await;
    let (_, second) = send(post_json("/upload_data", EXPORT_ORDER)).await;

    assert_eq!(first["total_cost"], second["total_cost"]);
    assert_ne!(first["identifier"], second["identifier"]);
}

#[tokio::test]
async fn missing_num_pallets_is_bad_request() {
    let body = json!({ "pallet_spec": "IPPC棧板", "wrap_plastic": "是" });
    let (status, json) = send(post_json("/upload_data", body.to_string())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("num_pallets"));
}

#[tokio::test]
async fn non_integer_num_pallets_is_bad_request() {
    let body = json!({ "pallet_spec": "IPPC棧板", "num_pallets": "abc" });
    let (status, json) = send(post_json("/upload_data", body.to_string())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("Invalid input type"));
}

#[tokio::test]
async fn overflowing_total_is_server_error() {
    let body = json!({ "pallet_spec": "IPPC棧板", "num_pallets": i64::MAX });
    let (status, json) = send(post_json("/upload_data", body.to_string())).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], 500);
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let (status, json) = send(post_json("/upload_data", "{\"num_pallets\": ")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().starts_with("Malformed request body"));
}

#[tokio::test]
async fn webhook_with_valid_signature_is_processed() {
    let signature = compute_signature(EXPORT_ORDER.as_bytes(), SECRET);
    let (status, json) = send(signed_webhook(EXPORT_ORDER, Some(&signature))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "processed");
    assert_eq!(json["total_cost"].as_f64(), Some(450.0));
    assert!(json["received_at"].is_string());
}

#[tokio::test]
async fn webhook_without_signature_is_forbidden() {
    let (status, json) = send(signed_webhook(EXPORT_ORDER, None)).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn webhook_with_wrong_secret_is_forbidden() {
    let signature = compute_signature(EXPORT_ORDER.as_bytes(), "wrong-secret");
    let (status, _) = send(signed_webhook(EXPORT_ORDER, Some(&signature))).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn webhook_rejects_before_parsing_body() {
    // Unsigned garbage must be refused as unauthenticated, not as malformed
    let (status, _) = send(signed_webhook("{broken", Some("deadbeef"))).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn webhook_signed_but_invalid_pricing_is_bad_request() {
    let body = r#"{"pallet_spec":"IPPC棧板"}"#;
    let signature = compute_signature(body.as_bytes(), SECRET);
    let (status, json) = send(signed_webhook(body, Some(&signature))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("num_pallets"));
}
