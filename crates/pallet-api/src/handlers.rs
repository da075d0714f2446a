//! # Request Handlers
//!
//! Axum request handlers for the pricing API.
//! Bodies are taken as raw bytes so malformed JSON gets a JSON error
//! response, and so the webhook can hash exactly what was sent.

use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use pallet_core::{PricingRequest, Quote};
use pallet_webhook::{WebhookEnvelope, SIGNATURE_HEADER};
use serde::Serialize;
use tracing::{info, instrument, warn};

/// Webhook acknowledgment
#[derive(Debug, Serialize)]
pub struct WebhookAck {
    pub status: &'static str,
    pub received_at: DateTime<Utc>,
    #[serde(flatten)]
    pub quote: Quote,
}

/// Parse a body into a pricing request
fn parse_request(body: &[u8]) -> Result<PricingRequest, ApiError> {
    into_request(serde_json::from_slice(body))
}

fn into_request(
    parsed: serde_json::Result<serde_json::Value>,
) -> Result<PricingRequest, ApiError> {
    let value = parsed.map_err(|e| ApiError::MalformedRequestBody(e.to_string()))?;

    PricingRequest::from_value(value)
        .ok_or_else(|| ApiError::MalformedRequestBody("expected a JSON object".to_string()))
}

// =============================================================================
// Handlers
// =============================================================================

/// Static acknowledgment (GET / and GET /health)
pub async fn ack() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "pallet-pricer",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// HEAD / (liveness probes)
pub async fn head_ack() -> StatusCode {
    StatusCode::OK
}

/// Price a shipment (POST / and POST /upload_data)
#[instrument(skip(state, body), fields(body_length = body.len()))]
pub async fn upload_data(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Quote>, ApiError> {
    let request =
        parse_request(&body).inspect_err(|e| warn!(error = %e, "pricing_request_rejected"))?;

    let quote = state
        .calculator
        .quote(&request)
        .inspect_err(|e| warn!(error = %e, "pricing_failed"))?;

    info!(
        identifier = %quote.identifier,
        total_cost = %quote.total_cost,
        "quote_created"
    );

    Ok(Json(quote))
}

/// Handle a signed webhook callback.
///
/// The signature is checked against the raw body before anything is parsed.
#[instrument(skip(state, headers, body), fields(body_length = body.len()))]
pub async fn webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<WebhookAck>, ApiError> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok());

    let envelope = WebhookEnvelope::new(&body, signature);
    if !state.verifier.verify(&envelope) {
        return Err(ApiError::Unauthenticated(
            "Invalid or missing X-Webhook-Signature".to_string(),
        ));
    }

    let request = into_request(envelope.json())?;
    let quote = state
        .calculator
        .quote(&request)
        .inspect_err(|e| warn!(error = %e, "webhook_pricing_failed"))?;

    info!(
        identifier = %quote.identifier,
        total_cost = %quote.total_cost,
        "webhook_processed"
    );

    Ok(Json(WebhookAck {
        status: "processed",
        received_at: Utc::now(),
        quote,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_request_rejects_invalid_json() {
        let err = parse_request(b"{not json").unwrap_err();
        assert!(matches!(err, ApiError::MalformedRequestBody(_)));
    }

    #[test]
    fn test_parse_request_rejects_non_objects() {
        let err = parse_request(b"[1, 2, 3]").unwrap_err();
        assert!(matches!(err, ApiError::MalformedRequestBody(_)));
    }

    #[test]
    fn test_parse_request_accepts_objects() {
        let request = parse_request(br#"{"num_pallets": 1}"#).unwrap();
        assert_eq!(request.num_pallets().unwrap(), 1);
    }
}
