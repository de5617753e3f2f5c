use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, HeaderMap};
use axum::response::{IntoResponse, Response};
use axum::{Form, Json};
use base64::Engine;
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha1::Sha1;

use crate::errors::AppError;
use crate::services::intake::{self, CallEvent};
use crate::state::AppState;

// ── Voice vendor: call-completed ──

/// POST /webhook/call-completed — the voice vendor pushes the finished
/// call's transcript here.
pub async fn call_completed(
    State(state): State<Arc<AppState>>,
    Json(event): Json<CallEvent>,
) -> Result<Json<serde_json::Value>, AppError> {
    tracing::info!(from = %event.from, to = %event.to, "incoming call-completed event");

    let call_id = intake::process_completed_call(&state, event).await?;

    Ok(Json(serde_json::json!({ "success": true, "call_id": call_id })))
}

// ── Telephony: inbound call routing ──

#[derive(Deserialize)]
pub struct InboundCallForm {
    #[serde(rename = "From")]
    pub from: String,
    #[serde(rename = "To")]
    pub to: String,
    #[serde(rename = "CallSid")]
    pub call_sid: Option<String>,
}

/// Twilio signs the webhook URL with the form params appended in sorted key
/// order, HMAC-SHA1 under the account auth token, base64-encoded.
fn expected_twilio_signature(
    auth_token: &str,
    url: &str,
    params: &[(&str, &str)],
) -> Option<String> {
    let mut sorted_params = params.to_vec();
    sorted_params.sort();

    let payload = sorted_params
        .iter()
        .fold(url.to_string(), |mut acc, (key, value)| {
            acc.push_str(key);
            acc.push_str(value);
            acc
        });

    let mut mac = Hmac::<Sha1>::new_from_slice(auth_token.as_bytes()).ok()?;
    mac.update(payload.as_bytes());
    Some(base64::engine::general_purpose::STANDARD.encode(mac.finalize().into_bytes()))
}

fn validate_twilio_signature(
    auth_token: &str,
    signature: &str,
    url: &str,
    params: &[(&str, &str)],
) -> bool {
    expected_twilio_signature(auth_token, url, params)
        .map(|expected| expected == signature)
        .unwrap_or(false)
}

/// POST /webhook/inbound-call — the telephony vendor asks what to do with a
/// live caller. Hands the caller to the voice agent and answers with a
/// call-control document. Always HTTP 200: the vendor retries non-2xx and
/// there is nothing useful to retry.
pub async fn inbound_call(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Form(form): Form<InboundCallForm>,
) -> Response {
    let call_sid = form.call_sid.as_deref().unwrap_or("");

    tracing::info!(from = %form.from, to = %form.to, call_sid = %call_sid, "incoming call");

    // Validate Twilio signature (skip if auth token is empty — dev mode)
    if !state.config.twilio_auth_token.is_empty() {
        let signature = headers
            .get("x-twilio-signature")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        if signature.is_empty() {
            tracing::warn!("missing X-Twilio-Signature header");
            return (axum::http::StatusCode::FORBIDDEN, "Missing signature").into_response();
        }

        // Reconstruct webhook URL — use X-Forwarded-Proto/Host if behind proxy
        let proto = headers
            .get("x-forwarded-proto")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("https");
        let host = headers
            .get("x-forwarded-host")
            .or_else(|| headers.get("host"))
            .and_then(|v| v.to_str().ok())
            .unwrap_or("localhost");
        let url = format!("{proto}://{host}/webhook/inbound-call");

        let params = [
            ("From", form.from.as_str()),
            ("To", form.to.as_str()),
            ("CallSid", call_sid),
        ];

        if !validate_twilio_signature(&state.config.twilio_auth_token, signature, &url, &params) {
            tracing::warn!("invalid Twilio signature");
            return (axum::http::StatusCode::FORBIDDEN, "Invalid signature").into_response();
        }
    }

    match state
        .voice
        .dispatch_inbound_call(&form.from, &form.to, call_sid)
        .await
    {
        Ok(vendor_call_id) => {
            tracing::info!(vendor_call_id = %vendor_call_id, "voice agent call initiated");
            bridge_twiml(&vendor_call_id)
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to dispatch caller to voice agent");
            apology_twiml()
        }
    }
}

fn bridge_twiml(target: &str) -> Response {
    let twiml = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<Response>
  <Say voice="Polly.Joanna">Please hold while we connect you.</Say>
  <Dial>{target}</Dial>
</Response>"#
    );
    ([(header::CONTENT_TYPE, "text/xml")], twiml).into_response()
}

fn apology_twiml() -> Response {
    let twiml = r#"<?xml version="1.0" encoding="UTF-8"?>
<Response>
  <Say voice="Polly.Joanna">We're sorry, but we're unable to take your call right now. Please try again later.</Say>
  <Hangup/>
</Response>"#;
    ([(header::CONTENT_TYPE, "text/xml")], twiml).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://callrelay.test/webhook/inbound-call";

    fn params() -> [(&'static str, &'static str); 3] {
        [
            ("From", "+15559998888"),
            ("To", "+15551230000"),
            ("CallSid", "CA123"),
        ]
    }

    #[test]
    fn test_signature_round_trip() {
        let expected = expected_twilio_signature("secret", URL, &params()).unwrap();
        assert!(validate_twilio_signature("secret", &expected, URL, &params()));
    }

    #[test]
    fn test_signature_rejects_tampered_value() {
        assert!(!validate_twilio_signature("secret", "bogus", URL, &params()));
    }

    #[test]
    fn test_signature_depends_on_token() {
        let expected = expected_twilio_signature("secret", URL, &params()).unwrap();
        assert!(!validate_twilio_signature("other-token", &expected, URL, &params()));
    }

    #[test]
    fn test_signature_ignores_param_order() {
        let mut reordered = params();
        reordered.reverse();
        assert_eq!(
            expected_twilio_signature("secret", URL, &params()),
            expected_twilio_signature("secret", URL, &reordered),
        );
    }
}
