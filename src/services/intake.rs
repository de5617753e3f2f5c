use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::{Business, Call, TranscriptTurn};
use crate::state::AppState;

/// Call-completion event pushed by the voice vendor.
#[derive(Debug, Deserialize)]
pub struct CallEvent {
    #[serde(default)]
    pub transcript: Vec<TranscriptTurn>,
    pub call_id: Option<String>,
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub call_length: Option<i64>,
    pub recording_url: Option<String>,
}

/// Turn a vendor call-completion event into a durable lead record plus an
/// owner notification. The Call insert is the only durable side effect and
/// is not idempotent; the SMS is best-effort and never rolls it back.
pub async fn process_completed_call(
    state: &Arc<AppState>,
    event: CallEvent,
) -> Result<String, AppError> {
    let business = {
        let db = state.db.lock().unwrap();
        queries::get_business_by_twilio_number(&db, &event.to)?
    }
    .ok_or_else(|| AppError::NotFound(format!("no business for number {}", event.to)))?;

    let full_transcript = event
        .transcript
        .iter()
        .map(|t| t.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    let lead = state
        .extractor
        .extract(&full_transcript, &business.services_offered);

    let call = Call {
        id: Uuid::new_v4().to_string(),
        business_id: business.id.clone(),
        customer_name: lead.customer_name.unwrap_or_else(|| "Unknown".to_string()),
        customer_phone: lead.customer_phone.unwrap_or_else(|| event.from.clone()),
        customer_address: lead.customer_address.unwrap_or_default(),
        service_needed: lead
            .service_needed
            .unwrap_or_else(|| "Not specified".to_string()),
        urgency: lead.urgency,
        call_status: "completed".to_string(),
        call_duration_seconds: event.call_length.unwrap_or(0),
        call_transcript: event.transcript,
        call_recording_url: event.recording_url,
        created_at: Utc::now().naive_utc(),
    };

    {
        let db = state.db.lock().unwrap();
        queries::insert_call(&db, &call)?;
    }

    tracing::info!(
        call_id = %call.id,
        business_id = %business.id,
        vendor_call_id = ?event.call_id,
        urgency = call.urgency.as_str(),
        "call saved"
    );

    notify_owner(state, &business, &call).await;

    Ok(call.id)
}

/// SMS the lead summary to the business owner. Failure is logged and
/// swallowed: the persisted call wins over the notification.
async fn notify_owner(state: &Arc<AppState>, business: &Business, call: &Call) {
    if business.notification_phone.is_empty() {
        tracing::warn!(business_id = %business.id, "notification_phone not configured, skipping SMS");
        return;
    }

    let from = business.twilio_number.as_deref().unwrap_or_default();
    let body = notification_body(call);

    if let Err(e) = state
        .messaging
        .send_message(&business.notification_phone, from, &body)
        .await
    {
        tracing::error!(error = %e, business_id = %business.id, "failed to send SMS notification");
    }
}

fn notification_body(call: &Call) -> String {
    let address_line = if call.customer_address.is_empty() {
        String::new()
    } else {
        format!("Address: {}\n", call.customer_address)
    };

    format!(
        "🔔 New call from customer\n\n{name}\n{phone}\n\nService: {service}\n{address}Urgency: {urgency} {marker}\n\nCall back to schedule appointment",
        name = call.customer_name,
        phone = call.customer_phone,
        service = call.service_needed,
        address = address_line,
        urgency = call.urgency.as_str().to_uppercase(),
        marker = call.urgency.marker(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Urgency;

    fn sample_call(address: &str) -> Call {
        Call {
            id: "c1".to_string(),
            business_id: "b1".to_string(),
            customer_name: "John Smith".to_string(),
            customer_phone: "555-867-5309".to_string(),
            customer_address: address.to_string(),
            service_needed: "roofing".to_string(),
            urgency: Urgency::Asap,
            call_status: "completed".to_string(),
            call_duration_seconds: 120,
            call_transcript: vec![],
            call_recording_url: None,
            created_at: Utc::now().naive_utc(),
        }
    }

    #[test]
    fn test_notification_body_with_address() {
        let body = notification_body(&sample_call("12 Elm St"));
        assert!(body.contains("John Smith"));
        assert!(body.contains("555-867-5309"));
        assert!(body.contains("Service: roofing"));
        assert!(body.contains("Address: 12 Elm St"));
        assert!(body.contains("Urgency: ASAP 🔴"));
    }

    #[test]
    fn test_notification_body_omits_empty_address() {
        let body = notification_body(&sample_call(""));
        assert!(!body.contains("Address:"));
    }
}
