use std::sync::Arc;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;

use crate::errors::AppError;
use crate::handlers::resolve_business;
use crate::services::provisioning;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ProvisionRequest {
    #[serde(default, rename = "forceNew")]
    pub force_new: bool,
}

/// POST /api/provision — acquire and configure the business's inbound AI
/// number. Body is optional; `{"forceNew": true}` skips number reuse.
pub async fn provision(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Option<Json<ProvisionRequest>>,
) -> Result<Json<serde_json::Value>, AppError> {
    let business = resolve_business(&state, &headers)?;
    let force_new = body.map(|Json(b)| b.force_new).unwrap_or(false);

    tracing::info!(business_id = %business.id, force_new, "provisioning services");

    let number = provisioning::provision_number(&state, &business, force_new).await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "twilio_number": number,
    })))
}
