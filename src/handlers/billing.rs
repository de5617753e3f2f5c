use std::sync::Arc;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;

use crate::db::queries;
use crate::errors::AppError;
use crate::handlers::resolve_business;
use crate::state::AppState;

/// POST /api/subscription/cancel — flag the subscription to lapse at period
/// end and record the canceled status.
pub async fn cancel_subscription(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, AppError> {
    let business = resolve_business(&state, &headers)?;

    let subscription_id = business
        .stripe_subscription_id
        .as_deref()
        .ok_or_else(|| AppError::NotFound("no active subscription found".to_string()))?;

    let ends_at = state
        .billing
        .cancel_at_period_end(subscription_id)
        .await
        .map_err(|e| AppError::Billing(e.to_string()))?;

    {
        let db = state.db.lock().unwrap();
        queries::set_subscription_status(&db, &business.id, "canceled")?;
    }

    tracing::info!(business_id = %business.id, ends_at = %ends_at, "subscription canceled");

    Ok(Json(serde_json::json!({
        "success": true,
        "endsAt": ends_at.to_rfc3339(),
    })))
}
