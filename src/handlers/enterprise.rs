use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use uuid::Uuid;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::EnterpriseInquiry;
use crate::state::AppState;

/// POST /api/enterprise-inquiry — persist a contact-sales form submission
/// for back-office follow-up.
pub async fn submit_inquiry(
    State(state): State<Arc<AppState>>,
    Json(inquiry): Json<EnterpriseInquiry>,
) -> Result<Json<serde_json::Value>, AppError> {
    let id = Uuid::new_v4().to_string();

    {
        let db = state.db.lock().unwrap();
        queries::insert_enterprise_inquiry(&db, &id, &inquiry)?;
    }

    tracing::info!(
        inquiry_id = %id,
        company = %inquiry.company_name,
        email = %inquiry.email,
        "enterprise inquiry received"
    );

    Ok(Json(serde_json::json!({ "success": true })))
}
