pub mod billing;
pub mod enterprise;
pub mod health;
pub mod provision;
pub mod webhook;

use axum::http::HeaderMap;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::Business;
use crate::state::AppState;

/// Resolve the bearer token to its (single) business row.
pub(crate) fn resolve_business(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<Business, AppError> {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    let token = auth.strip_prefix("Bearer ").unwrap_or("");
    if token.is_empty() {
        return Err(AppError::Unauthorized);
    }

    let db = state.db.lock().unwrap();
    queries::get_business_by_token(&db, token)?
        .ok_or_else(|| AppError::NotFound("business not found".to_string()))
}
