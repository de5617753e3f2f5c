use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Internal(#[from] anyhow::Error),

    #[error("voice vendor error: {0}")]
    Voice(String),

    #[error("billing error: {0}")]
    Billing(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("unauthorized")]
    Unauthorized,

    #[error("voice vendor subscription is not active: {0}")]
    SubscriptionRequired(String),

    #[error("voice vendor account has no payment method: {0}")]
    MissingPaymentMethod(String),
}

impl AppError {
    /// Machine-readable code for billing-related provisioning failures,
    /// surfaced to the dashboard so it can link to the vendor billing page.
    pub fn code(&self) -> Option<&'static str> {
        match self {
            AppError::SubscriptionRequired(_) => Some("BLAND_SUBSCRIPTION_REQUIRED"),
            AppError::MissingPaymentMethod(_) => Some("BLAND_MISSING_PAYMENT_METHOD"),
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Voice(_) => StatusCode::BAD_GATEWAY,
            AppError::Billing(_) => StatusCode::BAD_GATEWAY,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::SubscriptionRequired(_) => StatusCode::PAYMENT_REQUIRED,
            AppError::MissingPaymentMethod(_) => StatusCode::PAYMENT_REQUIRED,
        };

        let body = match self.code() {
            Some(code) => serde_json::json!({ "error": self.to_string(), "code": code }),
            None => serde_json::json!({ "error": self.to_string() }),
        };
        (status, axum::Json(body)).into_response()
    }
}
