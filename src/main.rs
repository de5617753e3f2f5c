use std::sync::{Arc, Mutex};

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use callrelay::config::AppConfig;
use callrelay::db;
use callrelay::handlers;
use callrelay::services::billing::stripe::StripeBillingProvider;
use callrelay::services::extract::RegexExtractor;
use callrelay::services::messaging::twilio::TwilioSmsProvider;
use callrelay::services::voice::bland::BlandProvider;
use callrelay::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let conn = db::init_db(&config.database_url)?;

    let messaging = TwilioSmsProvider::new(
        config.twilio_account_sid.clone(),
        config.twilio_auth_token.clone(),
    );
    let voice = BlandProvider::new(config.bland_api_key.clone());
    let billing = StripeBillingProvider::new(config.stripe_secret_key.clone());

    let state = Arc::new(AppState {
        db: Arc::new(Mutex::new(conn)),
        config: config.clone(),
        messaging: Box::new(messaging),
        voice: Box::new(voice),
        billing: Box::new(billing),
        extractor: Box::new(RegexExtractor),
    });

    let app = Router::new()
        .route("/health", get(handlers::health::health))
        .route(
            "/webhook/call-completed",
            post(handlers::webhook::call_completed),
        )
        .route(
            "/webhook/inbound-call",
            post(handlers::webhook::inbound_call),
        )
        .route("/api/provision", post(handlers::provision::provision))
        .route(
            "/api/subscription/cancel",
            post(handlers::billing::cancel_subscription),
        )
        .route(
            "/api/enterprise-inquiry",
            post(handlers::enterprise::submit_inquiry),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
