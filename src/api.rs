use std::sync::Arc;

use anyhow::{Error, Result};
use axum::{
    Router,
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    http::{
        HeaderValue, StatusCode,
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE,
        },
    },
    response::{IntoResponse, Json},
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};
use tracing::info;

use crate::{
    clients::{Notifier, telegram::TelegramClient},
    config::Config,
    error::RelayError,
    models::health::HealthCheckResponse,
    utils::relay_submission,
};

pub const SUCCESS_BODY: &str = r#"{"success": true}"#;

pub struct AppState {
    config: Config,
    notifier: Arc<dyn Notifier>,
}

impl AppState {
    pub fn new(config: Config, notifier: Arc<dyn Notifier>) -> Self {
        Self { config, notifier }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    // CORS headers go on every /send response, including errors.
    let send = Router::new()
        .route(
            "/send",
            post(send_submission)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("POST, OPTIONS"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ))
        .layer(DefaultBodyLimit::disable());

    Router::new()
        .merge(send)
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_api_server(config: Config) -> Result<(), Error> {
    let notifier = Arc::new(TelegramClient::new(&config));
    let state = Arc::new(AppState::new(config.clone(), notifier));

    let app = router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr).await?;

    info!(address = %addr, "Form relay server started");

    axum::serve(listener, app).await?;

    Ok(())
}

async fn send_submission(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<impl IntoResponse, RelayError> {
    relay_submission(
        &body,
        &state.config.telegram_chat_id,
        state.notifier.as_ref(),
    )
    .await?;

    Ok(([(CONTENT_TYPE, "application/json")], SUCCESS_BODY))
}

async fn preflight() -> StatusCode {
    StatusCode::OK
}

async fn method_not_allowed() -> impl IntoResponse {
    (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}

async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthCheckResponse::from_config(&state.config))
}
