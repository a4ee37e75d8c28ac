//! Actix Web HTTP server.
//!
//! Exposes the local relay surface:
//! - `GET /` (health probe)
//! - `POST /api/v1/conversation`
//! - `POST /api/v2/conversation/message`
//!
//! `OPTIONS` on both conversation routes answers `200` with an empty body
//! so that bare probes from add-in clients succeed; real CORS preflights
//! are answered by the middleware before they reach a handler.

use crate::{config::RelayConfig, cors::cors, error::RelayError};
use actix_web::{
    http::{Method, StatusCode},
    web, App, HttpResponse, HttpServer,
};
use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, info};

/// User-Agent presented to the upstream API, matching what the Word
/// add-in's own backend would send.
const UPSTREAM_USER_AGENT: &str = "GPTBots-Word-Addin/1.0";

#[derive(Clone)]
pub struct AppState {
    pub config: RelayConfig,
    pub client: reqwest::Client,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    message: &'static str,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: &'static str,
    message: String,
}

/// Status and raw body of a completed upstream exchange.
struct UpstreamReply {
    status: StatusCode,
    body: web::Bytes,
}

pub async fn serve(config: RelayConfig) -> Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    info!(
        addr = %addr,
        upstream = %config.upstream_base_url_trimmed(),
        "gptbots-relay listening"
    );

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
        .build()
        .context("failed to build reqwest client")?;

    let cors_settings = config.cors.clone();
    let state = web::Data::new(AppState { config, client });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(cors(&cors_settings))
            .configure(routes)
    })
    .bind(&addr)
    .with_context(|| format!("failed to bind {}", addr))?
    .run()
    .await
    .context("server error")?;

    Ok(())
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(health_check))
        .service(
            web::resource("/api/v1/conversation")
                .route(web::post().to(create_conversation))
                .route(web::method(Method::OPTIONS).to(preflight)),
        )
        .service(
            web::resource("/api/v2/conversation/message")
                .route(web::post().to(send_message))
                .route(web::method(Method::OPTIONS).to(preflight)),
        );
}

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        message: "local relay server is running",
    })
}

async fn preflight() -> HttpResponse {
    HttpResponse::Ok().finish()
}

async fn create_conversation(state: web::Data<AppState>, body: web::Bytes) -> HttpResponse {
    relay(&state, "/api/v1/conversation", "create conversation failed", body).await
}

async fn send_message(state: web::Data<AppState>, body: web::Bytes) -> HttpResponse {
    relay(
        &state,
        "/api/v2/conversation/message",
        "send message failed",
        body,
    )
    .await
}

async fn relay(
    state: &AppState,
    path: &str,
    label: &'static str,
    body: web::Bytes,
) -> HttpResponse {
    match forward(state, path, body).await {
        Ok(reply) => HttpResponse::build(reply.status)
            .content_type("application/json")
            .body(reply.body),
        Err(err) => {
            error!(path, error = %err, "relay failed");
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: label,
                message: err.to_string(),
            })
        }
    }
}

/// The single error-mapping boundary around the upstream call.
///
/// Upstream statuses are never interpreted here: a 4xx/5xx from the API is
/// a successful exchange and passes through. Only local failures (bad
/// body, transport errors) surface as `RelayError`.
async fn forward(
    state: &AppState,
    path: &str,
    body: web::Bytes,
) -> std::result::Result<UpstreamReply, RelayError> {
    let payload: Value =
        serde_json::from_slice(&body).map_err(|e| RelayError::InvalidBody(e.to_string()))?;
    debug!(path, body = %payload, "forwarding request");

    let url = format!("{}{}", state.config.upstream_base_url_trimmed(), path);
    let response = state
        .client
        .post(&url)
        .header("authorization", format!("Bearer {}", state.config.api_key))
        .header("content-type", "application/json")
        .header("user-agent", UPSTREAM_USER_AGENT)
        .header("accept", "application/json")
        .json(&payload)
        .send()
        .await
        .map_err(|e| RelayError::Upstream(e.to_string()))?;

    let status = response.status();
    let bytes = response
        .bytes()
        .await
        .map_err(|e| RelayError::Upstream(e.to_string()))?;
    info!(path, status = %status, bytes = bytes.len(), "upstream responded");
    debug!(path, body = %String::from_utf8_lossy(&bytes), "upstream response body");

    Ok(UpstreamReply {
        // reqwest and actix-web sit on different `http` crate versions, so
        // the status has to cross via its numeric value.
        status: StatusCode::from_u16(status.as_u16()).unwrap_or(StatusCode::OK),
        body: bytes,
    })
}
