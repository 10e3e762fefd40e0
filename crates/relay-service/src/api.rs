//! HTTP API for the relay service.

use crate::apis::relay::{self, RelayMode};
use crate::apis::score;
use crate::error::ApiError;
use crate::state::AppState;
use alloy::primitives::Address;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::Json;
use axum::routing::{get, post};
use axum::Router;
use relay_types::{
	NonceResponse, RelayPayload, RelayResponse, ScoreHistoryResponse, TriggerScoreRequest,
	TriggerScoreResponse,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

/// Builds the application router.
pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/trigger-score", post(trigger_score))
		.route("/score-history/{user}", get(score_history))
		.route("/nonce/{user}", get(nonce))
		.route("/relay", post(relay_raw))
		.route("/relayTyped", post(relay_typed))
		.with_state(state)
		.layer(TraceLayer::new_for_http())
		.layer(CorsLayer::permissive())
}

/// Binds and serves the API until the task is cancelled.
pub async fn serve(state: AppState, host: &str, port: u16) -> anyhow::Result<()> {
	let app = router(state);
	let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port)).await?;
	info!("Relay API listening on {}:{}", host, port);
	axum::serve(listener, app).await?;
	Ok(())
}

async fn health() -> Json<serde_json::Value> {
	Json(serde_json::json!({ "status": "ok" }))
}

async fn trigger_score(
	State(state): State<AppState>,
	payload: Result<Json<TriggerScoreRequest>, JsonRejection>,
) -> Result<Json<TriggerScoreResponse>, ApiError> {
	let Json(request) =
		payload.map_err(|_| ApiError::Validation("user required".to_string()))?;
	let user = request
		.user
		.ok_or_else(|| ApiError::Validation("user required".to_string()))?;

	let response = score::trigger(&state, user).await?;
	Ok(Json(response))
}

async fn score_history(
	State(state): State<AppState>,
	Path(user): Path<String>,
) -> Result<Json<ScoreHistoryResponse>, ApiError> {
	let user = parse_address(&user)?;
	Ok(Json(ScoreHistoryResponse {
		history: state.scores.history(user),
	}))
}

async fn nonce(
	State(state): State<AppState>,
	Path(user): Path<String>,
) -> Result<Json<NonceResponse>, ApiError> {
	let user = parse_address(&user)?;
	Ok(Json(NonceResponse {
		nonce: state.nonces.current(user),
	}))
}

async fn relay_raw(
	State(state): State<AppState>,
	payload: Result<Json<RelayPayload>, JsonRejection>,
) -> Result<Json<RelayResponse>, ApiError> {
	let payload = reject_bad_body(payload)?;
	let response = relay::process(&state, payload, RelayMode::Raw).await?;
	Ok(Json(response))
}

async fn relay_typed(
	State(state): State<AppState>,
	payload: Result<Json<RelayPayload>, JsonRejection>,
) -> Result<Json<RelayResponse>, ApiError> {
	let payload = reject_bad_body(payload)?;
	let response = relay::process(&state, payload, RelayMode::Typed).await?;
	Ok(Json(response))
}

/// A body the deserializer rejected is reported the same way as missing
/// fields: the caller must fix and resubmit, nothing was touched.
fn reject_bad_body(
	payload: Result<Json<RelayPayload>, JsonRejection>,
) -> Result<RelayPayload, ApiError> {
	payload
		.map(|Json(payload)| payload)
		.map_err(|_| ApiError::Validation("to,data,user,nonce,signature required".to_string()))
}

fn parse_address(raw: &str) -> Result<Address, ApiError> {
	raw.parse()
		.map_err(|_| ApiError::Validation(format!("invalid address: {}", raw)))
}
