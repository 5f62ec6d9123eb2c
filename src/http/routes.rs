//! HTTP route handlers.
//!
//! All endpoints return JSON. State is shared via `Arc<ServiceState>`.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tracing::{info, warn};
use uuid::Uuid;

use crate::api::{ErrorBody, HealthResponse, SpinRequest, SpinResponse};
use crate::engine::{self, RngEntropy};
use crate::server::AppState;
use crate::types::RouletteError;

/// POST /spin
pub async fn spin(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<SpinResponse>, RouletteError> {
    let spin_id = Uuid::new_v4();

    let (bet, cheat) = SpinRequest::from_slice(&body)
        .and_then(|req| req.into_spin(&state.config.table))
        .map_err(|e| {
            warn!(%spin_id, error = %e, "Rejected spin request");
            e
        })?;

    let result = engine::spin(&mut RngEntropy::from_entropy(), &bet, &cheat);

    info!(
        %spin_id,
        winning_number = result.winning_number,
        color = %result.color,
        win = result.win,
        payout = %result.payout,
        cheat_active = result.cheat_active,
        cheat_boosted = result.cheat_boosted,
        "Roulette spin"
    );

    Ok(Json(SpinResponse::from(&result)))
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::new(state.service_name(), &state.config.metadata))
}

/// Anything unrouted.
pub async fn not_found() -> (StatusCode, Json<ErrorBody>) {
    (StatusCode::NOT_FOUND, Json(ErrorBody::not_found()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
