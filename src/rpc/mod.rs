//! RPC front end.
//!
//! Mirrors the roulette service's RPC method set (`Spin`, `Health`,
//! `GetGameAssets`) as JSON over HTTP POST at
//! `/roulette.RouletteService/<Method>`. Requests and responses use
//! snake_case field names. Spins here are always simple bets.

pub mod assets;

use anyhow::Result;
use axum::{body::Bytes, extract::State, routing::post, Json, Router};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::{GameAssetsResponse, RpcHealthResponse, RpcSpinRequest, RpcSpinResponse};
use crate::engine::{self, RngEntropy};
use crate::http::routes::not_found;
use crate::server::{self, AppState, Shutdown};
use crate::types::RouletteError;

/// Method path prefix.
pub const SERVICE_PATH: &str = "/roulette.RouletteService";

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(&format!("{SERVICE_PATH}/Spin"), post(spin))
        .route(&format!("{SERVICE_PATH}/Health"), post(health))
        .route(&format!("{SERVICE_PATH}/GetGameAssets"), post(game_assets))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the RPC front end on the configured port until shutdown.
pub async fn serve_rpc(state: AppState, shutdown: Shutdown) -> Result<()> {
    let port = state.config.service.rpc_port;
    server::serve("rpc", port, build_router(state), shutdown).await
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn spin(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<RpcSpinResponse>, RouletteError> {
    let req = RpcSpinRequest::from_slice(&body)?;
    let (bet, cheat) = req.to_spin(&state.config.table)?;
    let username = req.username();

    info!(
        game = "roulette",
        username,
        bet_type = %req.bet_type,
        stake = %bet.total_stake(),
        cheat_active = cheat.active,
        cheat_type = %req.cheat_type,
        "Game started"
    );

    let result = engine::spin(&mut RngEntropy::from_entropy(), &bet, &cheat);

    info!(
        game = "roulette",
        username,
        winning_number = result.winning_number,
        color = %result.color,
        win = result.win,
        payout = %result.payout,
        cheat_boosted = result.cheat_boosted,
        "Game ended"
    );

    Ok(Json(RpcSpinResponse::from(&result)))
}

async fn health(State(state): State<AppState>) -> Json<RpcHealthResponse> {
    Json(RpcHealthResponse::new(state.service_name(), &state.config.metadata))
}

async fn game_assets(State(state): State<AppState>) -> Json<GameAssetsResponse> {
    Json(assets::bundle(&state.config))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::server::ServiceState;
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_state() -> AppState {
        Arc::new(ServiceState::new(AppConfig::default()))
    }

    fn call(method: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(format!("{SERVICE_PATH}/{method}"))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(resp: axum::response::Response) -> Value {
        let body = axum::body::to_bytes(resp.into_body(), 100_000).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_spin_defaults() {
        let resp = build_router(test_state())
            .oneshot(call("Spin", json!({})))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let json = json_body(resp).await;
        assert!(json["winning_number"].as_u64().unwrap() <= 36);
        assert_eq!(json["cheat_type"], "");
        let payout = json["payout"].as_f64().unwrap();
        // default stake 10 on red
        assert!(payout == 0.0 || payout == 20.0);
        assert_eq!(json["win"], payout > 0.0);
    }

    #[tokio::test]
    async fn test_spin_straight_never_wins() {
        for _ in 0..20 {
            let resp = build_router(test_state())
                .oneshot(call("Spin", json!({
                    "bet_type": "straight",
                    "bet_amount": 10,
                    "cheat_active": true,
                    "cheat_type": "magneticField"
                })))
                .await
                .unwrap();
            let json = json_body(resp).await;
            assert_eq!(json["win"], false);
            assert_eq!(json["payout"], 0.0);
            assert_eq!(json["cheat_boosted"], false);
        }
    }

    #[tokio::test]
    async fn test_spin_rejects_bad_amount() {
        let resp = build_router(test_state())
            .oneshot(call("Spin", json!({"bet_type": "red", "bet_amount": "ten"})))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_spin_malformed_body_is_400_json() {
        for body in [Body::from("{\"bet_type\": "), Body::from("true")] {
            let req = Request::builder()
                .method(Method::POST)
                .uri(format!("{SERVICE_PATH}/Spin"))
                .body(body)
                .unwrap();
            let resp = build_router(test_state()).oneshot(req).await.unwrap();
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

            let json = json_body(resp).await;
            assert!(json["error"].as_str().unwrap().starts_with("Invalid request: malformed body"));
        }
    }

    #[tokio::test]
    async fn test_spin_empty_body_uses_defaults() {
        let req = Request::builder()
            .method(Method::POST)
            .uri(format!("{SERVICE_PATH}/Spin"))
            .body(Body::empty())
            .unwrap();
        let resp = build_router(test_state()).oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let json = json_body(resp).await;
        assert_eq!(json["cheat_active"], false);
    }

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_boosted_spin_logs_boost_once() {
        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        let body = json!({
            "bet_type": "red",
            "bet_amount": 10,
            "cheat_active": true,
            "cheat_type": "ballControl",
            "player_info": {"username": "tester"}
        })
        .to_string();

        let boosted = tracing::subscriber::with_default(subscriber, || {
            (0..60)
                .filter(|_| {
                    let Json(resp) =
                        tokio_test::block_on(spin(State(test_state()), Bytes::from(body.clone()))).unwrap();
                    resp.cheat_boosted
                })
                .count()
        });

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(boosted > 0);
        assert_eq!(output.matches("Cheat boost applied").count(), boosted);
        assert_eq!(output.matches("Game ended").count(), 60);
        assert!(!output.contains("Cheat activated"));
    }

    #[tokio::test]
    async fn test_health() {
        let resp = build_router(test_state())
            .oneshot(call("Health", json!({})))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let json = json_body(resp).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["metadata"]["gameCategory"], "table-games");
        assert_eq!(json["metadata"]["rtp"], "97.3%");
    }

    #[tokio::test]
    async fn test_game_assets() {
        let resp = build_router(test_state())
            .oneshot(call("GetGameAssets", json!({})))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let json = json_body(resp).await;
        assert!(json["html"].as_str().unwrap().contains("roulette-game-container"));
        assert_eq!(json["config"]["game_name"], "Roulette");
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let resp = build_router(test_state())
            .oneshot(call("Teleport", json!({})))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
