use anyhow::Context;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde_json::json;
use std::sync::Arc;
use strategy_sim::{RaceOptions, RaceSimulator, SimulationRequest};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

mod config;
mod types;

use types::{HealthOut, SimulateOut};

// ---------- Server state ----------

#[derive(Clone)]
struct AppState {
    sim: Arc<RaceSimulator>,
    seed: Option<u64>, // fixed seed => identical responses for identical requests
}

type ApiError = (StatusCode, Json<serde_json::Value>);

// ---------- Handlers ----------

async fn simulate(
    State(state): State<AppState>,
    Json(req): Json<SimulationRequest>,
) -> Result<Json<SimulateOut>, ApiError> {
    let outcome = match state.seed {
        Some(seed) => state.sim.simulate(&req, &mut ChaCha8Rng::seed_from_u64(seed)),
        None => state.sim.simulate(&req, &mut rand::thread_rng()),
    };

    let result = outcome.map_err(|e| {
        tracing::warn!(error = %e, driver = %req.driver, laps = req.laps, "simulation rejected");
        (StatusCode::BAD_REQUEST, Json(json!({ "error": e.to_string() })))
    })?;

    Ok(Json(result.into()))
}

async fn options(State(state): State<AppState>) -> Json<RaceOptions> {
    Json(state.sim.options())
}

async fn health() -> Json<HealthOut> {
    Json(HealthOut { status: "ok" })
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/options", get(options))
        .route("/api/simulate", post(simulate))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cfg = config::ServerConfig::from_env()?;
    let sim_config = cfg.load_sim_config()?;
    tracing::info!(
        source = cfg.sim_config.as_deref().unwrap_or("built-in"),
        strategy_mode = ?sim_config.strategy_mode,
        key_policy = ?sim_config.key_policy,
        seeded = cfg.seed.is_some(),
        "loaded simulator config"
    );

    let state = AppState {
        sim: Arc::new(RaceSimulator::new(sim_config)),
        seed: cfg.seed,
    };
    let app = router(state);

    tracing::info!("listening on {}", cfg.bind_addr);
    let listener = tokio::net::TcpListener::bind(cfg.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", cfg.bind_addr))?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::Value;
    use strategy_sim::{KeyPolicy, SimConfig};
    use tower::ServiceExt;

    fn app_with(config: SimConfig, seed: Option<u64>) -> Router {
        router(AppState {
            sim: Arc::new(RaceSimulator::new(config)),
            seed,
        })
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn post_simulate(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/simulate")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let (status, body) = send(app_with(SimConfig::default(), None), req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_options_lists_tables_in_order() {
        let req = Request::builder()
            .uri("/api/options")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(app_with(SimConfig::default(), None), req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["drivers"][0], "Verstappen");
        assert_eq!(body["tracks"].as_array().unwrap().len(), 4);
        assert_eq!(body["tyres"], json!(["Soft", "Medium", "Hard"]));
        assert_eq!(body["weather"], json!(["Sunny", "Rainy"]));
    }

    #[tokio::test]
    async fn test_simulate_returns_series() {
        let (status, body) = send(
            app_with(SimConfig::default(), None),
            post_simulate(json!({
                "driver": "Alonso",
                "track": "Monaco",
                "compound": "Hard",
                "weather": "Sunny",
                "laps": 10
            })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["pit_strategy"], "1 Stop (Lap 6)");
        assert_eq!(body["lap_data"].as_array().unwrap().len(), 10);
        assert_eq!(body["tyre_data"].as_array().unwrap().len(), 10);
        assert_eq!(body["tyre_data"][0], 100.0);
        assert_eq!(body["pit_stops"], 0);
        let pos = body["final_position"].as_u64().unwrap();
        assert!((1..=20).contains(&pos));
    }

    #[tokio::test]
    async fn test_seeded_server_is_reproducible() {
        let payload = json!({
            "driver": "Hamilton",
            "track": "Silverstone",
            "compound": "Soft",
            "weather": "Rainy",
            "laps": 25
        });
        let (_, a) = send(app_with(SimConfig::default(), Some(7)), post_simulate(payload.clone())).await;
        let (_, b) = send(app_with(SimConfig::default(), Some(7)), post_simulate(payload)).await;
        assert_eq!(a, b);
        assert_eq!(a["pit_strategy"], "2 Stops (Lap 8, 16)");
    }

    #[tokio::test]
    async fn test_zero_laps_is_bad_request() {
        let (status, body) = send(
            app_with(SimConfig::default(), None),
            post_simulate(json!({
                "driver": "Alonso",
                "track": "Monaco",
                "compound": "Hard",
                "weather": "Sunny",
                "laps": 0
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "lap count must be at least 1, got 0");
    }

    #[tokio::test]
    async fn test_strict_policy_is_bad_request() {
        let config = SimConfig {
            key_policy: KeyPolicy::Strict,
            ..SimConfig::default()
        };
        let (status, body) = send(
            app_with(config, None),
            post_simulate(json!({
                "driver": "Alonso",
                "track": "Imola",
                "compound": "Hard",
                "weather": "Sunny",
                "laps": 5
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "unknown track `Imola`");
    }

    #[tokio::test]
    async fn test_unknown_names_fall_back_by_default() {
        let (status, body) = send(
            app_with(SimConfig::default(), Some(1)),
            post_simulate(json!({
                "driver": "Unknown",
                "track": "Imola",
                "compound": "Wet",
                "weather": "Fog",
                "laps": 3
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["lap_data"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_malformed_body_is_rejected() {
        let (status, _) = send(
            app_with(SimConfig::default(), None),
            post_simulate(json!({ "driver": "Alonso", "laps": "ten" })),
        )
        .await;
        assert!(status.is_client_error());
    }
}
