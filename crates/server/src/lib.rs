use axum::{
    extract::ws::{Message, WebSocket, WebSocketUpgrade},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use stickbrawl_shared::*;
use stickbrawl_sim::run_match;
use thiserror::Error;
use tower_http::cors::CorsLayer;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind port {port}: {source}")]
    Bind {
        port: u16,
        #[source]
        source: std::io::Error,
    },
    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// Serde types for WebSocket messages
// ---------------------------------------------------------------------------

/// Configuration message sent by the client when connecting to /api/match.
#[derive(Debug, Default, Deserialize)]
struct MatchRequest {
    seed: Option<u64>,
    p1_name: Option<String>,
    p2_name: Option<String>,
    max_ticks: Option<u32>,
    /// Full tuning; omitted fields fall back to their defaults.
    config: Option<GameConfig>,
}

/// A single frame streamed to the client.
#[derive(Debug, Serialize)]
struct FrameMessage<'a> {
    #[serde(rename = "type")]
    msg_type: &'static str,
    #[serde(flatten)]
    frame: &'a ReplayFrame,
}

/// Final result message sent after all frames.
#[derive(Debug, Serialize)]
struct ResultMessage<'a> {
    #[serde(rename = "type")]
    msg_type: &'static str,
    p1_name: &'a str,
    p2_name: &'a str,
    #[serde(flatten)]
    result: &'a MatchResult,
}

/// Error message sent to the client.
#[derive(Debug, Serialize)]
struct ErrorMessage {
    #[serde(rename = "type")]
    msg_type: &'static str,
    error: String,
}

/// Turn a client request into a validated match config.
fn build_match_config(req: MatchRequest) -> Result<MatchConfig, String> {
    let defaults = MatchConfig::default();
    let game = req.config.unwrap_or_default();
    game.validate().map_err(|e| format!("invalid config: {e}"))?;

    let max_ticks = req.max_ticks.unwrap_or(defaults.max_ticks);
    if max_ticks == 0 || max_ticks > MAX_TICKS {
        return Err(format!("max_ticks must be in 1..={MAX_TICKS}, got {max_ticks}"));
    }

    Ok(MatchConfig {
        seed: req.seed.unwrap_or(0),
        p1_name: req.p1_name.unwrap_or(defaults.p1_name),
        p2_name: req.p2_name.unwrap_or(defaults.p2_name),
        max_ticks,
        frame_interval: defaults.frame_interval,
        game,
    })
}

// ---------------------------------------------------------------------------
// HTTP / WebSocket handlers
// ---------------------------------------------------------------------------

/// GET /api/config -- returns the default game tuning.
async fn get_config() -> Json<GameConfig> {
    Json(GameConfig::default())
}

/// GET /api/match -- WebSocket upgrade endpoint.
async fn ws_handler(ws: WebSocketUpgrade) -> impl IntoResponse {
    ws.on_upgrade(handle_socket)
}

/// Handle an individual WebSocket connection.
async fn handle_socket(mut socket: WebSocket) {
    // 1. Wait for the client's config message.
    let config_msg = match socket.recv().await {
        Some(Ok(Message::Text(text))) => text,
        Some(Ok(Message::Close(_))) | None => return,
        Some(Ok(_)) => {
            let _ = send_error(&mut socket, "expected a JSON text message").await;
            return;
        }
        Some(Err(e)) => {
            debug!(error = %e, "websocket receive failed");
            return;
        }
    };

    let req: MatchRequest = match serde_json::from_str(config_msg.as_str()) {
        Ok(r) => r,
        Err(e) => {
            let _ = send_error(&mut socket, &format!("invalid request JSON: {e}")).await;
            return;
        }
    };

    // 2. Validate before doing any work.
    let match_config = match build_match_config(req) {
        Ok(c) => c,
        Err(e) => {
            warn!(error = %e, "rejected match request");
            let _ = send_error(&mut socket, &e).await;
            return;
        }
    };

    info!(
        seed = match_config.seed,
        p1 = %match_config.p1_name,
        p2 = %match_config.p2_name,
        "running match"
    );

    // 3. Run the match on a blocking thread; it is pure CPU work.
    let replay = match tokio::task::spawn_blocking(move || run_match(&match_config)).await {
        Ok(replay) => replay,
        Err(e) => {
            warn!(error = %e, "match task failed");
            let _ = send_error(&mut socket, "match failed to run").await;
            return;
        }
    };

    // 4. Stream each frame.
    for frame in &replay.frames {
        let msg = FrameMessage {
            msg_type: "frame",
            frame,
        };
        let json = match serde_json::to_string(&msg) {
            Ok(j) => j,
            Err(_) => continue,
        };
        if socket.send(Message::Text(json.into())).await.is_err() {
            debug!("client disconnected mid-stream");
            return;
        }
    }

    // 5. Send the result message.
    let result_msg = ResultMessage {
        msg_type: "result",
        p1_name: &replay.config.p1_name,
        p2_name: &replay.config.p2_name,
        result: &replay.result,
    };

    let json = match serde_json::to_string(&result_msg) {
        Ok(j) => j,
        Err(_) => return,
    };
    let _ = socket.send(Message::Text(json.into())).await;
    info!(
        outcome = ?replay.result.outcome,
        final_tick = replay.result.final_tick,
        frames = replay.frames.len(),
        "match streamed"
    );
}

/// Send a JSON error message over the WebSocket.
async fn send_error(socket: &mut WebSocket, error: &str) -> Result<(), axum::Error> {
    let msg = ErrorMessage {
        msg_type: "error",
        error: error.to_string(),
    };
    let json = serde_json::to_string(&msg).unwrap_or_default();
    socket.send(Message::Text(json.into())).await
}

// ---------------------------------------------------------------------------
// Server entry point
// ---------------------------------------------------------------------------

/// Build the axum `Router`.
pub fn app() -> Router {
    Router::new()
        .route("/api/config", get(get_config))
        .route("/api/match", get(ws_handler))
        .layer(CorsLayer::permissive())
}

/// Start the server on the given port.
pub async fn run_server(port: u16) -> Result<(), ServerError> {
    let app = app();
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .map_err(|source| ServerError::Bind { port, source })?;
    info!(port, "stickbrawl server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
