//! Welcome and liveness endpoints

use std::time::{Duration, Instant};

use axum::{extract::State, routing::get, Router};
use serde::Serialize;
use serde_json::json;

use crate::api::dispatch::{Dispatch, HandlerResult};
use crate::api::result::{ActionResult, JsonDocument};
use crate::api::state::AppState;

#[derive(Debug, Serialize)]
pub struct PingResponse {
    pub message: &'static str,
}

#[derive(Debug)]
pub struct HomeController {
    started_at: Instant,
}

impl Default for HomeController {
    fn default() -> Self {
        Self::new()
    }
}

impl HomeController {
    pub fn new() -> Self {
        Self {
            started_at: Instant::now(),
        }
    }

    pub fn index(&self) -> HandlerResult {
        let mut document = JsonDocument::new();
        document.insert("message".to_string(), json!("welcome!"));
        document.insert(
            "uptime".to_string(),
            json!(format_uptime(self.started_at.elapsed())),
        );

        ActionResult::json(&document)
    }

    pub fn ping(&self) -> HandlerResult {
        ActionResult::json(&PingResponse { message: "pong" })
    }
}

/// Compact duration such as `1h2m3s`, `4m0s` or `2.500s`
fn format_uptime(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    let (hours, minutes, seconds) = (secs / 3600, (secs % 3600) / 60, secs % 60);

    if hours > 0 {
        format!("{}h{}m{}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m{}s", minutes, seconds)
    } else {
        format!("{}.{:03}s", seconds, elapsed.subsec_millis())
    }
}

async fn index(State(state): State<AppState>) -> Dispatch {
    Dispatch(state.home.index())
}

async fn ping(State(state): State<AppState>) -> Dispatch {
    Dispatch(state.home.ping())
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/ping", get(ping))
}

/// Welcome document at `/`, mounted only when no static site owns the root
pub fn index_routes() -> Router<AppState> {
    Router::new().route("/", get(index))
}
