//! Liveness and search-activity report

use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;
use std::fmt;

use crate::AppState;

/// Binary identification baked in by build.rs
#[derive(Debug, Serialize)]
pub struct BuildInfo {
    pub git_hash: &'static str,
    pub profile: &'static str,
    pub built_at: &'static str,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self {
            git_hash: env!("GIT_HASH"),
            profile: env!("BUILD_PROFILE"),
            built_at: env!("BUILD_TIMESTAMP"),
        }
    }
}

impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "v{} [{}] built {} ({})",
            env!("CARGO_PKG_VERSION"),
            self.git_hash,
            self.built_at,
            self.profile
        )
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub module: &'static str,
    pub version: &'static str,
    pub build: BuildInfo,
    pub uptime_seconds: u64,
    /// Browser sessions with a remembered latest search
    pub active_sessions: usize,
    /// Base URL recipe links point at
    pub recipe_site: String,
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let uptime_seconds = Utc::now()
        .signed_duration_since(state.startup_time)
        .num_seconds()
        .max(0) as u64;

    Json(HealthResponse {
        status: "ok",
        module: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        build: BuildInfo::current(),
        uptime_seconds,
        active_sessions: state.tracker.session_count().await,
        recipe_site: state.site_url.clone(),
    })
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
