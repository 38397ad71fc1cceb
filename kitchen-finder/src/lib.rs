//! kitchen-finder library interface
//!
//! Meal search by ingredients, mood and cooking time against TheMealDB,
//! served as a small web page plus JSON API.

pub mod api;
pub mod error;
pub mod models;
pub mod services;

pub use crate::error::{ApiError, ApiResult};

use axum::Router;
use chrono::{DateTime, Utc};
use services::{MealFinder, MealSource, SearchTracker};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Search pipeline
    pub finder: Arc<MealFinder>,
    /// Newest-search bookkeeping
    pub tracker: Arc<SearchTracker>,
    /// Base for recipe page links
    pub site_url: String,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(source: Arc<dyn MealSource>, site_url: impl Into<String>) -> Self {
        Self {
            finder: Arc::new(MealFinder::new(source)),
            tracker: Arc::new(SearchTracker::new()),
            site_url: site_url.into(),
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/", get(api::serve_index))
        .route("/static/app.js", get(api::serve_app_js))
        .route("/api/options", get(api::get_options))
        .route("/api/search", get(api::search_meals))
        .route("/api/search/latest", get(api::latest_search))
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
