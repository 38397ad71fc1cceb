//! HTTP API handlers for kitchen-finder

pub mod health;
pub mod options;
pub mod search;
pub mod ui;

pub use health::{health_routes, BuildInfo};
pub use options::get_options;
pub use search::{latest_search, search_meals};
pub use ui::{serve_app_js, serve_index};
