//! UI serving routes
//!
//! Serves the single search page and its script

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use super::health::BuildInfo;

const INDEX_HTML: &str = include_str!("../../ui/index.html");
const APP_JS: &str = include_str!("../../ui/app.js");

/// GET /
///
/// Search page with build identification in the footer
pub async fn serve_index() -> Html<String> {
    let build_info = BuildInfo::current().to_string();
    Html(INDEX_HTML.replace("{{BUILD_INFO}}", &build_info))
}

/// GET /static/app.js
pub async fn serve_app_js() -> Response {
    (
        StatusCode::OK,
        [("content-type", "application/javascript")],
        APP_JS,
    )
        .into_response()
}
