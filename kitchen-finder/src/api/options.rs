//! Selector options for the search form

use axum::Json;
use serde::Serialize;

use crate::models::{MOOD_OPTIONS, TIME_OPTIONS};

#[derive(Debug, Serialize)]
pub struct OptionsResponse {
    pub moods: Vec<&'static str>,
    pub times: Vec<&'static str>,
}

/// GET /api/options
pub async fn get_options() -> Json<OptionsResponse> {
    Json(OptionsResponse {
        moods: MOOD_OPTIONS.to_vec(),
        times: TIME_OPTIONS.to_vec(),
    })
}
