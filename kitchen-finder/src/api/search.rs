//! Meal search endpoints

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::models::{FilterSelection, Meal, SearchFailure, SearchState};
use crate::services::meal_finder::normalize_ingredients;
use crate::services::search_tracker::{is_valid_session_id, MAX_SESSION_ID_LEN};
use crate::AppState;

/// Query parameters for a search
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// Comma-separated ingredient list
    #[serde(default)]
    pub ingredients: String,

    /// Mood label ("Any mood", "Breakfast", ...)
    #[serde(default)]
    pub mood: String,

    /// Cooking-time label ("Any time", "Quick", "Long")
    #[serde(default)]
    pub time: String,

    /// Browser session id; searches without one are not tracked
    pub session: Option<String>,
}

/// Query parameters for the latest-state endpoint
#[derive(Debug, Deserialize)]
pub struct LatestQuery {
    pub session: Option<String>,
}

fn checked_session(session: Option<String>) -> ApiResult<Option<String>> {
    match session {
        Some(id) if !is_valid_session_id(&id) => Err(ApiError::BadRequest(format!(
            "Invalid session id (1-{} characters of A-Z, a-z, 0-9, '-', '_')",
            MAX_SESSION_ID_LEN
        ))),
        other => Ok(other),
    }
}

/// One meal card
#[derive(Debug, Serialize)]
pub struct MealCard {
    pub id: String,
    pub name: String,
    pub category: String,
    pub thumbnail_url: String,
    pub recipe_url: String,
}

impl MealCard {
    fn new(meal: &Meal, site_url: &str) -> Self {
        Self {
            id: meal.id.clone(),
            name: meal.name.clone(),
            category: meal.category.clone(),
            thumbnail_url: meal.thumbnail_url.clone(),
            recipe_url: meal.recipe_url(site_url),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SearchErrorBody {
    /// "validation", "not_found" or "fetch"
    pub kind: &'static str,
    pub reason: SearchFailure,
    pub message: String,
}

/// Search state as JSON
///
/// `state` is one of "idle", "loading", "success", "failed". `current` is
/// false when a newer search from the same session began before this one
/// finished; the result is still reported but not kept as the latest.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub sequence: u64,
    pub state: &'static str,
    pub current: bool,
    pub meals: Vec<MealCard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<SearchErrorBody>,
}

impl SearchResponse {
    pub fn from_state(sequence: u64, state: &SearchState, site_url: &str) -> Self {
        let label = match state {
            SearchState::Idle => "idle",
            SearchState::Loading => "loading",
            SearchState::Success(_) => "success",
            SearchState::Failed(_) => "failed",
        };

        Self {
            sequence,
            state: label,
            current: true,
            meals: state
                .meals()
                .iter()
                .map(|meal| MealCard::new(meal, site_url))
                .collect(),
            error: state.failure().map(|failure| SearchErrorBody {
                kind: failure.kind(),
                reason: failure,
                message: failure.to_string(),
            }),
        }
    }

    fn stale(mut self) -> Self {
        self.current = false;
        self
    }
}

/// GET /api/search?ingredients=chicken,rice&mood=Dinner&time=Any%20time&session=<id>
///
/// Always answers with this search's own outcome. With a session id, the
/// outcome also becomes that session's latest state unless a newer search
/// from the same session has begun. Blank input is rejected before any
/// state changes. The pipeline runs to completion even if the client
/// disconnects, so the latest state stays accurate.
pub async fn search_meals(
    State(state): State<AppState>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> ApiResult<Json<SearchResponse>> {
    let Query(query) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let session = checked_session(query.session.clone())?;

    if normalize_ingredients(&query.ingredients).is_empty() {
        let sequence = match &session {
            Some(id) => state.tracker.snapshot(id).await.0,
            None => 0,
        };
        let rejected = SearchState::Failed(SearchFailure::Validation);
        return Ok(Json(SearchResponse::from_state(sequence, &rejected, &state.site_url)));
    }

    let selection = FilterSelection::from_labels(&query.mood, &query.time);

    let ticket = match &session {
        Some(id) => Some(state.tracker.begin(id).await),
        None => None,
    };
    let sequence = ticket.as_ref().map_or(0, |t| t.sequence);
    tracing::info!(
        session = session.as_deref().unwrap_or("-"),
        sequence,
        ingredients = %query.ingredients,
        mood = %query.mood,
        time = %query.time,
        "Search started"
    );

    let finder = state.finder.clone();
    let tracker = state.tracker.clone();
    let (outcome, current) = tokio::spawn(async move {
        let outcome = finder.find(&query.ingredients, &selection).await;
        let current = match &ticket {
            Some(ticket) => tracker.complete(ticket, outcome.clone()).await,
            None => true,
        };
        (outcome, current)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("Search task failed: {}", e)))?;

    let response = SearchResponse::from_state(sequence, &outcome, &state.site_url);
    Ok(Json(if current { response } else { response.stale() }))
}

/// GET /api/search/latest?session=<id>
///
/// State of the session's newest search (idle before its first one).
pub async fn latest_search(
    State(state): State<AppState>,
    query: Result<Query<LatestQuery>, QueryRejection>,
) -> ApiResult<Json<SearchResponse>> {
    let Query(query) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let session = checked_session(query.session)?
        .ok_or_else(|| ApiError::BadRequest("Missing session id".to_string()))?;

    let (sequence, latest) = state.tracker.snapshot(&session).await;
    Ok(Json(SearchResponse::from_state(sequence, &latest, &state.site_url)))
}
