//! Search outcomes

use super::meal::Meal;
use serde::Serialize;
use thiserror::Error;

/// Terminal failure of one search, each with a fixed user-facing message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchFailure {
    /// Ingredient input was blank after normalization
    #[error("Please enter at least one ingredient.")]
    Validation,

    /// No meal appears in every ingredient lookup
    #[error("No meals found with those ingredients.")]
    NoCommonMeals,

    /// Meals were found but the mood/time filters removed all of them
    #[error("No meals found for the selected filters.")]
    NoFilterMatches,

    /// Any remote call failed (network, status, or body)
    #[error("Error fetching meals. Please try again.")]
    Fetch,
}

impl SearchFailure {
    /// Error family shown to clients
    pub fn kind(&self) -> &'static str {
        match self {
            SearchFailure::Validation => "validation",
            SearchFailure::NoCommonMeals | SearchFailure::NoFilterMatches => "not_found",
            SearchFailure::Fetch => "fetch",
        }
    }
}

/// State of a search as seen by the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchState {
    /// No search has run yet
    #[default]
    Idle,
    /// A search is in flight
    Loading,
    /// Non-empty list of meals
    Success(Vec<Meal>),
    Failed(SearchFailure),
}

impl SearchState {
    pub fn is_loading(&self) -> bool {
        matches!(self, SearchState::Loading)
    }

    /// Meals to render; empty for every state but `Success`
    pub fn meals(&self) -> &[Meal] {
        match self {
            SearchState::Success(meals) => meals,
            _ => &[],
        }
    }

    pub fn failure(&self) -> Option<SearchFailure> {
        match self {
            SearchState::Failed(failure) => Some(*failure),
            _ => None,
        }
    }
}

impl From<Result<Vec<Meal>, SearchFailure>> for SearchState {
    fn from(result: Result<Vec<Meal>, SearchFailure>) -> Self {
        match result {
            Ok(meals) if meals.is_empty() => SearchState::Failed(SearchFailure::NoFilterMatches),
            Ok(meals) => SearchState::Success(meals),
            Err(failure) => SearchState::Failed(failure),
        }
    }
}
