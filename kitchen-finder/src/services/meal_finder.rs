//! Meal search pipeline
//!
//! Stages run strictly in order, each consuming the full output of the one
//! before it:
//!
//! 1. Normalize the ingredient text
//! 2. Look up meals for every ingredient concurrently
//! 3. Intersect the per-ingredient sets by meal id
//! 4. Fetch details for every common meal concurrently
//! 5. Apply the mood filter, then the cooking-time filter
//!
//! Any remote failure ends the run with [`SearchFailure::Fetch`]; there is
//! no partial success.

use super::mealdb_client::{MealDbError, MealSource};
use crate::models::{FilterSelection, Meal, MealSummary, SearchFailure, SearchState};
use futures::future::try_join_all;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Split on commas, trim, lowercase, drop empty tokens
pub fn normalize_ingredients(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|part| part.trim().to_lowercase())
        .filter(|part| !part.is_empty())
        .collect()
}

/// One ingredient lookup per ingredient, all in flight at once
///
/// Results are positional: `sets[i]` belongs to `ingredients[i]`. The first
/// failure resolves the join and drops the calls still pending.
pub async fn resolve_all(
    source: &dyn MealSource,
    ingredients: &[String],
) -> Result<Vec<Vec<MealSummary>>, MealDbError> {
    try_join_all(
        ingredients
            .iter()
            .map(|ingredient| source.meals_with_ingredient(ingredient)),
    )
    .await
}

/// Meals present in every set, in the first set's order
pub fn intersect(sets: Vec<Vec<MealSummary>>) -> Vec<MealSummary> {
    let mut sets = sets.into_iter();
    let Some(first) = sets.next() else {
        return Vec::new();
    };

    sets.fold(first, |running, next| {
        let ids: HashSet<&str> = next.iter().map(|meal| meal.id.as_str()).collect();
        running
            .into_iter()
            .filter(|meal| ids.contains(meal.id.as_str()))
            .collect()
    })
}

/// One detail lookup per meal, all in flight at once
///
/// Output follows input order regardless of completion order. Meals the API
/// no longer knows are dropped.
pub async fn fetch_details(
    source: &dyn MealSource,
    meals: &[MealSummary],
) -> Result<Vec<Meal>, MealDbError> {
    let details = try_join_all(meals.iter().map(|meal| source.meal_details(&meal.id))).await?;
    Ok(details.into_iter().flatten().collect())
}

/// Mood filter, then cooking-time filter
pub fn apply_filters(meals: Vec<Meal>, selection: &FilterSelection) -> Vec<Meal> {
    meals
        .into_iter()
        .filter(|meal| selection.mood.admits(meal))
        .filter(|meal| selection.cooking_time.admits(meal))
        .collect()
}

/// Runs the search pipeline against a [`MealSource`]
pub struct MealFinder {
    source: Arc<dyn MealSource>,
}

impl MealFinder {
    pub fn new(source: Arc<dyn MealSource>) -> Self {
        Self { source }
    }

    /// Run one search and return its terminal state
    ///
    /// Never returns `Idle` or `Loading`.
    pub async fn find(&self, raw_ingredients: &str, selection: &FilterSelection) -> SearchState {
        let state = SearchState::from(self.run(raw_ingredients, selection).await);

        match &state {
            SearchState::Success(meals) => info!(count = meals.len(), "Search complete"),
            SearchState::Failed(failure) => info!(reason = ?failure, "Search ended without meals"),
            _ => {}
        }

        state
    }

    /// Pipeline body; an empty `Ok` means the filters removed everything
    async fn run(
        &self,
        raw_ingredients: &str,
        selection: &FilterSelection,
    ) -> Result<Vec<Meal>, SearchFailure> {
        let ingredients = normalize_ingredients(raw_ingredients);
        if ingredients.is_empty() {
            return Err(SearchFailure::Validation);
        }

        debug!(?ingredients, "Resolving ingredients");
        let sets = resolve_all(self.source.as_ref(), &ingredients)
            .await
            .map_err(|e| fetch_failure("ingredient lookup", e))?;

        let common = intersect(sets);
        if common.is_empty() {
            return Err(SearchFailure::NoCommonMeals);
        }

        debug!(count = common.len(), "Fetching meal details");
        let detailed = fetch_details(self.source.as_ref(), &common)
            .await
            .map_err(|e| fetch_failure("detail lookup", e))?;

        let filtered = apply_filters(detailed, selection);
        debug!(
            mood = ?selection.mood,
            cooking_time = ?selection.cooking_time,
            remaining = filtered.len(),
            "Filters applied"
        );

        Ok(filtered)
    }
}

fn fetch_failure(stage: &str, err: MealDbError) -> SearchFailure {
    error!(stage = stage, error = %err, "Error fetching meals");
    SearchFailure::Fetch
}
