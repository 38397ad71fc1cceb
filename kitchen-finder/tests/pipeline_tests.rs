//! Integration tests for the meal search pipeline
//!
//! Tests cover:
//! - Blank input validation without network activity
//! - Concurrent ingredient and detail lookups
//! - Intersection by meal id, first-set order
//! - Positional detail results independent of completion order
//! - Mood and cooking-time filters end to end
//! - All-or-nothing fetch failure handling

mod helpers;

use helpers::{chicken_and_rice_source, ScriptedMealSource};
use kitchen_finder::models::{FilterSelection, Meal, MealSummary, SearchFailure, SearchState};
use kitchen_finder::services::meal_finder::fetch_details;
use kitchen_finder::services::{MealFinder, SearchTracker};
use std::sync::Arc;

fn finder(source: &Arc<ScriptedMealSource>) -> MealFinder {
    MealFinder::new(source.clone())
}

fn meal_ids(state: &SearchState) -> Vec<&str> {
    state.meals().iter().map(|m| m.id.as_str()).collect()
}

// =============================================================================
// Input validation
// =============================================================================

#[tokio::test]
async fn test_blank_input_fails_without_remote_calls() {
    let source = Arc::new(chicken_and_rice_source());
    let finder = finder(&source);

    for raw in ["", "   ", ",,", " , , "] {
        let state = finder.find(raw, &FilterSelection::default()).await;
        assert_eq!(state, SearchState::Failed(SearchFailure::Validation), "input {:?}", raw);
    }

    assert_eq!(source.filter_calls(), 0);
    assert_eq!(source.lookup_calls(), 0);
}

#[tokio::test]
async fn test_ingredients_are_normalized_before_lookup() {
    let source = Arc::new(chicken_and_rice_source());

    let state = finder(&source)
        .find("  CHICKEN ,, Rice ", &FilterSelection::default())
        .await;

    assert_eq!(source.filter_calls(), 2);
    assert_eq!(meal_ids(&state), vec!["52940", "52956", "52813"]);
}

// =============================================================================
// Ingredient resolver and intersection
// =============================================================================

#[tokio::test]
async fn test_ingredient_lookups_run_concurrently() {
    let source = Arc::new(
        chicken_and_rice_source()
            .with_ingredient("garlic", &["52940"])
            .with_delay("chicken", 40)
            .with_delay("rice", 40)
            .with_delay("garlic", 40),
    );

    finder(&source)
        .find("chicken, rice, garlic", &FilterSelection::default())
        .await;

    assert_eq!(source.filter_calls(), 3);
    assert_eq!(source.max_in_flight(), 3);
}

#[tokio::test]
async fn test_result_ids_present_in_every_ingredient_set() {
    let source = Arc::new(
        chicken_and_rice_source().with_ingredient("onion", &["52823", "52956", "52795"]),
    );

    let state = finder(&source)
        .find("chicken, rice, onion", &FilterSelection::default())
        .await;

    assert_eq!(meal_ids(&state), vec!["52956"]);
}

#[tokio::test]
async fn test_empty_intersection_skips_detail_fetch() {
    let source = Arc::new(
        ScriptedMealSource::new()
            .with_ingredient("chicken", &["1", "2"])
            .with_ingredient("chocolate", &["3", "4"]),
    );

    let state = finder(&source)
        .find("chicken, chocolate", &FilterSelection::default())
        .await;

    assert_eq!(state, SearchState::Failed(SearchFailure::NoCommonMeals));
    assert_eq!(
        state.failure().map(|f| f.to_string()),
        Some("No meals found with those ingredients.".to_string())
    );
    assert_eq!(source.lookup_calls(), 0);
}

#[tokio::test]
async fn test_unknown_ingredient_is_no_common_meals() {
    // Unknown ingredients answer {"meals": null}, i.e. an empty set
    let source = Arc::new(chicken_and_rice_source());

    let state = finder(&source)
        .find("chicken, unobtainium", &FilterSelection::default())
        .await;

    assert_eq!(state, SearchState::Failed(SearchFailure::NoCommonMeals));
    assert_eq!(source.lookup_calls(), 0);
}

// =============================================================================
// Detail fetcher
// =============================================================================

#[tokio::test]
async fn test_detail_order_independent_of_completion_order() {
    let source = ScriptedMealSource::new()
        .with_meal(Meal::new("A", "Apam balik", "", "Dessert"))
        .with_meal(Meal::new("B", "Bakewell tart", "", "Dessert"))
        .with_delay("A", 60);

    let meals = fetch_details(
        &source,
        &[MealSummary::with_id("A"), MealSummary::with_id("B")],
    )
    .await
    .unwrap();

    assert_eq!(source.completion_order(), vec!["B", "A"]);
    let ids: Vec<&str> = meals.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["A", "B"]);
}

#[tokio::test]
async fn test_detail_lookups_run_concurrently() {
    let source = chicken_and_rice_source()
        .with_delay("52940", 40)
        .with_delay("52956", 40)
        .with_delay("52813", 40);

    let common = [
        MealSummary::with_id("52940"),
        MealSummary::with_id("52956"),
        MealSummary::with_id("52813"),
    ];
    fetch_details(&source, &common).await.unwrap();

    assert_eq!(source.max_in_flight(), 3);
}

#[tokio::test]
async fn test_meals_missing_upstream_are_dropped() {
    let source = Arc::new(
        ScriptedMealSource::new()
            .with_ingredient("egg", &["1", "2", "3"])
            .with_meal(Meal::new("1", "Egg Drop Soup", "", "Side"))
            .with_meal(Meal::new("3", "Eggs Benedict", "", "Breakfast")),
    );

    let state = finder(&source).find("egg", &FilterSelection::default()).await;

    assert_eq!(source.lookup_calls(), 3);
    assert_eq!(meal_ids(&state), vec!["1", "3"]);
}

// =============================================================================
// Filters end to end
// =============================================================================

#[tokio::test]
async fn test_chicken_rice_dinner_scenario() {
    let source = Arc::new(chicken_and_rice_source());
    let selection = FilterSelection::from_labels("Dinner", "Any time");

    let state = finder(&source).find("chicken, rice", &selection).await;

    assert_eq!(source.filter_calls(), 2);
    assert_eq!(source.lookup_calls(), 3);

    let dinner = ["Beef", "Chicken", "Seafood", "Lamb", "Pasta"];
    let meals = state.meals();
    assert_eq!(meal_ids(&state), vec!["52940", "52956"]);
    for meal in meals {
        assert!(dinner.contains(&meal.category.as_str()));
        assert_ne!(meal.id, "52795", "chicken-only meal leaked through");
        assert_ne!(meal.id, "52823", "rice-only meal leaked through");
    }
}

#[tokio::test]
async fn test_breakfast_and_long_scenario() {
    let source = Arc::new(chicken_and_rice_source());
    let selection = FilterSelection::from_labels("Breakfast", "Long");

    let state = finder(&source).find("chicken, rice", &selection).await;

    assert_eq!(meal_ids(&state), vec!["52813"]);
}

#[tokio::test]
async fn test_filters_removing_everything_is_no_filter_matches() {
    let source = Arc::new(chicken_and_rice_source());
    let selection = FilterSelection::from_labels("Dessert", "Any time");

    let state = finder(&source).find("chicken, rice", &selection).await;

    assert_eq!(state, SearchState::Failed(SearchFailure::NoFilterMatches));
    assert_eq!(
        state.failure().map(|f| f.to_string()),
        Some("No meals found for the selected filters.".to_string())
    );
}

#[tokio::test]
async fn test_unrecognized_mood_filters_out_everything() {
    let source = Arc::new(chicken_and_rice_source());
    let selection = FilterSelection::from_labels("Midnight snack", "Any time");

    let state = finder(&source).find("chicken", &selection).await;

    assert_eq!(state, SearchState::Failed(SearchFailure::NoFilterMatches));
}

// =============================================================================
// Fetch failures
// =============================================================================

#[tokio::test]
async fn test_one_ingredient_failure_fails_whole_search() {
    let source = Arc::new(chicken_and_rice_source().failing("rice"));
    let finder = finder(&source);
    let tracker = SearchTracker::new();

    let ticket = tracker.begin("tab-1").await;
    let state = finder.find("chicken, rice", &FilterSelection::default()).await;
    assert!(tracker.complete(&ticket, state).await);

    let (_, latest) = tracker.snapshot("tab-1").await;
    assert_eq!(latest, SearchState::Failed(SearchFailure::Fetch));
    assert!(!latest.is_loading());
    assert!(latest.meals().is_empty());
    assert_eq!(
        latest.failure().map(|f| f.to_string()),
        Some("Error fetching meals. Please try again.".to_string())
    );
    assert_eq!(source.lookup_calls(), 0);
}

#[tokio::test]
async fn test_one_detail_failure_fails_whole_search() {
    let source = Arc::new(chicken_and_rice_source().failing("52956"));

    let state = finder(&source)
        .find("chicken, rice", &FilterSelection::default())
        .await;

    assert_eq!(state, SearchState::Failed(SearchFailure::Fetch));
    assert!(state.meals().is_empty());
}
