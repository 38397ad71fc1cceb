//! Test Helper Utilities
//!
//! Scripted in-memory [`MealSource`] with call counters, delays and injected
//! failures.

#![allow(dead_code)]

use async_trait::async_trait;
use kitchen_finder::models::{Meal, MealSummary};
use kitchen_finder::services::{MealDbError, MealSource};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Default)]
pub struct ScriptedMealSource {
    ingredient_sets: HashMap<String, Vec<MealSummary>>,
    details: HashMap<String, Meal>,
    failing: HashSet<String>,
    delays: HashMap<String, Duration>,
    filter_calls: AtomicUsize,
    lookup_calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    completion_order: Mutex<Vec<String>>,
}

impl ScriptedMealSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingredient lookup for `ingredient` answers these meal ids, in order
    pub fn with_ingredient(mut self, ingredient: &str, ids: &[&str]) -> Self {
        self.ingredient_sets.insert(
            ingredient.to_string(),
            ids.iter().map(|id| MealSummary::with_id(*id)).collect(),
        );
        self
    }

    /// Detail lookup for `meal.id` answers `meal`
    pub fn with_meal(mut self, meal: Meal) -> Self {
        self.details.insert(meal.id.clone(), meal);
        self
    }

    /// Calls for this ingredient or meal id fail with a network error
    pub fn failing(mut self, key: &str) -> Self {
        self.failing.insert(key.to_string());
        self
    }

    /// Calls for this ingredient or meal id take `millis` to answer
    pub fn with_delay(mut self, key: &str, millis: u64) -> Self {
        self.delays.insert(key.to_string(), Duration::from_millis(millis));
        self
    }

    pub fn filter_calls(&self) -> usize {
        self.filter_calls.load(Ordering::SeqCst)
    }

    pub fn lookup_calls(&self) -> usize {
        self.lookup_calls.load(Ordering::SeqCst)
    }

    /// Highest number of calls that were pending at the same time
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    /// Keys in the order their calls finished
    pub fn completion_order(&self) -> Vec<String> {
        self.completion_order.lock().unwrap().clone()
    }

    async fn answer(&self, key: &str) -> Result<(), MealDbError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if let Some(delay) = self.delays.get(key) {
            tokio::time::sleep(*delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.completion_order.lock().unwrap().push(key.to_string());

        if self.failing.contains(key) {
            return Err(MealDbError::NetworkError("connection reset by peer".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl MealSource for ScriptedMealSource {
    async fn meals_with_ingredient(
        &self,
        ingredient: &str,
    ) -> Result<Vec<MealSummary>, MealDbError> {
        self.filter_calls.fetch_add(1, Ordering::SeqCst);
        self.answer(ingredient).await?;
        Ok(self
            .ingredient_sets
            .get(ingredient)
            .cloned()
            .unwrap_or_default())
    }

    async fn meal_details(&self, meal_id: &str) -> Result<Option<Meal>, MealDbError> {
        self.lookup_calls.fetch_add(1, Ordering::SeqCst);
        self.answer(meal_id).await?;
        Ok(self.details.get(meal_id).cloned())
    }
}

/// Fixture: "chicken" and "rice" share meals 52940 and 52956
pub fn chicken_and_rice_source() -> ScriptedMealSource {
    ScriptedMealSource::new()
        .with_ingredient("chicken", &["52795", "52940", "52956", "52813"])
        .with_ingredient("rice", &["52956", "52813", "52940", "52823"])
        .with_meal(Meal::new("52795", "Chicken Handi", "t/52795.jpg", "Chicken"))
        .with_meal(Meal::new("52940", "Brown Stew Chicken", "t/52940.jpg", "Chicken"))
        .with_meal(Meal::new("52956", "Chicken Congee", "t/52956.jpg", "Chicken"))
        .with_meal(Meal::new("52813", "Kentucky Rice Pudding Breakfast", "t/52813.jpg", "Breakfast"))
        .with_meal(Meal::new("52823", "Salmon Prawn Risotto", "t/52823.jpg", "Seafood"))
}
