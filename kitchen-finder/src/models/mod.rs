//! Domain models for meal search

pub mod filters;
pub mod meal;
pub mod search;

pub use filters::{CookingTime, FilterSelection, Mood, MOOD_OPTIONS, TIME_OPTIONS};
pub use meal::{Meal, MealSummary, MealsEnvelope};
pub use search::{SearchFailure, SearchState};
