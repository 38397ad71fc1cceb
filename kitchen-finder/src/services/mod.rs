//! Search services: recipe database client, pipeline, result tracking

pub mod meal_finder;
pub mod mealdb_client;
pub mod search_tracker;

pub use meal_finder::MealFinder;
pub use mealdb_client::{MealDbClient, MealDbError, MealSource};
pub use search_tracker::{SearchTicket, SearchTracker};
