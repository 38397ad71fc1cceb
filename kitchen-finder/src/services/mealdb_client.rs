//! TheMealDB API client
//!
//! Two read-only endpoints:
//! - `GET {base}/filter.php?i={ingredient}`: meals containing an ingredient
//! - `GET {base}/lookup.php?i={id}`: full record for one meal
//!
//! Both answer `{"meals": null}` when nothing matches.

use crate::models::{Meal, MealSummary, MealsEnvelope};
use async_trait::async_trait;
use kitchen_common::config::FinderConfig;
use std::time::Duration;
use thiserror::Error;

const USER_AGENT: &str = concat!("kitchen-finder/", env!("CARGO_PKG_VERSION"));

/// Recipe database client errors
#[derive(Debug, Error)]
pub enum MealDbError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("API error {0}: {1}")]
    ApiError(u16, String),

    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Source of meal data
///
/// Implemented by [`MealDbClient`] for the live API and by in-memory fakes in
/// tests.
#[async_trait]
pub trait MealSource: Send + Sync {
    /// Meals containing `ingredient`; empty when the API reports none
    async fn meals_with_ingredient(&self, ingredient: &str)
        -> Result<Vec<MealSummary>, MealDbError>;

    /// Detailed record for `meal_id`; `None` when the API has no such meal
    async fn meal_details(&self, meal_id: &str) -> Result<Option<Meal>, MealDbError>;
}

/// HTTP client for TheMealDB
pub struct MealDbClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl MealDbClient {
    /// Create a client against `base_url`
    ///
    /// `request_timeout` of `None` leaves requests without a deadline; the
    /// connect timeout still applies.
    pub fn new(
        base_url: impl Into<String>,
        connect_timeout: Duration,
        request_timeout: Option<Duration>,
    ) -> Result<Self, MealDbError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(connect_timeout);

        if let Some(timeout) = request_timeout {
            builder = builder.timeout(timeout);
        }

        let http_client = builder
            .build()
            .map_err(|e| MealDbError::NetworkError(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &FinderConfig) -> Result<Self, MealDbError> {
        Self::new(
            config.mealdb_base_url.clone(),
            config.connect_timeout,
            config.request_timeout,
        )
    }

    fn endpoint(&self, name: &str) -> String {
        format!("{}/{}", self.base_url, name)
    }

    /// GET `{endpoint}?i={value}` and parse the meals envelope
    async fn fetch_meals(&self, endpoint: &str, value: &str) -> Result<Vec<MealSummary>, MealDbError> {
        let url = self.endpoint(endpoint);

        tracing::debug!(url = %url, i = %value, "Querying recipe database");

        let response = self
            .http_client
            .get(&url)
            .query(&[("i", value)])
            .send()
            .await
            .map_err(|e| MealDbError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(MealDbError::ApiError(status.as_u16(), error_text));
        }

        let body = response
            .text()
            .await
            .map_err(|e| MealDbError::NetworkError(e.to_string()))?;

        parse_meals_body(&body)
    }
}

#[async_trait]
impl MealSource for MealDbClient {
    async fn meals_with_ingredient(
        &self,
        ingredient: &str,
    ) -> Result<Vec<MealSummary>, MealDbError> {
        let meals = self.fetch_meals("filter.php", ingredient).await?;
        tracing::debug!(ingredient = %ingredient, count = meals.len(), "Ingredient lookup complete");
        Ok(meals)
    }

    async fn meal_details(&self, meal_id: &str) -> Result<Option<Meal>, MealDbError> {
        let meal = self
            .fetch_meals("lookup.php", meal_id)
            .await?
            .into_iter()
            .next()
            .map(MealSummary::into_meal);

        if meal.is_none() {
            tracing::debug!(meal_id = %meal_id, "Meal no longer available upstream");
        }
        Ok(meal)
    }
}

/// Parse a `{ "meals": [...] | null }` body; `null` or absent means empty
pub fn parse_meals_body(body: &str) -> Result<Vec<MealSummary>, MealDbError> {
    let envelope: MealsEnvelope =
        serde_json::from_str(body).map_err(|e| MealDbError::ParseError(e.to_string()))?;
    Ok(envelope.meals.unwrap_or_default())
}
