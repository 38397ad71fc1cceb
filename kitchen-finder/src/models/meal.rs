//! Meal records as returned by the recipe database

use serde::{Deserialize, Serialize};

/// Partial meal from an ingredient lookup
///
/// Ingredient lookups only guarantee the id; the other fields may be absent
/// or `null` depending on the endpoint. Field names follow TheMealDB, with
/// the generic names accepted as aliases.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MealSummary {
    #[serde(rename = "idMeal", alias = "id")]
    pub id: String,
    #[serde(rename = "strMeal", alias = "name", default)]
    pub name: Option<String>,
    #[serde(rename = "strMealThumb", alias = "thumbnailUrl", default)]
    pub thumbnail_url: Option<String>,
    #[serde(rename = "strCategory", alias = "category", default)]
    pub category: Option<String>,
}

impl MealSummary {
    /// Summary carrying only an id (test fixtures, id-only endpoints)
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            thumbnail_url: None,
            category: None,
        }
    }

    /// Promote a detail record to a [`Meal`]; missing text fields become empty
    pub fn into_meal(self) -> Meal {
        Meal {
            id: self.id,
            name: self.name.unwrap_or_default(),
            thumbnail_url: self.thumbnail_url.unwrap_or_default(),
            category: self.category.unwrap_or_default(),
        }
    }
}

/// Fully detailed meal
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Meal {
    pub id: String,
    pub name: String,
    pub thumbnail_url: String,
    pub category: String,
}

impl Meal {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        thumbnail_url: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            thumbnail_url: thumbnail_url.into(),
            category: category.into(),
        }
    }

    /// Human-readable recipe page, e.g. `https://www.themealdb.com/meal/52772`
    pub fn recipe_url(&self, site_url: &str) -> String {
        format!("{}/meal/{}", site_url.trim_end_matches('/'), self.id)
    }
}

/// `{ "meals": [...] | null }` envelope shared by both endpoints
#[derive(Debug, Deserialize)]
pub struct MealsEnvelope {
    #[serde(default)]
    pub meals: Option<Vec<MealSummary>>,
}
