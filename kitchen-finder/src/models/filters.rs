//! User filter selection: mood and cooking time

use super::meal::Meal;

/// Mood selector labels, in display order
pub const MOOD_OPTIONS: [&str; 6] = ["Any mood", "Breakfast", "Lunch", "Dinner", "Dessert", "Snack"];

/// Cooking-time selector labels, in display order
pub const TIME_OPTIONS: [&str; 3] = ["Any time", "Quick", "Long"];

/// Names shorter than this count as "Quick"
///
/// There is no duration data upstream; name length is the only proxy.
pub const QUICK_NAME_LIMIT: usize = 20;

/// Mood preference
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Mood {
    #[default]
    Any,
    Breakfast,
    Lunch,
    Dinner,
    Dessert,
    Snack,
    /// Label outside the fixed list; accepts no category at all
    Unrecognized(String),
}

impl Mood {
    /// Parse a selector label. Empty and "Any mood" disable the filter.
    pub fn parse(label: &str) -> Self {
        match label {
            "" | "Any mood" => Mood::Any,
            "Breakfast" => Mood::Breakfast,
            "Lunch" => Mood::Lunch,
            "Dinner" => Mood::Dinner,
            "Dessert" => Mood::Dessert,
            "Snack" => Mood::Snack,
            other => Mood::Unrecognized(other.to_string()),
        }
    }

    /// Categories this mood keeps, or `None` when the filter is inactive
    pub fn acceptable_categories(&self) -> Option<&'static [&'static str]> {
        match self {
            Mood::Any => None,
            Mood::Breakfast => Some(&["Breakfast"]),
            Mood::Lunch => Some(&[
                "Beef",
                "Chicken",
                "Pasta",
                "Seafood",
                "Lamb",
                "Pork",
                "Miscellaneous",
            ]),
            Mood::Dinner => Some(&["Beef", "Chicken", "Seafood", "Lamb", "Pasta"]),
            Mood::Dessert => Some(&["Dessert"]),
            Mood::Snack => Some(&["Side", "Miscellaneous"]),
            Mood::Unrecognized(_) => Some(&[]),
        }
    }

    pub fn admits(&self, meal: &Meal) -> bool {
        match self.acceptable_categories() {
            None => true,
            Some(categories) => categories.contains(&meal.category.as_str()),
        }
    }
}

/// Cooking-time preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CookingTime {
    #[default]
    Any,
    Quick,
    Long,
}

impl CookingTime {
    /// Only "Quick" and "Long" enable the filter; anything else is Any
    pub fn parse(label: &str) -> Self {
        match label {
            "Quick" => CookingTime::Quick,
            "Long" => CookingTime::Long,
            _ => CookingTime::Any,
        }
    }

    pub fn admits(&self, meal: &Meal) -> bool {
        let length = meal.name.chars().count();
        match self {
            CookingTime::Any => true,
            CookingTime::Quick => length < QUICK_NAME_LIMIT,
            CookingTime::Long => length >= QUICK_NAME_LIMIT,
        }
    }
}

/// Filters chosen for one search
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterSelection {
    pub mood: Mood,
    pub cooking_time: CookingTime,
}

impl FilterSelection {
    pub fn new(mood: Mood, cooking_time: CookingTime) -> Self {
        Self { mood, cooking_time }
    }

    /// Build from raw selector labels
    pub fn from_labels(mood: &str, cooking_time: &str) -> Self {
        Self {
            mood: Mood::parse(mood),
            cooking_time: CookingTime::parse(cooking_time),
        }
    }
}
