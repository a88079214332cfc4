//! The fixed set of place categories a search can target.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Place category, mapped onto the provider's place-type strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Restaurant,
    Cafe,
    Bar,
    Bakery,
    Takeaway,
}

impl Category {
    /// The type string the places API expects for this category.
    #[must_use]
    pub fn as_place_type(self) -> &'static str {
        match self {
            Category::Restaurant => "restaurant",
            Category::Cafe => "cafe",
            Category::Bar => "bar",
            Category::Bakery => "bakery",
            Category::Takeaway => "meal_takeaway",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_place_type())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "restaurant" => Ok(Category::Restaurant),
            "cafe" => Ok(Category::Cafe),
            "bar" => Ok(Category::Bar),
            "bakery" => Ok(Category::Bakery),
            "takeaway" | "meal_takeaway" => Ok(Category::Takeaway),
            other => Err(format!(
                "unknown category '{other}' (expected one of: restaurant, cafe, bar, bakery, takeaway)"
            )),
        }
    }
}
