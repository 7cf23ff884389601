//! Recipe model

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A unique identifier for a recipe, assigned by the remote store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeId(Uuid);

impl RecipeId {
    /// Get the string representation of this ID
    #[must_use]
    pub fn as_str(&self) -> String {
        self.0.to_string()
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecipeId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// The fixed category label set.
///
/// Category is a closed, client-validated enumeration; the remote store is
/// trusted to hold only these labels and is not asked to re-validate them.
pub const CATEGORIES: [&str; 8] = [
    "Десерти",
    "Основні",
    "Супи",
    "Гарніри",
    "Салати",
    "М'ясне",
    "Закрутки",
    "Закуски",
];

/// Check whether a label belongs to the fixed category set.
#[must_use]
pub fn is_known_category(label: &str) -> bool {
    CATEGORIES.contains(&label)
}

/// A recipe row as stored in the remote `recipes` collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    /// Unique identifier, assigned by the store on insert
    pub id: RecipeId,
    /// Identity of the creator; grants edit rights
    #[serde(rename = "user_id")]
    pub owner_id: String,
    pub title: String,
    pub description: String,
    /// Newline-delimited list, optional
    #[serde(default)]
    pub ingredients: Option<String>,
    /// Newline-delimited list, optional
    #[serde(default)]
    pub instructions: Option<String>,
    /// Minutes, positive when present
    #[serde(default)]
    pub cooking_time: Option<i64>,
    pub category: String,
    /// Assigned by the store on insert
    pub created_at: DateTime<Utc>,
}

/// Insert/update payload for the `recipes` collection.
///
/// The store assigns `id` and `created_at`; `user_id` carries the identity
/// resolved at submit time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewRecipe {
    pub title: String,
    pub description: String,
    pub ingredients: String,
    pub instructions: String,
    pub cooking_time: Option<i64>,
    pub category: String,
    pub user_id: String,
}

/// Parse a typed cooking time into minutes.
///
/// Empty, non-numeric, and non-positive inputs all map to `None`; the remote
/// store may still reject the payload on its own terms.
#[must_use]
pub fn parse_cooking_time(raw: &str) -> Option<i64> {
    let minutes: i64 = raw.trim().parse().ok()?;
    if minutes >= 1 {
        Some(minutes)
    } else {
        None
    }
}
