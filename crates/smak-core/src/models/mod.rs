//! Data models for Smak

mod draft;
mod recipe;

pub use draft::{RecipeDraft, DRAFT_TTL_MS};
pub use recipe::{
    is_known_category, parse_cooking_time, NewRecipe, Recipe, RecipeId, CATEGORIES,
};
