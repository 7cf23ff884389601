//! Adjacent `comments` and `ratings` collections.
//!
//! These resources are independently callable and are not wired into the
//! list/detail flows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::IdentityResolver;
use crate::error::Result;
use crate::gateway::SupabaseRecipeGateway;
use crate::models::RecipeId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub recipe_id: RecipeId,
    pub user_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
struct NewComment<'a> {
    recipe_id: &'a RecipeId,
    user_id: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct RatingRow {
    rating: i64,
}

#[derive(Debug, Serialize)]
struct NewRating<'a> {
    recipe_id: &'a RecipeId,
    user_id: &'a str,
    rating: i64,
}

/// Client-side aggregate of a recipe's ratings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingSummary {
    pub average: f64,
    pub count: usize,
}

/// Average a set of rating values; an empty set yields 0.0 / 0.
#[must_use]
pub fn summarize_ratings(ratings: &[i64]) -> RatingSummary {
    let count = ratings.len();
    if count == 0 {
        return RatingSummary {
            average: 0.0,
            count: 0,
        };
    }

    let sum: i64 = ratings.iter().sum();
    #[allow(clippy::cast_precision_loss)]
    let average = sum as f64 / count as f64;
    RatingSummary { average, count }
}

impl<R: IdentityResolver> SupabaseRecipeGateway<R> {
    pub async fn add_comment(&self, recipe_id: &RecipeId, content: &str) -> Result<()> {
        let session = self.resolver().require_live_session().await?;
        let payload = NewComment {
            recipe_id,
            user_id: &session.user.id,
            content,
        };

        let request = self
            .authed_request(
                self.http().post(self.collection_url("comments")),
                &session.access_token,
            )
            .json(&payload);

        Self::expect_success(request.send().await?).await?;
        Ok(())
    }

    /// Comments for one recipe, oldest first.
    pub async fn comments_for_recipe(&self, recipe_id: &RecipeId) -> Result<Vec<Comment>> {
        let request = self
            .anon_request(self.http().get(self.collection_url("comments")))
            .query(&[
                ("select", "*".to_string()),
                ("recipe_id", format!("eq.{recipe_id}")),
                ("order", "created_at.asc".to_string()),
            ]);

        let response = Self::expect_success(request.send().await?).await?;
        Ok(response.json::<Vec<Comment>>().await?)
    }

    /// Upsert the caller's rating, keyed by (recipe, user).
    pub async fn rate_recipe(&self, recipe_id: &RecipeId, rating: i64) -> Result<()> {
        let session = self.resolver().require_live_session().await?;
        let payload = NewRating {
            recipe_id,
            user_id: &session.user.id,
            rating,
        };

        let request = self
            .authed_request(
                self.http().post(self.collection_url("ratings")),
                &session.access_token,
            )
            .query(&[("on_conflict", "recipe_id,user_id")])
            .header("Prefer", "resolution=merge-duplicates")
            .json(&payload);

        Self::expect_success(request.send().await?).await?;
        Ok(())
    }

    pub async fn ratings_for_recipe(&self, recipe_id: &RecipeId) -> Result<Vec<i64>> {
        let request = self
            .anon_request(self.http().get(self.collection_url("ratings")))
            .query(&[
                ("select", "rating".to_string()),
                ("recipe_id", format!("eq.{recipe_id}")),
            ]);

        let response = Self::expect_success(request.send().await?).await?;
        let rows = response.json::<Vec<RatingRow>>().await?;
        Ok(rows.into_iter().map(|row| row.rating).collect())
    }

    pub async fn average_rating(&self, recipe_id: &RecipeId) -> Result<RatingSummary> {
        let ratings = self.ratings_for_recipe(recipe_id).await?;
        Ok(summarize_ratings(&ratings))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_ratings_summarize_to_zero() {
        let summary = summarize_ratings(&[]);
        assert_eq!(summary.count, 0);
        assert!((summary.average - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn ratings_average_is_arithmetic_mean() {
        let summary = summarize_ratings(&[5, 4, 3]);
        assert_eq!(summary.count, 3);
        assert!((summary.average - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn single_rating_is_its_own_average() {
        let summary = summarize_ratings(&[2]);
        assert_eq!(summary.count, 1);
        assert!((summary.average - 2.0).abs() < f64::EPSILON);
    }
}
