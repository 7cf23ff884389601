//! Remote data gateway over the hosted PostgREST interface.
//!
//! Every call is a single request/response round trip with no local caching.
//! Mutating calls re-resolve the live identity through the injected
//! [`IdentityResolver`] so an expired session is never acted on.

mod social;

use reqwest::{Client, RequestBuilder, StatusCode};

use crate::auth::{parse_api_error, IdentityResolver};
use crate::error::{Error, Result};
use crate::models::{NewRecipe, Recipe, RecipeId};
use crate::util::{is_http_url, normalize_text_option};

pub use social::{summarize_ratings, Comment, RatingSummary};

/// Combined list criteria; both filters are optional and conjunctive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeFilter {
    /// Case-insensitive substring match against `title`
    pub title_contains: Option<String>,
    /// Exact category match
    pub category: Option<String>,
}

impl RecipeFilter {
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            title_contains: normalize_text_option(self.title_contains),
            category: normalize_text_option(self.category),
        }
    }
}

/// Editable recipe fields, as accepted by create/update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeFields {
    pub title: String,
    pub description: String,
    pub ingredients: String,
    pub instructions: String,
    pub cooking_time: Option<i64>,
    pub category: String,
}

/// Interface through which the application issues queries and mutations to
/// the remote recipe store.
#[allow(async_fn_in_trait)]
pub trait RecipeGateway {
    /// Filtered list, newest-created first.
    async fn list(&self, filter: &RecipeFilter) -> Result<Vec<Recipe>>;

    /// Single-record fetch; `Error::NotFound` when the row is absent.
    async fn get_by_id(&self, id: &RecipeId) -> Result<Recipe>;

    /// Insert; the store assigns `id` and `created_at`, the caller's live
    /// identity becomes the owner.
    async fn create(&self, fields: RecipeFields) -> Result<Recipe>;

    /// Partial update of the supplied fields only.
    async fn update(&self, id: &RecipeId, fields: RecipeFields) -> Result<Recipe>;

    async fn delete(&self, id: &RecipeId) -> Result<()>;
}

/// PostgREST-backed gateway for the `recipes` collection.
pub struct SupabaseRecipeGateway<R: IdentityResolver> {
    rest_url: String,
    anon_key: String,
    client: Client,
    resolver: R,
}

impl<R: IdentityResolver> SupabaseRecipeGateway<R> {
    pub fn new(url: impl AsRef<str>, anon_key: impl Into<String>, resolver: R) -> Result<Self> {
        let rest_url = normalize_rest_url(url.as_ref())?;
        let anon_key = anon_key.into().trim().to_string();
        if anon_key.is_empty() {
            return Err(Error::InvalidInput(
                "Supabase anon key must not be empty".to_string(),
            ));
        }

        Ok(Self {
            rest_url,
            anon_key,
            client: Client::builder().build().map_err(Error::Http)?,
            resolver,
        })
    }

    pub(crate) fn resolver(&self) -> &R {
        &self.resolver
    }

    pub(crate) const fn http(&self) -> &Client {
        &self.client
    }

    pub(crate) fn collection_url(&self, collection: &str) -> String {
        format!("{}/{collection}", self.rest_url)
    }

    /// Read requests run under the anon key.
    pub(crate) fn anon_request(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {}", self.anon_key))
    }

    /// Mutating requests carry the live session's access token.
    pub(crate) fn authed_request(
        &self,
        request: RequestBuilder,
        access_token: &str,
    ) -> RequestBuilder {
        request
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
    }

    pub(crate) async fn expect_success(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(Error::Remote(parse_api_error(status, &body)))
    }
}

impl<R: IdentityResolver> RecipeGateway for SupabaseRecipeGateway<R> {
    async fn list(&self, filter: &RecipeFilter) -> Result<Vec<Recipe>> {
        let request = self
            .anon_request(self.client.get(self.collection_url("recipes")))
            .query(&list_query_pairs(filter));

        let response = Self::expect_success(request.send().await?).await?;
        Ok(response.json::<Vec<Recipe>>().await?)
    }

    async fn get_by_id(&self, id: &RecipeId) -> Result<Recipe> {
        let request = self
            .anon_request(self.client.get(self.collection_url("recipes")))
            .query(&[
                ("select", "*".to_string()),
                ("id", format!("eq.{id}")),
            ])
            .header("Accept", "application/vnd.pgrst.object+json");

        let response = request.send().await?;
        if response.status() == StatusCode::NOT_ACCEPTABLE
            || response.status() == StatusCode::NOT_FOUND
        {
            return Err(Error::NotFound(id.to_string()));
        }

        let response = Self::expect_success(response).await?;
        Ok(response.json::<Recipe>().await?)
    }

    async fn create(&self, fields: RecipeFields) -> Result<Recipe> {
        let session = self.resolver.require_live_session().await?;
        let payload = NewRecipe {
            title: fields.title,
            description: fields.description,
            ingredients: fields.ingredients,
            instructions: fields.instructions,
            cooking_time: fields.cooking_time,
            category: fields.category,
            user_id: session.user.id,
        };

        let request = self
            .authed_request(
                self.client.post(self.collection_url("recipes")),
                &session.access_token,
            )
            .header("Prefer", "return=representation")
            .header("Accept", "application/vnd.pgrst.object+json")
            .json(&payload);

        let response = Self::expect_success(request.send().await?).await?;
        Ok(response.json::<Recipe>().await?)
    }

    async fn update(&self, id: &RecipeId, fields: RecipeFields) -> Result<Recipe> {
        let session = self.resolver.require_live_session().await?;
        // owner_id is immutable; only the editable fields go on the wire.
        let payload = serde_json::json!({
            "title": fields.title,
            "description": fields.description,
            "ingredients": fields.ingredients,
            "instructions": fields.instructions,
            "cooking_time": fields.cooking_time,
            "category": fields.category,
        });

        let request = self
            .authed_request(
                self.client.patch(self.collection_url("recipes")),
                &session.access_token,
            )
            .query(&[("id", format!("eq.{id}"))])
            .header("Prefer", "return=representation")
            .header("Accept", "application/vnd.pgrst.object+json")
            .json(&payload);

        let response = request.send().await?;
        if response.status() == StatusCode::NOT_ACCEPTABLE {
            return Err(Error::NotFound(id.to_string()));
        }

        let response = Self::expect_success(response).await?;
        Ok(response.json::<Recipe>().await?)
    }

    async fn delete(&self, id: &RecipeId) -> Result<()> {
        let session = self.resolver.require_live_session().await?;
        let request = self
            .authed_request(
                self.client.delete(self.collection_url("recipes")),
                &session.access_token,
            )
            .query(&[("id", format!("eq.{id}"))]);

        Self::expect_success(request.send().await?).await?;
        Ok(())
    }
}

/// Query parameters for a filtered, ordered list call.
///
/// Kept as a pure function so query construction is unit-testable without a
/// network round trip.
#[must_use]
pub fn list_query_pairs(filter: &RecipeFilter) -> Vec<(String, String)> {
    let mut pairs = vec![
        ("select".to_string(), "*".to_string()),
        ("order".to_string(), "created_at.desc".to_string()),
    ];

    if let Some(term) = normalize_text_option(filter.title_contains.clone()) {
        pairs.push(("title".to_string(), format!("ilike.*{term}*")));
    }
    if let Some(category) = normalize_text_option(filter.category.clone()) {
        pairs.push(("category".to_string(), format!("eq.{category}")));
    }

    pairs
}

pub(crate) fn normalize_rest_url(url: &str) -> Result<String> {
    let trimmed = url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(Error::InvalidInput(
            "Supabase URL must not be empty".to_string(),
        ));
    }
    if !is_http_url(trimmed) {
        return Err(Error::InvalidInput(
            "Supabase URL must include http:// or https://".to_string(),
        ));
    }
    if trimmed.ends_with("/rest/v1") {
        Ok(trimmed.to_string())
    } else {
        Ok(format!("{trimmed}/rest/v1"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn query_pairs_without_filters_select_and_order_only() {
        let pairs = list_query_pairs(&RecipeFilter::default());
        assert_eq!(
            pairs,
            vec![
                ("select".to_string(), "*".to_string()),
                ("order".to_string(), "created_at.desc".to_string()),
            ]
        );
    }

    #[test]
    fn query_pairs_wrap_search_term_in_wildcards() {
        let filter = RecipeFilter {
            title_contains: Some("борщ".to_string()),
            category: None,
        };
        let pairs = list_query_pairs(&filter);
        assert!(pairs.contains(&("title".to_string(), "ilike.*борщ*".to_string())));
    }

    #[test]
    fn query_pairs_combine_search_and_category_conjunctively() {
        let filter = RecipeFilter {
            title_contains: Some("суп".to_string()),
            category: Some("Супи".to_string()),
        };
        let pairs = list_query_pairs(&filter);
        assert_eq!(pairs.len(), 4);
        assert!(pairs.contains(&("title".to_string(), "ilike.*суп*".to_string())));
        assert!(pairs.contains(&("category".to_string(), "eq.Супи".to_string())));
    }

    #[test]
    fn query_pairs_drop_blank_filters() {
        let filter = RecipeFilter {
            title_contains: Some("   ".to_string()),
            category: Some(String::new()),
        };
        let pairs = list_query_pairs(&filter);
        assert_eq!(pairs.len(), 2);
    }

    #[test]
    fn normalize_rest_url_appends_rest_path() {
        let normalized = normalize_rest_url("https://demo.supabase.co").unwrap();
        assert_eq!(normalized, "https://demo.supabase.co/rest/v1");
    }

    #[test]
    fn normalize_rest_url_keeps_existing_rest_path() {
        let normalized = normalize_rest_url("https://demo.supabase.co/rest/v1/").unwrap();
        assert_eq!(normalized, "https://demo.supabase.co/rest/v1");
    }

    #[test]
    fn normalize_rest_url_rejects_bare_host() {
        assert!(normalize_rest_url("demo.supabase.co").is_err());
    }

    #[test]
    fn filter_normalization_removes_empty_values() {
        let filter = RecipeFilter {
            title_contains: Some("  ".to_string()),
            category: Some(" Супи ".to_string()),
        }
        .normalized();
        assert_eq!(filter.title_contains, None);
        assert_eq!(filter.category, Some("Супи".to_string()));
    }
}
