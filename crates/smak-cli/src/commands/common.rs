use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use smak_core::auth::{AuthProvider, SupabaseAuthClient};
use smak_core::config::ClientConfig;
use smak_core::drafts::JsonFileDraftStore;
use smak_core::format::{format_multiline, TextBlock};
use smak_core::gateway::SupabaseRecipeGateway;
use smak_core::{Recipe, RecipeId};

use crate::auth::SessionStore;
use crate::config_profiles::CliProfilesConfig;
use crate::error::CliError;

pub type CliGateway = SupabaseRecipeGateway<AuthProvider<SessionStore>>;

/// Everything a command needs to talk to the hosted backend.
pub struct Backend {
    pub gateway: Arc<CliGateway>,
    pub provider: AuthProvider<SessionStore>,
    pub profile_name: String,
}

pub fn connect(profile: Option<&str>) -> Result<Backend, CliError> {
    let config = CliProfilesConfig::load()?;
    let profile_name = config.resolve_profile_name(profile);
    let profile = config.profile(&profile_name).ok_or_else(|| {
        CliError::Config(format!(
            "Profile '{profile_name}' is not configured. Run `smak config init --profile {profile_name}` first."
        ))
    })?;

    let (url, anon_key) = ClientConfig {
        supabase_url: profile.supabase_url(),
        supabase_anon_key: profile.supabase_anon_key(),
    }
    .resolve()?;

    let gateway = SupabaseRecipeGateway::new(
        &url,
        anon_key.clone(),
        auth_provider(&profile_name, &url, &anon_key)?,
    )?;
    let provider = auth_provider(&profile_name, &url, &anon_key)?;
    tracing::debug!("Using profile '{}'", profile_name);

    Ok(Backend {
        gateway: Arc::new(gateway),
        provider,
        profile_name,
    })
}

fn auth_provider(
    profile_name: &str,
    url: &str,
    anon_key: &str,
) -> Result<AuthProvider<SessionStore>, CliError> {
    let client = SupabaseAuthClient::new(url, anon_key.to_string(), SessionStore::new(profile_name))
        .map_err(|error| CliError::Auth(error.to_string()))?;
    Ok(AuthProvider::new(client))
}

/// One fixed draft slot shared by every create-mode form run.
pub fn draft_store() -> JsonFileDraftStore {
    JsonFileDraftStore::new(default_draft_path())
}

fn default_draft_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("smak")
        .join("draft.json")
}

pub fn parse_recipe_id(raw: &str) -> Result<RecipeId, CliError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CliError::EmptyRecipeId);
    }
    trimmed
        .parse::<RecipeId>()
        .map_err(|_| CliError::InvalidRecipeId(trimmed.to_string()))
}

#[derive(Debug, Serialize)]
pub struct RecipeListItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub cooking_time: Option<i64>,
    pub created_at: String,
    pub owner_id: String,
}

pub fn recipe_to_list_item(recipe: &Recipe) -> RecipeListItem {
    RecipeListItem {
        id: recipe.id.to_string(),
        title: recipe.title.clone(),
        description: recipe.description.clone(),
        category: recipe.category.clone(),
        cooking_time: recipe.cooking_time,
        created_at: recipe.created_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        owner_id: recipe.owner_id.clone(),
    }
}

pub fn format_recipe_lines(recipes: &[Recipe]) -> Vec<String> {
    recipes
        .iter()
        .map(|recipe| {
            let id = recipe.id.to_string();
            let short_id = id.chars().take(8).collect::<String>();
            let title = title_preview(&recipe.title, 40);
            let date = recipe.created_at.format("%Y-%m-%d");
            format!("{short_id:<8}  {title:<40}  {:<10}  {date}", recipe.category)
        })
        .collect()
}

pub fn title_preview(title: &str, max_chars: usize) -> String {
    let collapsed = title.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= max_chars {
        collapsed
    } else {
        let take_len = max_chars.saturating_sub(3);
        let mut truncated = collapsed.chars().take(take_len).collect::<String>();
        truncated.push_str("...");
        truncated
    }
}

pub fn render_recipe_detail(recipe: &Recipe) -> Vec<String> {
    let mut lines = vec![
        recipe.title.clone(),
        format!(
            "{}  |  {}  |  {}",
            recipe.category,
            recipe
                .cooking_time
                .map_or_else(|| "time unknown".to_string(), |minutes| format!("{minutes} min")),
            recipe.created_at.format("%Y-%m-%d")
        ),
        String::new(),
        recipe.description.clone(),
    ];

    if let Some(ingredients) = recipe.ingredients.as_deref() {
        lines.push(String::new());
        lines.push("Ingredients:".to_string());
        match format_multiline(ingredients) {
            TextBlock::Paragraph(text) => lines.push(format!("  {}", text.trim())),
            TextBlock::Items(items) => {
                lines.extend(items.into_iter().map(|item| format!("  - {item}")));
            }
        }
    }

    if let Some(instructions) = recipe.instructions.as_deref() {
        lines.push(String::new());
        lines.push("Instructions:".to_string());
        match format_multiline(instructions) {
            TextBlock::Paragraph(text) => lines.push(format!("  {}", text.trim())),
            TextBlock::Items(items) => {
                lines.extend(
                    items
                        .into_iter()
                        .enumerate()
                        .map(|(index, step)| format!("  {}. {step}", index + 1)),
                );
            }
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    use super::*;

    fn sample_recipe() -> Recipe {
        Recipe {
            id: "11111111-1111-4111-8111-111111111111".parse().unwrap(),
            owner_id: "owner-1".to_string(),
            title: "Борщ".to_string(),
            description: "Класичний червоний борщ".to_string(),
            ingredients: Some("Буряк\nКапуста\nКартопля".to_string()),
            instructions: Some("Зварити бульйон\nДодати овочі".to_string()),
            cooking_time: Some(90),
            category: "Супи".to_string(),
            created_at: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
        }
    }

    #[test]
    fn parse_recipe_id_rejects_empty_and_garbage() {
        assert!(matches!(parse_recipe_id("  "), Err(CliError::EmptyRecipeId)));
        assert!(matches!(
            parse_recipe_id("not-a-uuid"),
            Err(CliError::InvalidRecipeId(_))
        ));
        assert!(parse_recipe_id(" 11111111-1111-4111-8111-111111111111 ").is_ok());
    }

    #[test]
    fn title_preview_truncates_with_ellipsis() {
        assert_eq!(title_preview("Short", 40), "Short");
        assert_eq!(
            title_preview("A very long recipe title that keeps going", 20),
            "A very long recip..."
        );
    }

    #[test]
    fn detail_renders_ingredients_as_bullets_and_steps_numbered() {
        let lines = render_recipe_detail(&sample_recipe());
        assert!(lines.contains(&"  - Буряк".to_string()));
        assert!(lines.contains(&"  1. Зварити бульйон".to_string()));
        assert!(lines.contains(&"  2. Додати овочі".to_string()));
    }

    #[test]
    fn detail_renders_single_line_sections_as_paragraphs() {
        let mut recipe = sample_recipe();
        recipe.ingredients = Some("Все готове".to_string());
        let lines = render_recipe_detail(&recipe);
        assert!(lines.contains(&"  Все готове".to_string()));
    }

    #[test]
    fn list_item_formats_timestamp() {
        let item = recipe_to_list_item(&sample_recipe());
        assert_eq!(item.created_at, "2023-11-14 22:13:20 UTC");
        assert_eq!(item.category, "Супи");
    }
}
