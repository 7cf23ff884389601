use smak_core::gateway::{RecipeFilter, RecipeGateway};

use crate::commands::common::{connect, format_recipe_lines, recipe_to_list_item, RecipeListItem};
use crate::error::CliError;

pub async fn run_list(
    search: Option<&str>,
    category: Option<&str>,
    limit: usize,
    as_json: bool,
    profile: Option<&str>,
) -> Result<(), CliError> {
    let backend = connect(profile)?;
    let filter = RecipeFilter {
        title_contains: search.map(str::to_string),
        category: category.map(str::to_string),
    }
    .normalized();

    let mut recipes = backend.gateway.list(&filter).await?;
    recipes.truncate(limit);

    if as_json {
        let items = recipes
            .iter()
            .map(recipe_to_list_item)
            .collect::<Vec<RecipeListItem>>();
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else if recipes.is_empty() {
        println!("No recipes found");
    } else {
        for line in format_recipe_lines(&recipes) {
            println!("{line}");
        }
    }

    Ok(())
}
