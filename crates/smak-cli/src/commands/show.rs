use smak_core::controllers::{DetailState, RecipeDetailController};
use smak_core::Recipe;

use crate::commands::common::{connect, parse_recipe_id, render_recipe_detail};
use crate::error::CliError;

pub async fn run_show(
    id: &str,
    with_comments: bool,
    as_json: bool,
    profile: Option<&str>,
) -> Result<(), CliError> {
    let backend = connect(profile)?;
    let recipe_id = parse_recipe_id(id)?;
    let controller = RecipeDetailController::new(
        backend.gateway.clone(),
        backend.provider,
        recipe_id.clone(),
    );

    let recipe: Recipe = match controller.load().await {
        DetailState::Loaded(recipe) => recipe,
        DetailState::Failed(message) => return Err(CliError::Recipe(message)),
        DetailState::Loading => return Err(CliError::Recipe("Failed to load recipe".to_string())),
    };

    if as_json {
        println!("{}", serde_json::to_string_pretty(&recipe)?);
    } else {
        for line in render_recipe_detail(&recipe) {
            println!("{line}");
        }
        if controller.viewer_is_owner().await {
            println!();
            println!("You own this recipe. Edit it with `smak edit {recipe_id}`.");
        }
    }

    if with_comments {
        let summary = backend.gateway.average_rating(&recipe_id).await?;
        println!();
        if summary.count == 0 {
            println!("No ratings yet");
        } else {
            println!("Rating: {:.1} ({} votes)", summary.average, summary.count);
        }

        let comments = backend.gateway.comments_for_recipe(&recipe_id).await?;
        if comments.is_empty() {
            println!("No comments yet");
        } else {
            for comment in comments {
                println!(
                    "[{}] {}",
                    comment.created_at.format("%Y-%m-%d"),
                    comment.content
                );
            }
        }
    }

    Ok(())
}
