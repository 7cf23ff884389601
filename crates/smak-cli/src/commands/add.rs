use smak_core::controllers::RecipeFormController;
use smak_core::drafts::DraftStore;
use smak_core::models::RecipeDraft;

use crate::cli::RecipeInput;
use crate::commands::common::{connect, draft_store};
use crate::error::CliError;

pub async fn run_add(
    input: RecipeInput,
    discard_draft: bool,
    profile: Option<&str>,
) -> Result<(), CliError> {
    let backend = connect(profile)?;
    let store = draft_store();
    if discard_draft {
        store.clear()?;
    }

    let controller =
        RecipeFormController::new(backend.gateway.clone(), backend.provider, store.clone());
    controller.open_create()?;
    apply_input(&controller, input);

    match controller.submit().await {
        Ok(outcome) => {
            println!("{}", outcome.recipe().id);
            Ok(())
        }
        Err(error) => {
            // Typed values survive the failure for the next attempt.
            let fields = controller.fields();
            store.save(&RecipeDraft::captured_now(
                fields.title,
                fields.description,
                fields.ingredients,
                fields.instructions,
                fields.cooking_time,
                fields.category,
            ))?;
            Err(error.into())
        }
    }
}

pub fn apply_input<G, R, S>(controller: &RecipeFormController<G, R, S>, input: RecipeInput)
where
    G: smak_core::gateway::RecipeGateway,
    R: smak_core::auth::IdentityResolver,
    S: DraftStore,
{
    if let Some(value) = input.title {
        controller.set_title(value);
    }
    if let Some(value) = input.description {
        controller.set_description(value);
    }
    if let Some(value) = input.ingredients {
        controller.set_ingredients(value);
    }
    if let Some(value) = input.instructions {
        controller.set_instructions(value);
    }
    if let Some(value) = input.cooking_time {
        controller.set_cooking_time(value);
    }
    if let Some(value) = input.category {
        controller.set_category(value);
    }
}
