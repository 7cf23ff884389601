use smak_core::controllers::RecipeFormController;
use smak_core::gateway::RecipeGateway;

use crate::cli::RecipeInput;
use crate::commands::add::apply_input;
use crate::commands::common::{connect, draft_store, parse_recipe_id};
use crate::error::CliError;

pub async fn run_edit(id: &str, input: RecipeInput, profile: Option<&str>) -> Result<(), CliError> {
    let backend = connect(profile)?;
    let recipe_id = parse_recipe_id(id)?;
    let recipe = backend.gateway.get_by_id(&recipe_id).await?;

    let controller =
        RecipeFormController::new(backend.gateway.clone(), backend.provider, draft_store());
    controller.open_edit(&recipe)?;
    apply_input(&controller, input);

    let outcome = controller.submit().await?;
    println!("{}", outcome.recipe().id);
    Ok(())
}
