use smak_core::gateway::RecipeGateway;

use crate::commands::common::{connect, parse_recipe_id};
use crate::error::CliError;

pub async fn run_delete(id: &str, profile: Option<&str>) -> Result<(), CliError> {
    let backend = connect(profile)?;
    let recipe_id = parse_recipe_id(id)?;
    backend.gateway.delete(&recipe_id).await?;
    println!("{recipe_id}");
    Ok(())
}
