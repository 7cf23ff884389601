use crate::commands::common::{connect, parse_recipe_id};
use crate::error::CliError;

pub async fn run_comment(
    id: &str,
    text_parts: &[String],
    profile: Option<&str>,
) -> Result<(), CliError> {
    let content = text_parts.join(" ");
    let content = content.trim();
    if content.is_empty() {
        return Err(CliError::EmptyComment);
    }

    let backend = connect(profile)?;
    let recipe_id = parse_recipe_id(id)?;
    backend.gateway.add_comment(&recipe_id, content).await?;
    println!("Comment added");
    Ok(())
}

pub async fn run_rate(id: &str, stars: i64, profile: Option<&str>) -> Result<(), CliError> {
    if !(1..=5).contains(&stars) {
        return Err(CliError::RatingOutOfRange);
    }

    let backend = connect(profile)?;
    let recipe_id = parse_recipe_id(id)?;
    backend.gateway.rate_recipe(&recipe_id, stars).await?;

    let summary = backend.gateway.average_rating(&recipe_id).await?;
    println!("Rating: {:.1} ({} votes)", summary.average, summary.count);
    Ok(())
}
