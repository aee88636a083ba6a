//! Fruit type listing command.

use fruitwalk::model::FruitType;

use crate::error::CliError;
use crate::runner::CliRunner;

/// Run the types command.
pub async fn run(runner: &CliRunner) -> Result<(), CliError> {
    runner.log_startup("types");

    let api = runner.create_api()?;
    let mut types = api.fruit_types().await?;
    types.retain(|t| !t.pending);
    types.sort_by(|a, b| sort_key(a).cmp(&sort_key(b)));

    println!("{} fruit types", types.len());
    for fruit_type in &types {
        match fruit_type.scientific_names.first() {
            Some(scientific) => println!(
                "  {:>6}  {} ({})",
                fruit_type.id,
                fruit_type.name().unwrap_or("?"),
                scientific
            ),
            None => println!("  {:>6}  {}", fruit_type.id, fruit_type.name().unwrap_or("?")),
        }
    }
    Ok(())
}

fn sort_key(fruit_type: &FruitType) -> String {
    fruit_type.name().unwrap_or_default().to_lowercase()
}
