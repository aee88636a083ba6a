//! Location details command.

use fruitwalk::model::LocationDetails;

use crate::error::CliError;
use crate::runner::CliRunner;

/// Run the details command.
pub async fn run(runner: &CliRunner, id: u64) -> Result<(), CliError> {
    runner.log_startup("details");

    let api = runner.create_api()?;
    let details = api.location_details(id).await?;
    print_details(&details);
    Ok(())
}

fn print_details(details: &LocationDetails) {
    println!("Location #{}", details.id);
    println!("  Position: {:.6}, {:.6}", details.lat, details.lng);
    if !details.type_ids.is_empty() {
        let ids: Vec<String> = details.type_ids.iter().map(u32::to_string).collect();
        println!("  Types:    {}", ids.join(", "));
    }
    if let Some(address) = &details.address {
        println!("  Address:  {}", address);
    }
    if let Some(access) = details.access {
        println!("  Access:   {}", access);
    }
    let season = details.fruiting_display();
    if !season.is_empty() {
        println!("  Season:   {}", season);
    }
    if let Some(author) = &details.author {
        println!("  Added by: {}", author);
    }
    if let Some(description) = &details.description {
        println!();
        println!("{}", description.trim());
    }
}
