//! Inventory command handler

use anyhow::{Context, Result};
use colored::*;

use crate::api::{MerakiClient, list_network_object_groups, list_network_objects};
use crate::config::Settings;

/// Print the organization's network objects and groups as JSON
pub async fn handle_inventory_command(settings: &Settings) -> Result<()> {
    let client = MerakiClient::from_context(&settings.context, &settings.base_url, settings.timeout)?;
    let ctx = &settings.context;

    let objects = list_network_objects(&client, ctx).await?;
    let groups = list_network_object_groups(&client, ctx).await?;

    println!(
        "{} ({})",
        "Network Objects".bold(),
        objects.len().to_string().cyan()
    );
    println!(
        "{}",
        serde_json::to_string_pretty(&objects).context("Failed to format JSON output")?
    );
    println!();
    println!(
        "{} ({})",
        "Network Object Groups".bold(),
        groups.len().to_string().cyan()
    );
    println!(
        "{}",
        serde_json::to_string_pretty(&groups).context("Failed to format JSON output")?
    );

    Ok(())
}
