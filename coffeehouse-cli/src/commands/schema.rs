//! Store setup commands
//!
//! Commands: schema create | drop | seed

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use coffeehouse_core::{schema, CoffeeHouse};

#[derive(Parser, Debug)]
pub struct SchemaArgs {
    #[command(subcommand)]
    pub command: SchemaCommands,
}

#[derive(Subcommand, Debug)]
pub enum SchemaCommands {
    /// Create the products and categories tables if missing
    Create,
    /// Drop the products and categories tables
    Drop,
    /// Insert the demo menu (creates tables first)
    Seed,
}

pub async fn run_schema(house: &CoffeeHouse, args: SchemaArgs) -> Result<()> {
    match args.command {
        SchemaCommands::Create => schema::create(house)
            .await
            .context("failed to create schema")?,
        SchemaCommands::Drop => schema::drop(house).await.context("failed to drop schema")?,
        SchemaCommands::Seed => {
            schema::create(house)
                .await
                .context("failed to create schema")?;
            schema::seed_demo_menu(house)
                .await
                .context("failed to seed demo menu")?;
        }
    }
    Ok(())
}
