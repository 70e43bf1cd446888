//! Category listing
//!
//! Command: drinks <CATEGORY>

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use coffeehouse_core::{CoffeeHouse, Drink};
use tracing::info;

#[derive(Parser, Debug)]
pub struct DrinksArgs {
    /// Category name (exact, case-sensitive match)
    pub category: String,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// One `name<TAB>price` line per drink
    Text,
    /// JSON array of drinks
    Json,
}

pub async fn run_drinks(house: &CoffeeHouse, args: DrinksArgs) -> Result<()> {
    let drinks = house
        .list_drinks_by_category(&args.category)
        .await
        .with_context(|| format!("failed to list drinks in category '{}'", args.category))?;

    info!(category = %args.category, count = drinks.len(), "listed drinks");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_drinks(&mut out, &drinks, args.format)?;
    Ok(())
}

fn write_drinks(out: &mut impl Write, drinks: &[Drink], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for drink in drinks {
                writeln!(out, "{}\t{}", drink.name, drink.price)?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, drinks)?;
            writeln!(out)?;
        }
    }
    Ok(())
}
