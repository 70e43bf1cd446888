//! coffeehouse CLI - drink menu lookups over a products/categories store
//!
//! - `drinks <CATEGORY>` lists unique drinks in a category, cheapest first
//! - `schema create|drop|seed` manages the two tables and the demo menu
//! - `completions <SHELL>` prints shell completion scripts

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use coffeehouse_core::{CoffeeHouse, StoreConfig};
use tracing::debug;

mod commands;
mod config;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "coffeehouse",
    author,
    version,
    about = "List the drinks of a menu category, deduplicated and sorted by price"
)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(long, global = true)]
    debug: bool,

    #[command(flatten)]
    store: StoreArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug)]
struct StoreArgs {
    /// Store URL, e.g. sqlite://menu.db?mode=rwc or postgres://host/db
    #[arg(long, global = true, env = "COFFEEHOUSE_DATABASE_URL")]
    database_url: Option<String>,

    /// Database user (network stores only)
    #[arg(long, global = true)]
    user: Option<String>,

    /// Database password (network stores only)
    #[arg(long, global = true)]
    password: Option<String>,

    /// Config file (default: ~/.coffeehouse/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List unique drinks in a category, cheapest first
    Drinks(commands::drinks::DrinksArgs),
    /// Create, drop or seed the store tables
    Schema(commands::schema::SchemaArgs),
    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(Parser, Debug)]
struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    shell: Shell,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)] // PowerShell is a proper noun, not a suffix
enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug }).ok();
    config::load_dotenv();

    match cli.command {
        Commands::Drinks(args) => {
            let house = open_house(cli.store)?;
            commands::run_drinks(&house, args).await?
        }
        Commands::Schema(args) => {
            let house = open_house(cli.store)?;
            commands::run_schema(&house, args).await?
        }
        Commands::Completions(args) => run_completions(args)?,
    }
    Ok(())
}

fn open_house(args: StoreArgs) -> Result<CoffeeHouse> {
    let mut store = StoreConfig::load_with_url(args.config.as_deref(), args.database_url)
        .context("failed to load store configuration")?;

    if let Some(user) = args.user {
        store.user = user;
    }
    if let Some(password) = args.password {
        store.password = password;
    }

    let house = CoffeeHouse::from_config(&store).context("invalid store configuration")?;
    debug!(?house, "store configured");
    Ok(house)
}

fn run_completions(args: CompletionsArgs) -> Result<()> {
    use clap::CommandFactory;
    use clap_complete::{generate, Shell as CompletionShell};
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();

    let shell = match args.shell {
        Shell::Bash => CompletionShell::Bash,
        Shell::Zsh => CompletionShell::Zsh,
        Shell::Fish => CompletionShell::Fish,
        Shell::PowerShell => CompletionShell::PowerShell,
        Shell::Elvish => CompletionShell::Elvish,
    };

    generate(shell, &mut cmd, bin_name, &mut io::stdout());

    Ok(())
}
