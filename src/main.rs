use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use mealwise::cli;

/// mealwise - Shopping lists from meal plans
#[derive(Parser)]
#[command(name = "mealwise")]
#[command(about = "Consolidate planned recipes into a categorized shopping list", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Aggregate a JSON array of raw ingredients and print the result
    Aggregate {
        /// JSON file: [{"name": "Egg", "quantity": 2, "unit": null}, ...]
        #[arg(long)]
        input: PathBuf,
    },
    /// Rebuild a user's shopping list from the meals planned between two dates
    Generate {
        #[arg(long)]
        user: String,

        /// First day, YYYY-MM-DD
        #[arg(long)]
        start: String,

        /// Last day (inclusive), YYYY-MM-DD
        #[arg(long)]
        end: String,
    },
    /// Print the stored shopping list of a user
    List {
        #[arg(long)]
        user: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = mealwise::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    mealwise::observability::init_observability(
        "mealwise",
        env!("CARGO_PKG_VERSION"),
        &config.observability,
    )?;

    match cli.command {
        Commands::Migrate => cli::migrate::migrate(&config).await,
        Commands::Aggregate { input } => {
            let aggregated = cli::shopping::aggregate_file(&input)?;
            println!("{}", serde_json::to_string_pretty(&aggregated)?);

            Ok(())
        }
        Commands::Generate { user, start, end } => {
            let generated = cli::shopping::generate(&config, user, start, end).await?;
            println!("{}", serde_json::to_string_pretty(&generated)?);

            Ok(())
        }
        Commands::List { user } => {
            let items = cli::shopping::list(&config, &user).await?;
            print!("{}", cli::shopping::render_list(&items));

            Ok(())
        }
    }
}
