use anyhow::Result;
use clap::{Parser, Subcommand};

mod cli;

/// caloriewise - Daily calorie tracking with AI meal planning
#[derive(Parser)]
#[command(name = "caloriewise")]
#[command(about = "Track daily calories and get AI generated meal plans", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Generate a meal plan for tomorrow and print it as markdown
    Plan {
        /// Comma separated list of preferred foods
        #[arg(long)]
        foods: String,

        /// Comma separated list of dietary restrictions
        #[arg(long)]
        restrictions: Option<String>,

        /// Daily calorie goal (defaults to the tracker goal)
        #[arg(long)]
        goal: Option<u32>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = caloriewise::config::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    caloriewise::observability::init_observability(
        "caloriewise",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
    )?;

    match cli.command {
        Commands::Serve { host, port } => cli::server::serve(config, host, port).await,
        Commands::Plan {
            foods,
            restrictions,
            goal,
        } => cli::plan::plan(config, foods, restrictions, goal).await,
    }
}
