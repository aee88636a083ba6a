//! FruitWalk CLI - Command-line interface
//!
//! Drives the FruitWalk map engine from a described camera and browses
//! Falling Fruit locations and types.

mod commands;
mod error;
mod runner;

use clap::{Parser, Subcommand};

use commands::config::ConfigCommands;
use commands::view::ViewArgs;
use error::CliError;
use runner::CliRunner;

#[derive(Parser)]
#[command(name = "fruitwalk")]
#[command(version = fruitwalk::VERSION)]
#[command(about = "Find fruit to forage near you", long_about = None)]
struct Cli {
    /// Mirror log output to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the map for one viewport and list what it shows
    View(ViewArgs),

    /// Show everything known about one location
    Details {
        /// Location id
        id: u64,
    },

    /// List fruit types
    Types,

    /// Configuration management
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        e.exit();
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    // Config commands skip logging so a broken log directory can still be fixed
    match cli.command {
        Commands::Config { command } => commands::config::run(command),
        Commands::View(args) => {
            let runner = CliRunner::new(cli.verbose)?;
            commands::view::run(&runner, args).await
        }
        Commands::Details { id } => {
            let runner = CliRunner::new(cli.verbose)?;
            commands::details::run(&runner, id).await
        }
        Commands::Types => {
            let runner = CliRunner::new(cli.verbose)?;
            commands::types::run(&runner).await
        }
    }
}
