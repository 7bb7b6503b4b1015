use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod utils;

#[derive(Parser)]
#[command(name = "dynarr-cmd")]
#[command(about = "Command-line walkthroughs of the dynarr containers")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v for debug, -vv for reallocation traces)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay the push / resize / shrink_to_fit / clear walkthrough
    Scenario {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Push values one by one and report every capacity transition
    Growth {
        /// Number of values to push
        #[arg(short, long, default_value_t = 100)]
        count: usize,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Push the given values onto a stack, then pop until it is empty
    Stack {
        /// Values to push, bottom first
        values: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    utils::init_logger(cli.verbose)?;

    match cli.command {
        Commands::Scenario { json } => commands::scenario::run(json),
        Commands::Growth { count, json } => commands::growth::run(count, json),
        Commands::Stack { values } => commands::stack::run(values),
    }
}
