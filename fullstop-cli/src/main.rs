use anyhow::Result;
use clap::Parser;
use fullstop_cli::{Commands, ListCommands};

/// Split text into sentences in many languages
#[derive(Debug, Parser)]
#[command(name = "fullstop", version, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Process(args) => args.execute(),
        Commands::List { subcommand } => match subcommand {
            ListCommands::Languages => fullstop_cli::commands::list::languages(),
            ListCommands::Formats => fullstop_cli::commands::list::formats(),
        },
        Commands::Validate(args) => args.execute(),
        Commands::GenerateConfig(args) => args.execute(),
    }
}
