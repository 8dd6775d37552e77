use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "laneline", version, about = "Laneline timeline CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Day-number conversions
    Date {
        #[command(subcommand)]
        action: commands::date::DateAction,
    },
    /// Pack items from a JSON file into lanes
    Lanes(commands::lanes::LanesArgs),
    /// Tick step for a pixel density
    Ticks(commands::ruler::TicksArgs),
    /// Ruler labels for the span of an item file
    Ruler(commands::ruler::RulerArgs),
    /// Apply a start/end/name commit to an item file
    Commit(commands::commit::CommitArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Date { action } => commands::date::run(action),
        Commands::Lanes(args) => commands::lanes::run(args),
        Commands::Ticks(args) => commands::ruler::run_ticks(args),
        Commands::Ruler(args) => commands::ruler::run_ruler(args),
        Commands::Commit(args) => commands::commit::run(args),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
