//! swfir CLI - Export Sonarworks calibration projects as correction filters.

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "swfir")]
#[command(author, version, about = "Sonarworks .swproj correction exporter", long_about = None)]
struct Cli {
    /// Log debug detail to stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the channels and curves found in a project
    Info(commands::info::InfoArgs),

    /// Write impulse responses, CSV and GraphicEQ files for a project
    Export(commands::export::ExportArgs),

    /// Synthesize a single channel's impulse response
    Ir(commands::ir::IrArgs),

    /// Show or create the export configuration file
    Config(commands::config::ConfigArgs),
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Info(args) => commands::info::run(args),
        Commands::Export(args) => commands::export::run(args),
        Commands::Ir(args) => commands::ir::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
