//! Export configuration commands.

use anyhow::Context;
use clap::{Args, Subcommand};
use std::path::PathBuf;
use swfir_config::{CONFIG_FILE_NAME, ExportConfig, ensure_user_config_dir, user_config_file};

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Print the configuration that would be used
    Show {
        /// Configuration file to read instead of the user config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Write a configuration file with default settings
    Init {
        /// Where to write (default: the user config file)
        #[arg(long, value_name = "FILE")]
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the user config file location
    Path,
}

pub fn run(args: ConfigArgs) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show { config } => show(config),
        ConfigCommand::Init { path, force } => init(path, force),
        ConfigCommand::Path => {
            println!("{}", user_config_file().display());
            Ok(())
        }
    }
}

fn show(explicit: Option<PathBuf>) -> anyhow::Result<()> {
    let (config, source) =
        ExportConfig::discover(explicit.as_deref()).context("failed to load configuration")?;

    match source {
        Some(path) => println!("# Loaded from {}", path.display()),
        None => println!("# Defaults (no config file)"),
    }
    print!("{}", config.to_toml()?);

    if let Err(e) = config.validate() {
        eprintln!("Warning: {e}");
    }
    Ok(())
}

fn init(path: Option<PathBuf>, force: bool) -> anyhow::Result<()> {
    let path = match path {
        Some(path) => path,
        None => ensure_user_config_dir()?.join(CONFIG_FILE_NAME),
    };
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            path.display()
        );
    }

    ExportConfig::default().save(&path)?;
    println!("Wrote default configuration to {}", path.display());
    Ok(())
}
