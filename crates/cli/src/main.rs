//! Zodiac CLI
//!
//! Main entry point for the zodiac command-line tool: sign lookup by birth
//! date and sign-tailored consultations over a reference document.

mod commands;

use clap::{Parser, Subcommand};
use commands::{AskCommand, ConsultCommand, SignCommand, SignsCommand};
use std::path::PathBuf;
use zodiac_core::config::{AppConfig, ConfigOverrides};
use zodiac_core::{logging, AppResult};

/// Zodiac consultation CLI - birth date to sign, sign to advice
#[derive(Parser, Debug)]
#[command(name = "zodiac")]
#[command(about = "Sign lookup and sign-tailored consultations", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to workspace directory (default: current directory)
    #[arg(short, long, global = true, env = "ZODIAC_WORKSPACE")]
    workspace: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long, global = true, env = "ZODIAC_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    no_color: bool,

    /// LLM provider
    #[arg(short, long, global = true, env = "ZODIAC_PROVIDER")]
    provider: Option<String>,

    /// Model identifier
    #[arg(short, long, global = true, env = "ZODIAC_MODEL")]
    model: Option<String>,

    /// Reference document to ingest
    #[arg(short, long, global = true, env = "ZODIAC_DOCUMENT")]
    document: Option<PathBuf>,

    /// CSV sign table replacing the built-in one
    #[arg(long, global = true, env = "ZODIAC_SIGNS")]
    signs: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the sign for a birth date
    Sign(SignCommand),

    /// List signs and their date ranges
    Signs(SignsCommand),

    /// Ask one question for a birth date
    Ask(AskCommand),

    /// Interactive consultation
    Consult(ConsultCommand),
}

#[tokio::main]
async fn main() -> AppResult<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(ConfigOverrides {
        workspace: cli.workspace,
        config_file: cli.config,
        provider: cli.provider,
        model: cli.model,
        document: cli.document,
        signs_table: cli.signs,
        log_level: cli.log_level,
        verbose: cli.verbose,
        no_color: cli.no_color,
    })?;

    logging::init_logging(config.log_level.as_deref(), config.log_format, config.no_color)?;

    tracing::info!("Zodiac CLI starting");
    tracing::debug!("Workspace: {:?}", config.workspace);
    tracing::debug!("Provider: {}", config.provider);
    tracing::debug!("Model: {}", config.model);

    let command_name = match &cli.command {
        Commands::Sign(_) => "sign",
        Commands::Signs(_) => "signs",
        Commands::Ask(_) => "ask",
        Commands::Consult(_) => "consult",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    let result = match cli.command {
        Commands::Sign(cmd) => cmd.execute(&config).await,
        Commands::Signs(cmd) => cmd.execute(&config).await,
        Commands::Ask(cmd) => cmd.execute(&config).await,
        Commands::Consult(cmd) => cmd.execute(&config).await,
    };

    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}
