//! CLI command definitions and dispatch.

pub mod migrate;
pub mod user;
pub mod walkthrough;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use docbase_core::config::AppConfig;
use docbase_core::error::AppError;
use docbase_core::traits::DocumentStore;

/// docbase: typed document repository over a shared collection
#[derive(Debug, Parser)]
#[command(name = "docbase-cli", version, about, long_about = None)]
pub struct Cli {
    /// Path to the base configuration file
    #[arg(short, long, default_value = "config/default")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run SQL migrations against PostgreSQL
    Migrate,
    /// User document management
    User(user::UserArgs),
    /// Narrated end-to-end repository lifecycle
    Walkthrough(walkthrough::WalkthroughArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Migrate => migrate::execute(&self.config).await,
            Commands::User(args) => user::execute(args, &self.config, self.format).await,
            Commands::Walkthrough(args) => {
                walkthrough::execute(args, &self.config, self.format).await
            }
        }
    }
}

/// Helper: load configuration with the `DOCBASE_ENV` overlay
pub fn load_config(config_path: &str) -> Result<AppConfig, AppError> {
    let env = std::env::var("DOCBASE_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(config_path, &env)
}

/// Helper: open the configured document store
pub async fn open_store(config: &AppConfig) -> Result<Arc<dyn DocumentStore>, AppError> {
    docbase_database::connect_store(config).await
}
