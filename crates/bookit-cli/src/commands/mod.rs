//! CLI command definitions and dispatch.

pub mod action;
pub mod config;
pub mod delete;
pub mod list;
pub mod mark;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use bookit_core::config::AppConfig;
use bookit_core::error::AppError;
use bookit_notify::HttpNotificationClient;

/// Bookit: inspect and manage marketplace notifications
#[derive(Debug, Parser)]
#[command(name = "bookit", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, env = "BOOKIT_CONFIG", default_value = "config/default.toml")]
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
    /// List notifications
    List(list::ListArgs),
    /// Show the unread count
    Unread,
    /// Mark a notification as read
    Read(mark::ReadArgs),
    /// Mark every notification as read
    ReadAll,
    /// Perform an action attached to a notification
    Act(action::ActArgs),
    /// Delete a notification
    Delete(delete::DeleteArgs),
    /// Delete every read notification
    DeleteRead(delete::DeleteReadArgs),
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::List(args) => list::execute(args, &self.config, self.format).await,
            Commands::Unread => list::unread(&self.config, self.format).await,
            Commands::Read(args) => mark::read(args, &self.config).await,
            Commands::ReadAll => mark::read_all(&self.config).await,
            Commands::Act(args) => action::execute(args, &self.config).await,
            Commands::Delete(args) => delete::delete(args, &self.config).await,
            Commands::DeleteRead(args) => delete::delete_read(args, &self.config).await,
            Commands::Config(args) => config::execute(args, &self.config, self.format),
        }
    }
}

/// Helper: load configuration from file
pub fn load_config(config_path: &str) -> Result<AppConfig, AppError> {
    AppConfig::load(config_path)
}

/// Helper: build the REST client from configuration
pub fn create_client(config_path: &str) -> Result<HttpNotificationClient, AppError> {
    let config = load_config(config_path)?;
    HttpNotificationClient::new(&config.api)
}
