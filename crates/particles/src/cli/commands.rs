//! CLI command definitions.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Only show developers whose name, location or technology contains this
    #[arg(short, long)]
    pub search: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Add command arguments. Mirrors the three fields of the add form.
#[derive(Debug, Args)]
pub struct AddCommand {
    /// Developer name (also the storage key; an existing name is replaced)
    #[arg(short, long)]
    pub name: String,

    /// Developer location
    #[arg(short, long, default_value = "")]
    pub location: String,

    /// Comma-separated technologies, e.g. "React, Node"
    #[arg(short, long, default_value = "")]
    pub technologies: String,

    /// Output format for the refreshed list
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Message command arguments.
#[derive(Debug, Args)]
pub struct MessageCommand {
    /// Id of the developer to message
    pub id: String,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Output format for commands that print records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Developer cards only
    #[default]
    Plain,
    /// Full page: header, search box, cards and add form
    Page,
    /// JSON array of records
    Json,
}
