//! `particles` - CLI for the developer directory
//!
//! Opens the configured key-value store, mounts a directory view on it and
//! runs one command against the loaded records.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;
use clap::Parser;

use particles::cli::{AddCommand, Cli, Command, ConfigCommand, ListCommand, OutputFormat};
use particles::{
    init_logging, render, Config, DirectoryView, DraftField, NotificationQueue,
    NotificationSettings, SqliteStore, SubmitOutcome,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let config = Config::load_from(cli.config.clone()).context("loading configuration")?;

    match cli.command {
        Command::List(cmd) => handle_list(&config, &cmd).await,
        Command::Add(cmd) => handle_add(&config, &cmd).await,
        Command::Message(cmd) => handle_message(&config, &cmd.id).await,
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

/// Open the store and mount a view over it.
async fn mount(config: &Config) -> anyhow::Result<(DirectoryView, Arc<NotificationQueue>)> {
    let path = config.database_path();
    let store = SqliteStore::open(&path)
        .with_context(|| format!("opening key-value store at {}", path.display()))?;
    let queue = Arc::new(NotificationQueue::new());
    let view = DirectoryView::mount(
        Arc::new(store),
        queue.clone(),
        NotificationSettings::from(&config.notifications),
    )
    .await;
    Ok((view, queue))
}

fn print_notifications(queue: &NotificationQueue) {
    for notification in queue.drain_active(Utc::now()) {
        print!("{}", render::render_notification(&notification));
    }
}

fn print_records(view: &DirectoryView, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Plain => print!("{}", render::render_cards(view.filtered_records())),
        OutputFormat::Page => print!("{}", render::render_page(view.state())),
        OutputFormat::Json => println!("{}", render::render_json(view.filtered_records())?),
    }
    Ok(())
}

async fn handle_list(config: &Config, cmd: &ListCommand) -> anyhow::Result<()> {
    let (mut view, _queue) = mount(config).await?;
    if let Some(term) = &cmd.search {
        view.apply_filter(term);
    }
    print_records(&view, cmd.format)
}

async fn handle_add(config: &Config, cmd: &AddCommand) -> anyhow::Result<()> {
    let (mut view, queue) = mount(config).await?;

    view.edit_draft(DraftField::Name, cmd.name.as_str());
    view.edit_draft(DraftField::Location, cmd.location.as_str());
    view.edit_draft(DraftField::Technologies, cmd.technologies.as_str());

    if view.submit_new_record().await == SubmitOutcome::Added {
        print_notifications(&queue);
        if cmd.format != OutputFormat::Json {
            println!();
        }
    }
    print_records(&view, cmd.format)
}

async fn handle_message(config: &Config, id: &str) -> anyhow::Result<()> {
    let (view, queue) = mount(config).await?;
    view.message(id)?;
    print_notifications(&queue);
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:      {}", config.database_path().display());
                println!();
                println!("[Notifications]");
                println!("  Duration (ms):      {}", config.notifications.duration_ms);
                println!("  Closable:           {}", config.notifications.closable);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
