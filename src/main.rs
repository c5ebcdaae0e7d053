mod cli;
mod config;
mod error;
mod models;
mod quotes;
mod reminder;
mod store;
mod utils;

use anyhow::{Context, Result};
use clap::Parser;

use cli::args::{Cli, Commands};
use cli::handlers;
use config::AppConfig;
use store::HabitStore;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut config = AppConfig::load().context("Loading config")?;
    let data_dir = AppConfig::ensure_data_dir()?;

    let profile = cli.profile.as_deref().unwrap_or(&config.profile);
    let mut store = HabitStore::open(data_dir, profile)
        .with_context(|| format!("Opening habit store for profile {:?}", profile))?;

    match cli.command {
        Commands::Add {
            name,
            total,
            freq,
            remind,
        } => handlers::handle_add(&mut store, &name, total, &freq, remind.as_deref())?,
        Commands::List => handlers::handle_list(&store)?,
        Commands::Done { index } => handlers::handle_done(&mut store, index)?,
        Commands::Delete { index } => handlers::handle_delete(&mut store, index)?,
        Commands::Edit {
            index,
            name,
            total,
            freq,
            remind,
        } => handlers::handle_edit(
            &mut store,
            index,
            name.as_deref(),
            total,
            freq.as_deref(),
            remind.as_deref(),
        )?,
        Commands::Stats => handlers::handle_stats(&store)?,
        Commands::Export => handlers::handle_export(&store)?,
        Commands::Profile { action } => {
            handlers::handle_profile(&store, &mut config, action.as_ref())?
        }
        Commands::Remind => handlers::handle_remind(&mut store)?,
    }

    Ok(())
}
