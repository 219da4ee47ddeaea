use std::env;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use lugat_config::Config;
use lugat_store::{FileStore, KeyValueStore};
use lugat_translator::{GeminiClient, ResolutionFlow};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::signal;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt, reload};

pub mod cli;
pub mod commands;
pub mod controller;
pub mod events;
pub mod profile;
pub mod render;
pub mod state;
pub mod status;
pub mod terminal;
pub mod ui;

#[cfg(test)]
mod tests;

use self::cli::{Cli, Command, ProfileAction};
use self::controller::AppController;
use self::profile::ProfileStore;
use self::state::AppState;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let log_filter = init_tracing(&Config::new().log_filter);

    let mut config = profile::load_user_profile(&cli.profile).unwrap_or_else(|e| {
        tracing::warn!("Failed to load profile {}: {e:#}, using defaults", cli.profile);
        Config::default()
    });
    // Environment beats the profile, flags beat both
    config.apply_overrides(|key| env::var(key).ok());
    if let Some(data_dir) = &cli.data_dir {
        config.storage.data_dir = Some(data_dir.clone());
    }

    if let Err(e) = log_filter.reload(env_filter(&config.log_filter)) {
        tracing::warn!("Failed to apply log filter {:?}: {e}", config.log_filter);
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start the async runtime")?;

    let result = runtime.block_on(run(cli, config));

    // A pending stdin read must not keep the process alive
    runtime.shutdown_timeout(Duration::from_millis(100));
    result
}

/// Logs go to stderr so command output stays clean.
/// The filter can be swapped once the profile is loaded.
fn init_tracing(default_filter: &str) -> reload::Handle<EnvFilter, Registry> {
    let (filter, handle) = reload::Layer::new(env_filter(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(atty::is(atty::Stream::Stderr))
                .with_target(false),
        )
        .init();

    handle
}

/// `RUST_LOG` wins over the configured directive
fn env_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

async fn run(cli: Cli, config: Config) -> anyhow::Result<()> {
    let data_dir = match &config.storage.data_dir {
        Some(dir) => dir.clone(),
        None => FileStore::default_data_dir()?,
    };
    tracing::debug!("Data directory: {}", data_dir.display());

    let backend = GeminiClient::with_timeout(
        config.resolver.api_base.clone(),
        config.resolver.timeout_seconds.map(Duration::from_secs),
    )?;
    let flow = Arc::new(ResolutionFlow::from_config(backend, &config.resolver));

    let capacity = config.channel_capacity;
    let quiz_config = config.quiz.clone();
    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(data_dir));
    let state = Arc::new(AppState::new(config, store, cli.mock));

    let mut terminal = terminal::stdio();

    match cli.command.unwrap_or(Command::Repl) {
        Command::Repl => run_repl(state, flow, capacity).await,
        Command::Lookup { term, save } => {
            commands::lookup(&state, &flow, &term.join(" "), save, &mut terminal).await
        }
        Command::List { json } => commands::list(&state, json, &mut terminal).await,
        Command::Remove { id } => commands::remove(&state, id, &mut terminal).await,
        Command::Quiz => {
            let cards = state.records.lock().await.list().to_vec();
            let mut rng = StdRng::from_entropy();
            commands::run_quiz(&cards, &quiz_config, &mut rng, &mut terminal).await?;
            Ok(())
        }
        Command::Key { action } => commands::key(&state, &flow, action, &mut terminal).await,
        Command::Models { key } => {
            let key = key
                .or_else(|| state.credential.get())
                .context("No API key set. Pass --key or use `lugat key set <key>`")?;
            commands::models(&flow, &key, &mut terminal).await
        }
        Command::Profile { action } => match action {
            ProfileAction::Add { name } => {
                let path = ProfileStore::user()?.add_from_main(&name)?;
                terminal.writeln(&format!("Created {}", path.display())).await?;
                Ok(())
            }
            ProfileAction::Show => {
                let config = state.config.read().await;
                terminal.writeln(&serde_json::to_string_pretty(&*config)?).await?;
                Ok(())
            }
        },
    }
}

async fn run_repl(
    state: Arc<AppState>,
    flow: Arc<ResolutionFlow<GeminiClient>>,
    capacity: usize,
) -> anyhow::Result<()> {
    if state.lookup_credential().is_none() {
        tracing::info!("No API key set, lookups use the offline dictionary");
    }

    let controller = AppController::new(state.clone(), capacity);
    let mut tasks = controller.spawn_tasks(flow, terminal::stdio());

    tokio::select! {
        _ = signal::ctrl_c() => {
            tracing::info!("Shutdown requested");
        }
        Some(result) = tasks.join_next() => {
            match result {
                Ok(Ok(())) => tracing::debug!("session task exited"),
                Ok(Err(e)) => tracing::error!("session task failed: {e:#}"),
                Err(e) => tracing::error!("session task panicked: {e}"),
            }
        }
    }

    controller.shutdown();
    while let Some(result) = tasks.join_next().await {
        if let Ok(Err(e)) = result {
            tracing::error!("session task failed during shutdown: {e:#}");
        }
    }

    tracing::info!("Session: {}", state.status.read().await);
    Ok(())
}
