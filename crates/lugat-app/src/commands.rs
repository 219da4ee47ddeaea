use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;
use lugat_translator::{GenerativeBackend, ResolutionFlow};
use lugat_types::CardPreview;
use tokio::io::{AsyncBufRead, AsyncWrite};
use uuid::Uuid;

use crate::cli::KeyAction;
use crate::render;
use crate::state::AppState;
use crate::terminal::Terminal;

pub mod quiz;

pub use quiz::run_quiz;

pub async fn lookup<B, R, W>(
    state: &Arc<AppState>,
    flow: &ResolutionFlow<B>,
    term: &str,
    save: bool,
    terminal: &mut Terminal<R, W>,
) -> anyhow::Result<()>
where
    B: GenerativeBackend,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let credential = state.lookup_credential();
    let result = flow.resolve(term, credential.as_deref()).await?;

    let preview = CardPreview::new(term, result);
    terminal.writeln(&render::preview(&preview)).await?;

    if save {
        let record = state
            .records
            .lock()
            .await
            .add(preview, Utc::now())
            .context("Failed to save card")?;
        terminal.writeln(&format!("Saved {}", record.id)).await?;
    }

    Ok(())
}

pub async fn list<R, W>(
    state: &Arc<AppState>,
    json: bool,
    terminal: &mut Terminal<R, W>,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let records = state.records.lock().await;
    let text = if json {
        serde_json::to_string_pretty(records.list())?
    } else {
        let show_examples = state.config.read().await.ui.show_examples;
        render::cards(records.list(), show_examples)
    };
    terminal.writeln(&text).await?;
    Ok(())
}

pub async fn remove<R, W>(
    state: &Arc<AppState>,
    id: Uuid,
    terminal: &mut Terminal<R, W>,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let found = state
        .records
        .lock()
        .await
        .remove(id)
        .context("Failed to save cards")?;

    if found {
        terminal.writeln(&format!("Removed {id}")).await?;
        Ok(())
    } else {
        anyhow::bail!("No card with id {id}")
    }
}

pub async fn key<B, R, W>(
    state: &Arc<AppState>,
    flow: &ResolutionFlow<B>,
    action: KeyAction,
    terminal: &mut Terminal<R, W>,
) -> anyhow::Result<()>
where
    B: GenerativeBackend,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    match action {
        KeyAction::Set { key } => {
            state.credential.set(&key).context("Failed to save API key")?;
            terminal.writeln("API key saved").await?;
        }
        KeyAction::Clear => {
            state.credential.clear().context("Failed to clear API key")?;
            terminal.writeln("API key cleared, lookups are offline now").await?;
        }
        KeyAction::Show => match state.credential.masked() {
            Some(masked) => terminal.writeln(&masked).await?,
            None => terminal.writeln("No API key set, lookups are offline").await?,
        },
        KeyAction::Test => {
            let key = state
                .credential
                .get()
                .context("No API key set. Use `lugat key set <key>` first")?;
            models(flow, &key, terminal).await?;
        }
    }
    Ok(())
}

/// Print the models a key can use, or the provider's complaint
pub async fn models<B, R, W>(
    flow: &ResolutionFlow<B>,
    key: &str,
    terminal: &mut Terminal<R, W>,
) -> anyhow::Result<()>
where
    B: GenerativeBackend,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let available = flow
        .list_models(key)
        .await
        .context("Connection test failed")?;

    if available.is_empty() {
        terminal.writeln("Connected, but no models are available to this key").await?;
        return Ok(());
    }

    terminal
        .writeln(&format!("Connected. {} models available:", available.len()))
        .await?;
    for model in &available {
        let marker = if flow.candidates().contains(model) { "*" } else { " " };
        terminal.writeln(&format!(" {marker} {model}")).await?;
    }
    Ok(())
}
