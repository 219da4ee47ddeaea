use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use lugat_config::Config;
use lugat_types::{AppEvent, CardPreview, UiEvent};
use tokio::io::{AsyncBufRead, AsyncWrite};
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::render;
use crate::terminal::{Terminal, is_yes};

const WELCOME: &str = "Type an English or Turkish word to translate it. :help for commands.";

const HELP: &str = "\
  <word>         look up a word and preview its card
  :list          show your collection
  :remove <id>   delete a card
  :help          show this help
  :quit          leave";

#[derive(Debug, PartialEq, Eq)]
enum Input {
    Empty,
    Quit,
    Help,
    List,
    Remove(Uuid),
    Invalid(String),
    Lookup(String),
}

fn parse_input(line: &str) -> Input {
    let line = line.trim();
    if line.is_empty() {
        return Input::Empty;
    }

    let Some(command) = line.strip_prefix(':') else {
        return Input::Lookup(line.to_string());
    };

    let mut parts = command.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some("q" | "quit" | "exit"), None) => Input::Quit,
        (Some("h" | "help"), None) => Input::Help,
        (Some("l" | "list"), None) => Input::List,
        (Some("rm" | "remove"), Some(id)) => match id.parse() {
            Ok(id) => Input::Remove(id),
            Err(_) => Input::Invalid(format!("Not a card id: {id}")),
        },
        _ => Input::Invalid(format!("Unknown command: {line}")),
    }
}

/// Interactive front end. One request is in flight at a time.
pub async fn ui_loop<R, W>(
    terminal: &mut Terminal<R, W>,
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    ui_to_app_tx: AsyncSender<AppEvent>,
    config: Arc<RwLock<Config>>,
    cancel: CancellationToken,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let (prompt, show_examples) = {
        let config = config.read().await;
        (config.ui.prompt.clone(), config.ui.show_examples)
    };

    terminal.writeln(WELCOME).await?;

    loop {
        let line = tokio::select! {
            line = terminal.ask(&prompt) => line?,
            _ = cancel.cancelled() => break,
        };
        let Some(line) = line else {
            terminal.writeln("").await?;
            break;
        };

        let request = match parse_input(&line) {
            Input::Empty => continue,
            Input::Quit => break,
            Input::Help => {
                terminal.writeln(HELP).await?;
                continue;
            }
            Input::Invalid(message) => {
                terminal.writeln(&message).await?;
                continue;
            }
            Input::List => AppEvent::ListCards,
            Input::Remove(id) => AppEvent::RemoveCard(id),
            Input::Lookup(term) => AppEvent::Lookup(term),
        };

        ui_to_app_tx.send(request).await?;
        let Some(reply) = await_reply(&app_to_ui_rx, &cancel).await? else {
            break;
        };

        match reply {
            AppEvent::ShowPreview(preview) => {
                if !offer_save(terminal, preview, &app_to_ui_rx, &ui_to_app_tx, &cancel).await? {
                    break;
                }
            }
            AppEvent::LookupFailed(message) => {
                terminal.writeln(&format!("Error: {message}")).await?;
            }
            AppEvent::ShowCards(cards) => {
                terminal.writeln(&render::cards(&cards, show_examples)).await?;
            }
            AppEvent::CardRemoved { id, found: true } => {
                terminal.writeln(&format!("Removed {id}")).await?;
            }
            AppEvent::CardRemoved { id, found: false } => {
                terminal.writeln(&format!("No card with id {id}")).await?;
            }
            AppEvent::StatusUpdate(message) => {
                terminal.writeln(&message).await?;
            }
            other => {
                tracing::warn!("Unexpected reply: {:?}", std::mem::discriminant(&other));
            }
        }
    }

    tracing::debug!("UI loop stopping");
    let _ = ui_to_app_tx.send(AppEvent::UiEvent(UiEvent::Close)).await;
    Ok(())
}

/// Show a preview and save it on confirmation.
/// Returns false when the session ended while waiting.
async fn offer_save<R, W>(
    terminal: &mut Terminal<R, W>,
    preview: CardPreview,
    app_to_ui_rx: &AsyncReceiver<AppEvent>,
    ui_to_app_tx: &AsyncSender<AppEvent>,
    cancel: &CancellationToken,
) -> anyhow::Result<bool>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    terminal.writeln(&render::preview(&preview)).await?;

    let answer = tokio::select! {
        answer = terminal.ask("Save as a flashcard? [y/N] ") => answer?,
        _ = cancel.cancelled() => return Ok(false),
    };
    let Some(answer) = answer else {
        return Ok(false);
    };
    if !is_yes(&answer) {
        return Ok(true);
    }

    ui_to_app_tx.send(AppEvent::CreateCard(preview)).await?;
    match await_reply(app_to_ui_rx, cancel).await? {
        Some(AppEvent::CardCreated(record)) => {
            terminal
                .writeln(&format!(
                    "Saved {} -> {} ({})",
                    record.term, record.translation, record.id
                ))
                .await?;
            Ok(true)
        }
        Some(AppEvent::StatusUpdate(message)) => {
            terminal.writeln(&message).await?;
            Ok(true)
        }
        Some(other) => {
            tracing::warn!("Unexpected reply: {:?}", std::mem::discriminant(&other));
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Next reply from the backend, `None` if cancelled first
async fn await_reply(
    app_to_ui_rx: &AsyncReceiver<AppEvent>,
    cancel: &CancellationToken,
) -> anyhow::Result<Option<AppEvent>> {
    loop {
        let event = tokio::select! {
            event = app_to_ui_rx.recv() => event?,
            _ = cancel.cancelled() => return Ok(None),
        };
        match event {
            AppEvent::BackendReady => tracing::debug!("Backend ready"),
            event => return Ok(Some(event)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_input() {
        assert_eq!(parse_input("   "), Input::Empty);
        assert_eq!(parse_input(" Apple "), Input::Lookup("Apple".into()));
        assert_eq!(parse_input("good morning"), Input::Lookup("good morning".into()));
        assert_eq!(parse_input(":q"), Input::Quit);
        assert_eq!(parse_input(":list"), Input::List);
        assert_eq!(parse_input(":help"), Input::Help);

        let id = Uuid::new_v4();
        assert_eq!(parse_input(&format!(":remove {id}")), Input::Remove(id));
        assert!(matches!(parse_input(":remove nope"), Input::Invalid(_)));
        assert!(matches!(parse_input(":dance"), Input::Invalid(_)));
    }
}
