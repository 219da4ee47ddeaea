use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use lugat_translator::{GenerativeBackend, ResolutionFlow};
use lugat_types::{AppEvent, UiEvent};
use tokio_util::sync::CancellationToken;

use crate::state::AppState;

pub mod cards;
pub mod create_card;
pub mod lookup;

use cards::{handle_card_list, handle_card_removal};
use create_card::handle_card_creation;
use lookup::handle_lookup;

/// App's main loop
pub async fn event_loop<B: GenerativeBackend>(
    state: Arc<AppState>,
    flow: Arc<ResolutionFlow<B>>,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    app_to_ui_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    app_to_ui_tx.send(AppEvent::BackendReady).await?;

    tracing::debug!("[EVENT_LOOP] Starting main loop, waiting for events");
    loop {
        let event = tokio::select! {
            event = ui_to_app_rx.recv() => event?,
            _ = cancel.cancelled() => {
                tracing::debug!("[EVENT_LOOP] Cancelled");
                return Ok(());
            }
        };

        tracing::debug!(
            "[EVENT_LOOP] EVENT RECEIVED: {:?}",
            std::mem::discriminant(&event)
        );

        if matches!(event, AppEvent::UiEvent(UiEvent::Close)) {
            tracing::debug!("[EVENT_LOOP] UI closed");
            return Ok(());
        }

        handle_events(&state, &flow, &app_to_ui_tx, event).await?;
    }
}

async fn handle_events<B: GenerativeBackend>(
    state: &Arc<AppState>,
    flow: &ResolutionFlow<B>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    event: AppEvent,
) -> anyhow::Result<()> {
    match event {
        AppEvent::Lookup(term) => {
            handle_lookup(state, flow, term, app_to_ui_tx).await?;
        }
        AppEvent::CreateCard(preview) => {
            handle_card_creation(state, preview, app_to_ui_tx).await?;
        }
        AppEvent::ListCards => {
            handle_card_list(state, app_to_ui_tx).await?;
        }
        AppEvent::RemoveCard(id) => {
            handle_card_removal(state, id, app_to_ui_tx).await?;
        }
        AppEvent::UiEvent(_)
        | AppEvent::ShowPreview(_)
        | AppEvent::LookupFailed(_)
        | AppEvent::CardCreated(_)
        | AppEvent::ShowCards(_)
        | AppEvent::CardRemoved { .. }
        | AppEvent::StatusUpdate(_)
        | AppEvent::BackendReady => {
            // UI-only events, ignore in backend
        }
    }

    Ok(())
}
