use std::sync::Arc;

use kanal::AsyncSender;
use lugat_types::AppEvent;
use uuid::Uuid;

use crate::state::AppState;

pub async fn handle_card_list(
    state: &Arc<AppState>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let cards = state.records.lock().await.list().to_vec();
    tracing::debug!("Sending {} cards", cards.len());

    app_to_ui_tx.send(AppEvent::ShowCards(cards)).await?;
    Ok(())
}

pub async fn handle_card_removal(
    state: &Arc<AppState>,
    id: Uuid,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let removed = state.records.lock().await.remove(id);

    let reply = match removed {
        Ok(found) => AppEvent::CardRemoved { id, found },
        Err(e) => {
            tracing::error!("Failed to persist removal of {id}: {e}");
            AppEvent::StatusUpdate(format!("Card removed for this session but not saved: {e}"))
        }
    };

    app_to_ui_tx.send(reply).await?;
    Ok(())
}
