use std::sync::Arc;

use chrono::Utc;
use kanal::AsyncSender;
use lugat_types::{AppEvent, CardPreview};

use crate::state::AppState;

pub async fn handle_card_creation(
    state: &Arc<AppState>,
    preview: CardPreview,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let saved = state.records.lock().await.add(preview, Utc::now());

    let reply = match saved {
        Ok(record) => {
            state.status.write().await.cards_saved += 1;
            AppEvent::CardCreated(record)
        }
        Err(e) => {
            tracing::error!("Failed to persist card: {}", e);
            AppEvent::StatusUpdate(format!("Card kept for this session but not saved: {e}"))
        }
    };

    app_to_ui_tx.send(reply).await?;
    Ok(())
}
