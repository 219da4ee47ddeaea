use std::sync::Arc;

use kanal::AsyncSender;
use lugat_translator::{GenerativeBackend, ResolutionFlow};
use lugat_types::{AppEvent, CardPreview};

use crate::state::AppState;

pub async fn handle_lookup<B: GenerativeBackend>(
    state: &Arc<AppState>,
    flow: &ResolutionFlow<B>,
    term: String,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    tracing::info!("Looking up {:?}", term);

    let credential = state.lookup_credential();
    let outcome = flow.resolve(&term, credential.as_deref()).await;

    let reply = match outcome {
        Ok(result) => {
            state.status.write().await.record_lookup(Ok(()));
            AppEvent::ShowPreview(CardPreview::new(term, result))
        }
        Err(e) => {
            tracing::error!("Lookup failed: {e}");
            let message = e.to_string();
            state.status.write().await.record_lookup(Err(message.clone()));
            AppEvent::LookupFailed(message)
        }
    };

    app_to_ui_tx.send(reply).await?;
    Ok(())
}
