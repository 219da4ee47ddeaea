use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use lugat_translator::{GenerativeBackend, ResolutionFlow};
use lugat_types::AppEvent;
use tokio::io::{AsyncBufRead, AsyncWrite};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::events::event_loop;
use crate::state::AppState;
use crate::terminal::Terminal;
use crate::ui::ui_loop;

/// Centralized channel management
pub struct ChannelSet {
    pub app_to_ui: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    pub ui_to_app: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
}

impl ChannelSet {
    pub fn new(capacity: usize) -> Self {
        Self {
            app_to_ui: kanal::bounded_async(capacity),
            ui_to_app: kanal::bounded_async(capacity),
        }
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>, capacity: usize) -> Self {
        Self {
            channels: ChannelSet::new(capacity),
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    pub fn spawn_tasks<B, R, W>(
        &self,
        flow: Arc<ResolutionFlow<B>>,
        terminal: Terminal<R, W>,
    ) -> JoinSet<anyhow::Result<()>>
    where
        B: GenerativeBackend + 'static,
        R: AsyncBufRead + Unpin + Send + 'static,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let mut tasks = JoinSet::new();

        // Event loop
        tasks.spawn(event_loop(
            self.state.clone(),
            flow,
            self.channels.ui_to_app.1.clone(),
            self.channels.app_to_ui.0.clone(),
            self.cancel_token.child_token(),
        ));

        // UI loop
        let app_to_ui_rx = self.channels.app_to_ui.1.clone();
        let ui_to_app_tx = self.channels.ui_to_app.0.clone();
        let config = self.state.config.clone();
        let cancel = self.cancel_token.child_token();
        tasks.spawn(async move {
            let mut terminal = terminal;
            ui_loop(&mut terminal, app_to_ui_rx, ui_to_app_tx, config, cancel).await
        });

        tasks
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
