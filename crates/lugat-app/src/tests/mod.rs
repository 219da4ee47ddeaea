use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use lugat_config::Config;
use lugat_store::{KeyValueStore, MemoryStore};
use lugat_translator::{AttemptError, GenerativeBackend, MockResolver, ResolutionFlow};

use crate::state::AppState;


pub const ELMA: &str =
    r#"{"translation":"Elma","language":"en","targetLang":"tr","example":"I eat an apple."}"#;

/// Backend with a fixed reply for every model
#[derive(Default)]
pub struct FakeBackend {
    pub reply: Option<String>,
    pub models: Vec<String>,
    pub generate_calls: AtomicUsize,
}

impl FakeBackend {
    pub fn answering(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            ..Default::default()
        }
    }

    pub fn failing_with_models(models: &[&str]) -> Self {
        Self {
            models: models.iter().map(|m| m.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.generate_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GenerativeBackend for FakeBackend {
    async fn generate(
        &self,
        _credential: &str,
        _model: &str,
        _prompt: &str,
    ) -> Result<String, AttemptError> {
        self.generate_calls.fetch_add(1, Ordering::SeqCst);
        self.reply.clone().ok_or(AttemptError::Api {
            status: 503,
            message: "model overloaded".into(),
        })
    }

    async fn list_models(&self, _credential: &str) -> Result<Vec<String>, AttemptError> {
        if self.models.is_empty() {
            Err(AttemptError::Api {
                status: 403,
                message: "listing denied".into(),
            })
        } else {
            Ok(self.models.clone())
        }
    }
}

pub fn flow(backend: FakeBackend) -> Arc<ResolutionFlow<FakeBackend>> {
    Arc::new(ResolutionFlow::new(
        backend,
        vec!["model-a".into(), "model-b".into()],
        MockResolver::new(Duration::ZERO),
    ))
}

pub fn state(store: Arc<MemoryStore>, force_mock: bool) -> Arc<AppState> {
    let store: Arc<dyn KeyValueStore> = store;
    Arc::new(AppState::new(Config::from_lookup(|_| None), store, force_mock))
}
