use std::time::Duration;

use lugat_config::resolver::ResolverConfig;
use lugat_types::TranslationResult;

use crate::{
    AttemptError, GenerativeBackend, LiveResolver, MockResolver, ResolutionError, Resolver,
};

/// Picks live or offline resolution for each lookup
pub struct ResolutionFlow<B> {
    backend: B,
    candidates: Vec<String>,
    mock: MockResolver,
}

impl<B: GenerativeBackend> ResolutionFlow<B> {
    pub fn new(backend: B, candidates: Vec<String>, mock: MockResolver) -> Self {
        Self {
            backend,
            candidates,
            mock,
        }
    }

    pub fn from_config(backend: B, config: &ResolverConfig) -> Self {
        Self::new(
            backend,
            config.candidate_models.clone(),
            MockResolver::new(Duration::from_millis(config.mock_delay_ms)),
        )
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Live resolver when a non-blank credential is given, the mock otherwise
    pub fn resolver<'a>(&'a self, credential: Option<&'a str>) -> Box<dyn Resolver + 'a> {
        match credential.map(str::trim).filter(|c| !c.is_empty()) {
            Some(key) => Box::new(LiveResolver::new(&self.backend, key, &self.candidates)),
            None => Box::new(self.mock.clone()),
        }
    }

    pub async fn resolve(
        &self,
        term: &str,
        credential: Option<&str>,
    ) -> Result<TranslationResult, ResolutionError> {
        if term.trim().is_empty() {
            return Err(ResolutionError::EmptyTerm);
        }

        let resolver = self.resolver(credential);
        let metadata = resolver.metadata();
        if metadata.simulated {
            tracing::info!("No API key found, using {} resolver", metadata.name);
        } else {
            tracing::debug!("Resolving with {}", metadata.name);
        }

        resolver.resolve(term).await
    }

    /// Models available to a credential, for connection checks
    pub async fn list_models(&self, credential: &str) -> Result<Vec<String>, AttemptError> {
        self.backend.list_models(credential.trim()).await
    }
}
