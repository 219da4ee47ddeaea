use std::ops::ControlFlow;

use async_trait::async_trait;
use futures_util::stream::{self, StreamExt};
use lugat_types::TranslationResult;

use crate::prompt::{build_prompt, decode_result};
use crate::{AttemptError, GenerativeBackend, ProviderMetadata, ResolutionError, Resolver};

/// Resolves through the generation service, one candidate model at a time
pub struct LiveResolver<'a, B> {
    backend: &'a B,
    credential: &'a str,
    candidates: &'a [String],
}

impl<'a, B: GenerativeBackend> LiveResolver<'a, B> {
    pub fn new(backend: &'a B, credential: &'a str, candidates: &'a [String]) -> Self {
        Self {
            backend,
            credential,
            candidates,
        }
    }

    async fn attempt(&self, model: &str, prompt: &str) -> Result<TranslationResult, AttemptError> {
        tracing::debug!("Trying model {model}");
        let text = self.backend.generate(self.credential, model, prompt).await?;
        decode_result(&text)
    }

    /// First candidate that gives a card wins; later ones are never called.
    /// When all fail, the model list is fetched to explain why.
    pub async fn resolve_term(&self, term: &str) -> Result<TranslationResult, ResolutionError> {
        let term = term.trim();
        if term.is_empty() {
            return Err(ResolutionError::EmptyTerm);
        }

        let prompt = build_prompt(term);
        let prompt = prompt.as_str();

        let outcome = stream::iter(self.candidates)
            .fold(ControlFlow::Continue(None), move |acc, model| async move {
                match acc {
                    ControlFlow::Break(found) => ControlFlow::Break(found),
                    ControlFlow::Continue(_) => match self.attempt(model, prompt).await {
                        Ok(result) => {
                            tracing::info!("Model {model} resolved {term:?}");
                            ControlFlow::Break(result)
                        }
                        Err(e) => {
                            if e.is_auth_failure() {
                                tracing::warn!("Model {model} rejected the API key: {e}");
                            } else {
                                tracing::warn!("Model {model} failed: {e}");
                            }
                            ControlFlow::Continue(Some(e))
                        }
                    },
                }
            })
            .await;

        match outcome {
            ControlFlow::Break(result) => Ok(result),
            ControlFlow::Continue(last_error) => Err(self.diagnose(last_error).await),
        }
    }

    /// Build the error for a lookup where every candidate failed
    async fn diagnose(&self, last_error: Option<AttemptError>) -> ResolutionError {
        let last_error = last_error.map(|e| e.to_string());

        tracing::info!("All candidate models failed, listing available models");
        match self.backend.list_models(self.credential).await {
            Ok(available) if !available.is_empty() => {
                ResolutionError::NoWorkingModel {
                    available,
                    last_error,
                }
            }
            Ok(_) => {
                tracing::warn!("Model list came back empty");
                ResolutionError::AllCandidatesFailed { last_error }
            }
            Err(e) => {
                tracing::warn!("Failed to list models: {e}");
                ResolutionError::AllCandidatesFailed { last_error }
            }
        }
    }
}

#[async_trait]
impl<'a, B: GenerativeBackend> Resolver for LiveResolver<'a, B> {
    async fn resolve(&self, term: &str) -> Result<TranslationResult, ResolutionError> {
        self.resolve_term(term).await
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "gemini".to_string(),
            simulated: false,
        }
    }
}
