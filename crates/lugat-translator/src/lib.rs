mod error;
pub mod flow;
pub mod gemini;
pub mod live;
pub mod mock;
pub mod prompt;

pub use error::{AttemptError, ResolutionError};
pub use flow::ResolutionFlow;
pub use gemini::{GeminiClient, GenerativeBackend};
pub use live::LiveResolver;
pub use mock::MockResolver;

use lugat_types::TranslationResult;

/// Turns a term into a translation card
#[async_trait::async_trait]
pub trait Resolver: Send + Sync {
    /// Detect the term's language and translate it to the other one
    async fn resolve(&self, term: &str) -> Result<TranslationResult, ResolutionError>;

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
    /// Results are canned, not produced by a model
    pub simulated: bool,
}
