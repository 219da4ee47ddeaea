/// Why a single request to the generation service did not give a card
#[derive(Debug, thiserror::Error)]
pub enum AttemptError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Empty response")]
    EmptyResponse,

    #[error("Response is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    /// Parsed as JSON but not as a card
    #[error("Malformed response: {0}")]
    Malformed(String),
}

impl AttemptError {
    /// Rejected key or missing permission, retrying other models won't help
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, AttemptError::Api { status: 401 | 403, .. })
    }
}

/// The only error a lookup reports to the user
#[derive(Debug, thiserror::Error)]
pub enum ResolutionError {
    #[error("Term is empty")]
    EmptyTerm,

    #[error(
        "No model worked. Models available to this API key:\n{}\nConfigure one of them as a candidate model.",
        .available.join(", ")
    )]
    NoWorkingModel {
        available: Vec<String>,
        last_error: Option<String>,
    },

    #[error(
        "Models failed and the model list could not be fetched.\nLast error: {}",
        .last_error.as_deref().unwrap_or("no candidate models configured")
    )]
    AllCandidatesFailed { last_error: Option<String> },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_working_model_lists_models() {
        let err = ResolutionError::NoWorkingModel {
            available: vec!["m1".into(), "m2".into()],
            last_error: None,
        };
        let message = err.to_string();
        assert!(message.contains("m1, m2"));
    }

    #[test]
    fn test_all_failed_carries_last_error() {
        let err = ResolutionError::AllCandidatesFailed {
            last_error: Some("API error (HTTP 429): quota".into()),
        };
        assert!(err.to_string().contains("HTTP 429"));

        let err = ResolutionError::AllCandidatesFailed { last_error: None };
        assert!(err.to_string().contains("no candidate models configured"));
    }

    #[test]
    fn test_auth_failure_classification() {
        let forbidden = AttemptError::Api {
            status: 403,
            message: "API key not valid".into(),
        };
        let missing = AttemptError::Api {
            status: 404,
            message: "model not found".into(),
        };
        assert!(forbidden.is_auth_failure());
        assert!(!missing.is_auth_failure());
        assert!(!AttemptError::EmptyResponse.is_auth_failure());
    }
}
