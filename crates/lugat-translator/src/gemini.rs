use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::AttemptError;

/// The remote text-generation service
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    /// Run one prompt against one model and return the raw text
    async fn generate(
        &self,
        credential: &str,
        model: &str,
        prompt: &str,
    ) -> Result<String, AttemptError>;

    /// Models this credential may call
    async fn list_models(&self, credential: &str) -> Result<Vec<String>, AttemptError>;
}

/// Google `generativelanguage` REST client
#[derive(Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    api_base: String,
}

impl GeminiClient {
    pub fn new(api_base: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base,
        }
    }

    /// Client with a request timeout, transport default when `None`
    pub fn with_timeout(api_base: String, timeout: Option<Duration>) -> Result<Self, AttemptError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            api_base,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base.trim_end_matches('/'), path)
    }
}

#[async_trait]
impl GenerativeBackend for GeminiClient {
    async fn generate(
        &self,
        credential: &str,
        model: &str,
        prompt: &str,
    ) -> Result<String, AttemptError> {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
        };

        let response = self
            .client
            .post(self.endpoint(&format!("models/{model}:generateContent")))
            .query(&[("key", credential)])
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let body: GenerateResponse = response.json().await?;
        body.text().ok_or(AttemptError::EmptyResponse)
    }

    async fn list_models(&self, credential: &str) -> Result<Vec<String>, AttemptError> {
        let response = self
            .client
            .get(self.endpoint("models"))
            .query(&[("key", credential)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let body: ModelList = response.json().await?;
        Ok(body.model_ids())
    }
}

/// Turn a non-2xx response into an error, preferring the provider's message
async fn api_error(response: reqwest::Response) -> AttemptError {
    let status = response.status().as_u16();
    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => return AttemptError::Network(e),
    };
    AttemptError::Api {
        status,
        message: error_message(&body),
    }
}

fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => match envelope.error.status {
            Some(status) => format!("{} ({status})", envelope.error.message),
            None => envelope.error.message,
        },
        Err(_) if body.trim().is_empty() => "no error details".to_string(),
        Err(_) => body.trim().to_string(),
    }
}

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Serialize, Deserialize, Default)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

impl GenerateResponse {
    /// Text parts of the first candidate, concatenated
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();

        if text.trim().is_empty() { None } else { Some(text) }
    }
}

#[derive(Deserialize)]
struct ModelList {
    #[serde(default)]
    models: Vec<ModelInfo>,
}

#[derive(Deserialize)]
struct ModelInfo {
    name: String,
}

impl ModelList {
    fn model_ids(self) -> Vec<String> {
        self.models
            .into_iter()
            .map(|m| match m.name.strip_prefix("models/") {
                Some(id) => id.to_string(),
                None => m.name,
            })
            .collect()
    }
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    message: String,
    #[serde(default)]
    status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some("hi".into()),
                }],
            }],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json, serde_json::json!({ "contents": [{ "parts": [{ "text": "hi" }] }] }));
    }

    #[test]
    fn test_response_text_joins_parts() {
        let body: GenerateResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"```json\n{"},{"text":"}\n```"}],"role":"model"}}]}"#,
        )
        .unwrap();
        assert_eq!(body.text().as_deref(), Some("```json\n{}\n```"));
    }

    #[test]
    fn test_response_without_candidates_has_no_text() {
        let body: GenerateResponse =
            serde_json::from_str(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#).unwrap();
        assert_eq!(body.text(), None);
    }

    #[test]
    fn test_model_ids_strip_prefix() {
        let list: ModelList = serde_json::from_str(
            r#"{"models":[{"name":"models/gemini-2.0-flash","version":"001"},{"name":"tuned-x"}]}"#,
        )
        .unwrap();
        assert_eq!(list.model_ids(), vec!["gemini-2.0-flash", "tuned-x"]);
    }

    #[test]
    fn test_missing_models_is_empty() {
        let list: ModelList = serde_json::from_str("{}").unwrap();
        assert!(list.model_ids().is_empty());
    }

    #[test]
    fn test_error_message_prefers_provider_text() {
        let body = r#"{"error":{"code":400,"message":"API key not valid.","status":"INVALID_ARGUMENT"}}"#;
        assert_eq!(error_message(body), "API key not valid. (INVALID_ARGUMENT)");
        assert_eq!(error_message("Bad Gateway"), "Bad Gateway");
        assert_eq!(error_message(""), "no error details");
    }

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let client = GeminiClient::new("https://example.test/v1beta/".into());
        assert_eq!(
            client.endpoint("models/gemini-pro:generateContent"),
            "https://example.test/v1beta/models/gemini-pro:generateContent"
        );
    }
}
