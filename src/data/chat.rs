//! Gemini client backing the fitness chat assistant

use chrono::{DateTime, Local};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use super::decode_json;
use crate::error::ApiError;

/// Base URL for the generative language API
pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Model used when none is configured
pub const DEFAULT_MODEL: &str = "gemini-1.5-pro";

/// First message of every conversation
pub const GREETING: &str = "Hi! I'm FitBot, your personal fitness and nutrition assistant! Ask me anything about workouts, diet plans, or exercises.";

/// Framing prepended to every user question
const PROMPT_PREFIX: &str =
    "You are a fitness expert. Answer this question about fitness and exercise: ";

/// Who wrote a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// One line of the conversation
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub role: Role,
    pub text: String,
    pub timestamp: DateTime<Local>,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
            timestamp: Local::now(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
            timestamp: Local::now(),
        }
    }
}

/// Client for the `generateContent` endpoint
#[derive(Debug, Clone)]
pub struct ChatClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
}

impl ChatClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: GEMINI_BASE_URL.to_string(),
            api_key,
            model: DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Whether a credential is configured at all
    pub fn has_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }

    /// Ask the assistant a question and return its answer
    pub async fn ask(&self, question: &str) -> Result<String, ApiError> {
        let key = self
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(ApiError::MissingKey("Gemini"))?;

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        let response = self
            .client
            .post(url)
            .query(&[("key", key)])
            .json(&request_body(question))
            .send()
            .await?;

        let reply: GenerateResponse = decode_json(response).await?;
        extract_text(reply)
    }
}

fn request_body(question: &str) -> serde_json::Value {
    json!({
        "contents": [{
            "parts": [{ "text": format!("{}{}", PROMPT_PREFIX, question) }]
        }]
    })
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

/// Pulls `candidates[0].content.parts[0].text` out of a reply
fn extract_text(reply: GenerateResponse) -> Result<String, ApiError> {
    reply
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().next())
        .and_then(|part| part.text)
        .ok_or_else(|| ApiError::Malformed("Invalid response format from API".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_wraps_question() {
        let body = request_body("How many push-ups a day?");
        let text = body["contents"][0]["parts"][0]["text"].as_str().unwrap();

        assert!(text.starts_with("You are a fitness expert."));
        assert!(text.ends_with("How many push-ups a day?"));
    }

    #[test]
    fn test_extract_text() {
        let json = r#"{
            "candidates": [{
                "content": {"parts": [{"text": "Start with 3 sets of 10."}], "role": "model"},
                "finishReason": "STOP"
            }]
        }"#;

        let reply: GenerateResponse = serde_json::from_str(json).unwrap();
        assert_eq!(extract_text(reply).unwrap(), "Start with 3 sets of 10.");
    }

    #[test]
    fn test_no_candidates_is_malformed() {
        let reply: GenerateResponse =
            serde_json::from_str(r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#).unwrap();
        assert!(matches!(extract_text(reply), Err(ApiError::Malformed(_))));
    }

    #[test]
    fn test_candidate_without_content_is_malformed() {
        let reply: GenerateResponse =
            serde_json::from_str(r#"{"candidates": [{"finishReason": "SAFETY"}]}"#).unwrap();
        assert!(matches!(extract_text(reply), Err(ApiError::Malformed(_))));
    }

    #[test]
    fn test_has_key() {
        assert!(!ChatClient::new(None).has_key());
        assert!(!ChatClient::new(Some(String::new())).has_key());
        assert!(ChatClient::new(Some("k".to_string())).has_key());
    }

    #[tokio::test]
    async fn test_missing_key_fails_before_request() {
        let client = ChatClient::new(None).with_base_url("http://127.0.0.1:9");
        let result = client.ask("hello").await;
        assert!(matches!(result, Err(ApiError::MissingKey("Gemini"))));
    }

    #[test]
    fn test_message_constructors() {
        assert_eq!(ChatMessage::user("hi").role, Role::User);
        assert_eq!(ChatMessage::assistant(GREETING).role, Role::Assistant);
    }
}
