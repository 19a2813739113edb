//! Proxy trait and wire types for the remote generation service
//!
//! The service is a thin proxy in front of a generative model. It exposes
//! two JSON endpoints: a chat path taking `{"prompt": ...}` and answering
//! `{"text": ...}`, and an assessment path taking the quiz questions and
//! answers and answering `{"analysis": ...}`.

use crate::assessment::AssessmentRequest;
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Body of a chat request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Text forwarded to the model
    pub prompt: String,
}

/// Body of a chat response
///
/// `text` is optional on the wire; a missing or empty value means the
/// service produced nothing usable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    /// Generated reply
    #[serde(default)]
    pub text: Option<String>,
}

/// Body of an assessment response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReply {
    /// Generated analysis of the answers
    #[serde(default)]
    pub analysis: Option<String>,
}

/// Transport to the remote generation proxy
///
/// Implementations report every failure (network, status, decoding) as an
/// error; turning those into user-facing text is the gateway's job.
#[async_trait]
pub trait Proxy: Send + Sync {
    /// Send a prompt to the chat endpoint
    async fn chat(&self, prompt: &str) -> Result<ChatReply>;

    /// Send quiz questions and answers to the assessment endpoint
    async fn analyze(&self, request: &AssessmentRequest) -> Result<AnalysisReply>;
}

/// Returns the string if it is present and non-empty
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_serializes_prompt() {
        let body = serde_json::to_value(ChatRequest {
            prompt: "hello".to_string(),
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"prompt": "hello"}));
    }

    #[test]
    fn test_chat_reply_missing_text() {
        let reply: ChatReply = serde_json::from_str("{}").unwrap();
        assert_eq!(reply.text, None);
    }

    #[test]
    fn test_analysis_reply_ignores_unknown_fields() {
        let reply: AnalysisReply =
            serde_json::from_str(r#"{"analysis":"calm","model":"x"}"#).unwrap();
        assert_eq!(reply.analysis.as_deref(), Some("calm"));
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(Some("hi".into())), Some("hi".to_string()));
        assert_eq!(non_empty(Some(String::new())), None);
        assert_eq!(non_empty(None), None);
    }
}
