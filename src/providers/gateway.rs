//! Request gateway: quota-checked calls to the generation proxy
//!
//! Every operation consumes one unit of the daily quota before touching the
//! network and always resolves to displayable text. Quota exhaustion, missing
//! fields, and transport failures each map to a fixed fallback message.

use super::base::{non_empty, Proxy};
use crate::assessment::AssessmentRequest;
use crate::companion::QuotaTracker;
use crate::storage::KeyValueStore;

/// Reply when the daily quota is used up
pub const DAILY_LIMIT_MESSAGE: &str = "You've reached your daily limit. Please try again tomorrow!";

/// Reply when the proxy cannot be reached or answers with an error
pub const SERVICE_UNAVAILABLE_MESSAGE: &str = "😪 AI is sleeping. Try again later!";

/// Reply when the chat endpoint answers without text
pub const NO_RESPONSE_MESSAGE: &str = "No response from the AI companion.";

/// Reply when the assessment endpoint answers without an analysis
pub const NO_ANALYSIS_MESSAGE: &str = "No analysis available.";

/// Prompt asking the model to open a conversation about `topic`
pub fn topic_prompt(topic: &str) -> String {
    format!(
        "As an AI therapist, provide an opening message about {}. \
         Offer a supportive introduction and ask 1-2 questions to start the \
         conversation about this topic.",
        topic
    )
}

/// Quota-aware front for a [`Proxy`]
pub struct RequestGateway<S: KeyValueStore> {
    proxy: Box<dyn Proxy>,
    quota: QuotaTracker<S>,
}

impl<S: KeyValueStore> RequestGateway<S> {
    /// Create a gateway over `proxy`, charging requests to `quota`
    pub fn new(proxy: Box<dyn Proxy>, quota: QuotaTracker<S>) -> Self {
        Self { proxy, quota }
    }

    /// Reply to a free-form chat prompt
    pub async fn generate_chat_response(&self, prompt: &str) -> String {
        if !self.quota.check_and_consume() {
            return DAILY_LIMIT_MESSAGE.to_string();
        }

        match self.proxy.chat(prompt).await {
            Ok(reply) => non_empty(reply.text).unwrap_or_else(|| NO_RESPONSE_MESSAGE.to_string()),
            Err(e) => {
                tracing::error!("Proxy error: {:#}", e);
                SERVICE_UNAVAILABLE_MESSAGE.to_string()
            }
        }
    }

    /// Analysis of completed assessment answers
    pub async fn generate_test_response(&self, request: &AssessmentRequest) -> String {
        if !self.quota.check_and_consume() {
            return DAILY_LIMIT_MESSAGE.to_string();
        }

        match self.proxy.analyze(request).await {
            Ok(reply) => {
                non_empty(reply.analysis).unwrap_or_else(|| NO_ANALYSIS_MESSAGE.to_string())
            }
            Err(e) => {
                tracing::error!("Proxy error: {:#}", e);
                SERVICE_UNAVAILABLE_MESSAGE.to_string()
            }
        }
    }

    /// Opening message for a conversation about `topic`
    pub async fn generate_topic_response(&self, topic: &str) -> String {
        if !self.quota.check_and_consume() {
            return DAILY_LIMIT_MESSAGE.to_string();
        }

        match self.proxy.chat(&topic_prompt(topic)).await {
            Ok(reply) => {
                non_empty(reply.text).unwrap_or_else(|| format!("Let's discuss about {}", topic))
            }
            Err(e) => {
                tracing::error!("Proxy error: {:#}", e);
                format!(
                    "I'd be happy to discuss {} with you. How would you like to start?",
                    topic
                )
            }
        }
    }

    /// Requests left today
    pub fn remaining_requests(&self) -> u32 {
        self.quota.remaining()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::Assessment;
    use crate::storage::MemoryStore;
    use crate::test_utils::{MockProxy, MockReply};

    fn build(reply: MockReply) -> (RequestGateway<MemoryStore>, MockProxy) {
        let proxy = MockProxy::new(reply);
        let gateway = RequestGateway::new(
            Box::new(proxy.clone()),
            QuotaTracker::new(MemoryStore::new()),
        );
        (gateway, proxy)
    }

    #[tokio::test]
    async fn test_chat_returns_text() {
        let (gateway, proxy) = build(MockReply::Text("Take a deep breath.".into()));
        let reply = gateway.generate_chat_response("I'm anxious").await;

        assert_eq!(reply, "Take a deep breath.");
        assert_eq!(proxy.prompts(), vec!["I'm anxious".to_string()]);
        assert_eq!(gateway.remaining_requests(), 9);
    }

    #[tokio::test]
    async fn test_chat_missing_text_falls_back() {
        let (gateway, _) = build(MockReply::Empty);
        assert_eq!(
            gateway.generate_chat_response("hi").await,
            NO_RESPONSE_MESSAGE
        );
    }

    #[tokio::test]
    async fn test_chat_failure_falls_back() {
        let (gateway, _) = build(MockReply::Fail);
        assert_eq!(
            gateway.generate_chat_response("hi").await,
            SERVICE_UNAVAILABLE_MESSAGE
        );
        assert_eq!(gateway.remaining_requests(), 9);
    }

    #[tokio::test]
    async fn test_quota_exhaustion_skips_proxy() {
        let proxy = MockProxy::new(MockReply::Text("ok".into()));
        let gateway = RequestGateway::new(
            Box::new(proxy.clone()),
            QuotaTracker::with_ceiling(MemoryStore::new(), 1),
        );

        assert_eq!(gateway.generate_chat_response("one").await, "ok");
        assert_eq!(
            gateway.generate_chat_response("two").await,
            DAILY_LIMIT_MESSAGE
        );
        assert_eq!(
            gateway.generate_topic_response("Sleep").await,
            DAILY_LIMIT_MESSAGE
        );
        assert_eq!(
            gateway.generate_test_response(&Assessment::new().request()).await,
            DAILY_LIMIT_MESSAGE
        );
        assert_eq!(proxy.calls(), 1);
    }

    #[tokio::test]
    async fn test_assessment_returns_analysis() {
        let (gateway, proxy) = build(MockReply::Text("You seem balanced.".into()));
        let mut assessment = Assessment::new();
        for answer in [0, 1, 0, 1] {
            assessment.answer(answer).unwrap();
        }

        let reply = gateway.generate_test_response(&assessment.request()).await;
        assert_eq!(reply, "You seem balanced.");
        assert_eq!(proxy.analyzed_answers(), vec![vec![0, 1, 0, 1]]);
    }

    #[tokio::test]
    async fn test_assessment_fallbacks() {
        let (gateway, _) = build(MockReply::Empty);
        let request = Assessment::new().request();
        assert_eq!(
            gateway.generate_test_response(&request).await,
            NO_ANALYSIS_MESSAGE
        );

        let (gateway, _) = build(MockReply::Fail);
        assert_eq!(
            gateway.generate_test_response(&request).await,
            SERVICE_UNAVAILABLE_MESSAGE
        );
    }

    #[tokio::test]
    async fn test_topic_sends_opening_prompt() {
        let (gateway, proxy) = build(MockReply::Text("Let's talk about sleep.".into()));
        let reply = gateway.generate_topic_response("Sleep Quality Improvement").await;

        assert_eq!(reply, "Let's talk about sleep.");
        let prompts = proxy.prompts();
        assert!(prompts[0].starts_with(
            "As an AI therapist, provide an opening message about Sleep Quality Improvement."
        ));
        assert!(prompts[0].ends_with("to start the conversation about this topic."));
    }

    #[tokio::test]
    async fn test_topic_fallbacks() {
        let (gateway, _) = build(MockReply::Empty);
        assert_eq!(
            gateway.generate_topic_response("Personal Growth").await,
            "Let's discuss about Personal Growth"
        );

        let (gateway, _) = build(MockReply::Fail);
        assert_eq!(
            gateway.generate_topic_response("Personal Growth").await,
            "I'd be happy to discuss Personal Growth with you. How would you like to start?"
        );
    }
}
