//! One interactive chat thread
//!
//! A session owns the conversation being shown, sends user turns through the
//! gateway, and saves the full history after every exchange.

use super::conversation::{Conversation, ConversationStore, Message};
use crate::error::{Result, SoulCareError};
use crate::providers::RequestGateway;
use crate::storage::KeyValueStore;

/// First message of every new conversation
pub const GREETING: &str = "Hello there! I'm here to support you. How are you feeling today?";

/// A conversation being carried on
#[derive(Debug, Clone)]
pub struct ChatSession {
    conversation: Conversation,
    messages: Vec<Message>,
}

impl ChatSession {
    /// Start a new conversation opened with the standard greeting
    ///
    /// The conversation is not stored until the first exchange.
    pub fn start<S: KeyValueStore>(store: &ConversationStore<S>) -> Self {
        let conversation = store.create_new_chat();
        tracing::info!(id = conversation.id, "Starting new conversation");
        Self {
            conversation,
            messages: vec![Message::assistant(GREETING)],
        }
    }

    /// Start a new conversation opened by the model on `topic`
    ///
    /// The opening message counts against the daily quota. The
    /// conversation is saved immediately so the topic is kept even if no
    /// reply follows.
    pub async fn start_with_topic<S, Q>(
        store: &ConversationStore<S>,
        gateway: &RequestGateway<Q>,
        topic: &str,
    ) -> Result<Self>
    where
        S: KeyValueStore,
        Q: KeyValueStore,
    {
        let conversation = store.create_new_chat();
        tracing::info!(id = conversation.id, topic, "Starting topic conversation");

        let opening = gateway.generate_topic_response(topic).await;
        let mut session = Self {
            conversation,
            messages: vec![Message::assistant(opening)],
        };
        session.save(store)?;
        Ok(session)
    }

    /// Continue a stored conversation
    ///
    /// # Errors
    ///
    /// Returns `SoulCareError::ConversationNotFound` if no conversation has `id`.
    pub fn resume<S: KeyValueStore>(store: &ConversationStore<S>, id: u64) -> Result<Self> {
        let conversation = store
            .get_chat(id)
            .ok_or(SoulCareError::ConversationNotFound(id))?;
        tracing::info!(id, messages = conversation.messages.len(), "Resuming conversation");

        let messages = conversation.messages.clone();
        Ok(Self {
            conversation,
            messages,
        })
    }

    /// Send a user message and return the companion's reply
    ///
    /// Both messages are appended and the conversation is saved. The reply
    /// may be a fallback text when the quota is spent or the proxy is down;
    /// those are stored like any other reply.
    ///
    /// # Errors
    ///
    /// Returns `SoulCareError::EmptyMessage` for blank input, or a storage
    /// error if saving fails. On a save failure the exchange is still kept
    /// in the session.
    pub async fn send<S, Q>(
        &mut self,
        store: &ConversationStore<S>,
        gateway: &RequestGateway<Q>,
        input: &str,
    ) -> Result<String>
    where
        S: KeyValueStore,
        Q: KeyValueStore,
    {
        let prompt = input.trim();
        if prompt.is_empty() {
            return Err(SoulCareError::EmptyMessage.into());
        }

        self.messages.push(Message::user(prompt));
        let reply = gateway.generate_chat_response(prompt).await;
        self.messages.push(Message::assistant(reply.clone()));

        self.save(store)?;
        Ok(reply)
    }

    /// Conversation id
    pub fn id(&self) -> u64 {
        self.conversation.id
    }

    /// Conversation title
    pub fn title(&self) -> &str {
        &self.conversation.title
    }

    /// Messages so far, oldest first
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    fn save<S: KeyValueStore>(&mut self, store: &ConversationStore<S>) -> Result<()> {
        self.conversation = store.save_chat(&self.conversation, &self.messages)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::companion::conversation::Role;
    use crate::companion::QuotaTracker;
    use crate::storage::MemoryStore;
    use crate::test_utils::{FailingStore, MockProxy, MockReply};
    use std::sync::Arc;

    fn gateway(reply: MockReply) -> RequestGateway<MemoryStore> {
        RequestGateway::new(
            Box::new(MockProxy::new(reply)),
            QuotaTracker::new(MemoryStore::new()),
        )
    }

    #[test]
    fn test_start_greets_without_saving() {
        let store = ConversationStore::new(MemoryStore::new());
        let session = ChatSession::start(&store);

        assert_eq!(session.id(), 1);
        assert_eq!(session.title(), "Chat 1");
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.messages()[0].content, GREETING);
        assert!(store.get_all_chats().is_empty());
    }

    #[tokio::test]
    async fn test_send_appends_and_saves() {
        let store = ConversationStore::new(MemoryStore::new());
        let gateway = gateway(MockReply::Text("That sounds hard.".into()));
        let mut session = ChatSession::start(&store);

        let reply = session.send(&store, &gateway, "  Rough day  ").await.unwrap();

        assert_eq!(reply, "That sounds hard.");
        let roles: Vec<Role> = session.messages().iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::Assistant, Role::User, Role::Assistant]);
        assert_eq!(session.messages()[1].content, "Rough day");

        let stored = store.get_chat(1).unwrap();
        assert_eq!(stored.messages, session.messages());
        assert_eq!(stored.preview, "That sounds hard....");
    }

    #[tokio::test]
    async fn test_send_rejects_blank_input() {
        let store = ConversationStore::new(MemoryStore::new());
        let gateway = gateway(MockReply::Text("unused".into()));
        let mut session = ChatSession::start(&store);

        let err = session.send(&store, &gateway, "   ").await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SoulCareError>(),
            Some(SoulCareError::EmptyMessage)
        ));
        assert_eq!(session.messages().len(), 1);
        assert_eq!(gateway.remaining_requests(), 10);
    }

    #[tokio::test]
    async fn test_send_stores_fallback_reply() {
        let store = ConversationStore::new(MemoryStore::new());
        let gateway = gateway(MockReply::Fail);
        let mut session = ChatSession::start(&store);

        let reply = session.send(&store, &gateway, "hello").await.unwrap();
        assert_eq!(reply, crate::providers::gateway::SERVICE_UNAVAILABLE_MESSAGE);
        assert_eq!(store.get_chat(1).unwrap().messages.len(), 3);
    }

    #[tokio::test]
    async fn test_send_reports_save_failure() {
        let store = ConversationStore::new(FailingStore);
        let gateway = gateway(MockReply::Text("ok".into()));
        let mut session = ChatSession::start(&store);

        assert!(session.send(&store, &gateway, "hello").await.is_err());
        assert_eq!(session.messages().len(), 3);
    }

    #[tokio::test]
    async fn test_resume_keeps_history() {
        let backing = Arc::new(MemoryStore::new());
        let store = ConversationStore::new(Arc::clone(&backing));
        let gateway = gateway(MockReply::Text("I'm listening.".into()));

        let mut first = ChatSession::start(&store);
        first.send(&store, &gateway, "hello").await.unwrap();

        let mut resumed = ChatSession::resume(&store, first.id()).unwrap();
        assert_eq!(resumed.messages().len(), 3);

        resumed.send(&store, &gateway, "still here").await.unwrap();
        let stored = store.get_chat(first.id()).unwrap();
        assert_eq!(stored.messages.len(), 5);
        assert_eq!(store.get_all_chats().len(), 1);
    }

    #[test]
    fn test_resume_missing_conversation() {
        let store = ConversationStore::new(MemoryStore::new());
        let err = ChatSession::resume(&store, 9).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SoulCareError>(),
            Some(SoulCareError::ConversationNotFound(9))
        ));
    }

    #[tokio::test]
    async fn test_start_with_topic_saves_opening() {
        let store = ConversationStore::new(MemoryStore::new());
        let gateway = gateway(MockReply::Text("Let's explore mindfulness.".into()));

        let session = ChatSession::start_with_topic(&store, &gateway, "Mindfulness Practices")
            .await
            .unwrap();

        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.messages()[0].content, "Let's explore mindfulness.");
        assert_eq!(store.get_chat(session.id()).unwrap().messages.len(), 1);
        assert_eq!(gateway.remaining_requests(), 9);
    }
}
