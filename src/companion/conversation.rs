//! Conversation persistence
//!
//! Conversations are kept as a single JSON array under [`CHATS_KEY`]. Every
//! mutation reads the whole array, changes it, and writes it back.

use crate::error::{Result, SoulCareError};
use crate::storage::KeyValueStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Storage key for the conversation collection
pub const CHATS_KEY: &str = "soul_care_chats";

/// Preview shown for a conversation that has no saved messages yet
pub const PLACEHOLDER_PREVIEW: &str = "New conversation...";

/// Number of characters of the last message kept in a preview
pub const PREVIEW_CHARS: usize = 50;

/// Who sent a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The person using the companion
    User,
    /// The AI companion
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// One turn in a conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Sender of the message
    pub role: Role,
    /// Message text
    pub content: String,
    /// When the message was created
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Creates a user message stamped with the current time
    ///
    /// # Examples
    ///
    /// ```
    /// use soulcare::companion::{Message, Role};
    ///
    /// let msg = Message::user("I've been feeling tired");
    /// assert_eq!(msg.role, Role::User);
    /// ```
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Creates an assistant message stamped with the current time
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

/// A chat thread and its message history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    /// Unique id, issued by [`ConversationStore::create_new_chat`]
    pub id: u64,
    /// Display label
    pub title: String,
    /// Excerpt of the latest message
    pub preview: String,
    /// Full message history, oldest first
    #[serde(default)]
    pub messages: Vec<Message>,
    /// Time of the most recent save; `None` until first saved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}

/// Compute the preview for a message list
///
/// Takes the first [`PREVIEW_CHARS`] characters of the last message and
/// appends `"..."`. An empty list gets [`PLACEHOLDER_PREVIEW`].
///
/// # Examples
///
/// ```
/// use soulcare::companion::conversation::preview_for;
/// use soulcare::companion::Message;
///
/// let preview = preview_for(&[Message::user("Hello")]);
/// assert_eq!(preview, "Hello...");
/// ```
pub fn preview_for(messages: &[Message]) -> String {
    match messages.last() {
        Some(last) => {
            let mut preview: String = last.content.chars().take(PREVIEW_CHARS).collect();
            preview.push_str("...");
            preview
        }
        None => PLACEHOLDER_PREVIEW.to_string(),
    }
}

/// Key-by-id persistence of conversations
///
/// Identity is issued by [`create_new_chat`](Self::create_new_chat).
/// [`save_chat`](Self::save_chat) trusts the id it is given and overwrites
/// whatever conversation already carries it.
pub struct ConversationStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> ConversationStore<S> {
    /// Creates a conversation store over `store`
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns a fresh, unsaved conversation with the next free id
    ///
    /// The id is one more than the largest stored id, or `1` for an empty
    /// store. When the largest id is `u64::MAX` the smallest unused id is
    /// taken instead. Nothing is written until the conversation is saved.
    ///
    /// # Examples
    ///
    /// ```
    /// use soulcare::companion::ConversationStore;
    /// use soulcare::storage::MemoryStore;
    ///
    /// let store = ConversationStore::new(MemoryStore::new());
    /// let chat = store.create_new_chat();
    /// assert_eq!(chat.id, 1);
    /// assert_eq!(chat.title, "Chat 1");
    /// ```
    pub fn create_new_chat(&self) -> Conversation {
        let ids: Vec<u64> = self.get_all_chats().iter().map(|c| c.id).collect();
        let id = next_id(&ids);

        Conversation {
            id,
            title: format!("Chat {}", id),
            preview: PLACEHOLDER_PREVIEW.to_string(),
            messages: Vec::new(),
            last_updated: None,
        }
    }

    /// Upserts `conversation` with the full `messages` list
    ///
    /// Replaces the stored conversation with the same id in place, or
    /// appends if there is none. The preview and `last_updated` are
    /// recomputed. Returns the record as stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be encoded or written.
    pub fn save_chat(
        &self,
        conversation: &Conversation,
        messages: &[Message],
    ) -> Result<Conversation> {
        let mut chats = self.get_all_chats();

        let saved = Conversation {
            id: conversation.id,
            title: conversation.title.clone(),
            preview: preview_for(messages),
            messages: messages.to_vec(),
            last_updated: Some(Utc::now()),
        };

        match chats.iter_mut().find(|c| c.id == saved.id) {
            Some(existing) => *existing = saved.clone(),
            None => chats.push(saved.clone()),
        }

        self.write_all(&chats)?;
        tracing::debug!(id = saved.id, messages = messages.len(), "Saved conversation");
        Ok(saved)
    }

    /// All stored conversations in storage order
    ///
    /// Absent, unreadable, or corrupt data yields an empty list so the chat
    /// can always start.
    pub fn get_all_chats(&self) -> Vec<Conversation> {
        let raw = match self.store.get(CHATS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!("Error reading chats from storage: {}", e);
                return Vec::new();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!("Error decoding chats from storage: {}", e);
            Vec::new()
        })
    }

    /// The first stored conversation with `id`
    pub fn get_chat(&self, id: u64) -> Option<Conversation> {
        self.get_all_chats().into_iter().find(|c| c.id == id)
    }

    /// Removes the conversation with `id`, leaving the rest untouched
    pub fn delete_chat(&self, id: u64) -> Result<()> {
        let mut chats = self.get_all_chats();
        chats.retain(|c| c.id != id);
        self.write_all(&chats)
    }

    /// Removes every stored conversation
    pub fn clear_all_chats(&self) -> Result<()> {
        self.store.remove(CHATS_KEY)
    }

    fn write_all(&self, chats: &[Conversation]) -> Result<()> {
        let json = serde_json::to_string(chats).map_err(SoulCareError::from)?;
        self.store.set(CHATS_KEY, &json)
    }
}

fn next_id(ids: &[u64]) -> u64 {
    match ids.iter().max() {
        None => 1,
        Some(max) => max.checked_add(1).unwrap_or_else(|| smallest_unused_id(ids)),
    }
}

fn smallest_unused_id(ids: &[u64]) -> u64 {
    let mut sorted = ids.to_vec();
    sorted.sort_unstable();
    sorted.dedup();

    let mut candidate = 1;
    for id in sorted {
        if id == candidate {
            candidate = candidate.saturating_add(1);
        } else if id > candidate {
            break;
        }
    }
    candidate
}
