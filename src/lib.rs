//! SoulCare - terminal mental-wellness companion library
//!
//! This library provides the core of the SoulCare companion: a per-day
//! request quota, conversation persistence, and a gateway to the remote
//! generation proxy, plus the stress assessment and CLI handlers built on
//! them.
//!
//! # Architecture
//!
//! - `storage`: key-value store trait with `sled` and in-memory backends
//! - `companion`: quota tracker, conversation store, chat session
//! - `providers`: proxy transport and the quota-checked request gateway
//! - `assessment`: stress quiz questions, scoring, and suggestions
//! - `quotes`: inspirational quotes
//! - `config`: configuration management and validation
//! - `error`: error types and result aliases
//! - `cli` / `commands`: command-line interface and handlers
//!
//! # Example
//!
//! ```
//! use soulcare::companion::{ConversationStore, Message, QuotaTracker};
//! use soulcare::storage::MemoryStore;
//! use std::sync::Arc;
//!
//! let store = Arc::new(MemoryStore::new());
//! let quota = QuotaTracker::new(Arc::clone(&store));
//! let chats = ConversationStore::new(Arc::clone(&store));
//!
//! assert!(quota.check_and_consume());
//! let chat = chats.create_new_chat();
//! chats.save_chat(&chat, &[Message::user("Hello")]).unwrap();
//! assert_eq!(chats.get_all_chats().len(), 1);
//! ```

pub mod assessment;
pub mod cli;
pub mod commands;
pub mod companion;
pub mod config;
pub mod error;
pub mod providers;
pub mod quotes;
pub mod storage;

// Re-export commonly used types
pub use companion::{ChatSession, Conversation, ConversationStore, Message, QuotaTracker};
pub use config::Config;
pub use error::{Result, SoulCareError};
pub use providers::RequestGateway;

#[cfg(test)]
pub mod test_utils;
