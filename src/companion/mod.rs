//! Companion core: daily request quota, conversation persistence, and the
//! chat session built on them.

pub mod conversation;
pub mod quota;
pub mod session;

pub use conversation::{Conversation, ConversationStore, Message, Role};
pub use quota::{QuotaTracker, UsageRecord, MAX_DAILY_REQUESTS};
pub use session::ChatSession;
