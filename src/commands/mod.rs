/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint.

- `chat`   : Interactive chat with the companion
- `assess` : The stress assessment
- `history`: Listing, showing, and deleting stored conversations

Handlers share a [`Context`] holding the conversation store and the
request gateway, both backed by the same key-value store.
*/

use crate::companion::ConversationStore;
use crate::config::Config;
use crate::error::Result;
use crate::providers::{create_gateway, RequestGateway};
use crate::quotes::random_quote;
use crate::storage::{KeyValueStore, SledStore};
use colored::Colorize;
use std::sync::Arc;

pub mod assess;
pub mod chat;
pub mod history;

/// Stores and gateway shared by every command
pub struct Context<S: KeyValueStore> {
    /// Conversation persistence
    pub conversations: ConversationStore<S>,
    /// Quota-checked access to the generation proxy
    pub gateway: RequestGateway<S>,
}

impl Context<Arc<SledStore>> {
    /// Open the on-disk store and build the context from configuration
    ///
    /// # Errors
    ///
    /// Returns error if the store cannot be opened or the HTTP client
    /// cannot be created
    pub fn open(config: &Config) -> Result<Self> {
        let store = Arc::new(SledStore::open_default(config.storage.data_dir.as_deref())?);
        tracing::info!("Using data store at {}", store.path().display());
        Self::new(config, store)
    }
}

impl<S: KeyValueStore + Clone> Context<S> {
    /// Build a context over an existing store
    pub fn new(config: &Config, store: S) -> Result<Self> {
        Ok(Self {
            conversations: ConversationStore::new(store.clone()),
            gateway: create_gateway(&config.proxy, store)?,
        })
    }
}

/// Print the requests left today
pub fn show_quota<S: KeyValueStore>(ctx: &Context<S>) {
    let remaining = ctx.gateway.remaining_requests();
    let line = format!(
        "{} of {} AI requests left today",
        remaining,
        crate::companion::MAX_DAILY_REQUESTS
    );
    if remaining == 0 {
        println!("{}", line.red());
    } else {
        println!("{}", line.green());
    }
}

/// Print a random inspirational quote
pub fn show_quote() {
    println!("\n  \"{}\"\n", random_quote().italic().cyan());
}
