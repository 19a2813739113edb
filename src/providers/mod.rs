//! Remote generation proxy access
//!
//! `base` defines the [`Proxy`] transport trait and wire types, `proxy`
//! implements it over HTTP, and `gateway` layers the daily quota and
//! fallback replies on top.

pub mod base;
pub mod gateway;
pub mod proxy;

pub use base::{AnalysisReply, ChatReply, ChatRequest, Proxy};
pub use gateway::RequestGateway;
pub use proxy::HttpProxy;

use crate::companion::QuotaTracker;
use crate::config::ProxyConfig;
use crate::error::Result;
use crate::storage::KeyValueStore;

/// Build a gateway that talks HTTP to the configured proxy
///
/// # Errors
///
/// Returns error if the HTTP client cannot be created
pub fn create_gateway<S: KeyValueStore>(
    config: &ProxyConfig,
    store: S,
) -> Result<RequestGateway<S>> {
    let proxy = HttpProxy::new(config.clone())?;
    Ok(RequestGateway::new(Box::new(proxy), QuotaTracker::new(store)))
}
