use std::sync::Arc;
use tempfile::TempDir;
use soulcare::config::ProxyConfig;
use soulcare::storage::SledStore;

#[allow(dead_code)]
pub fn create_temp_store() -> (Arc<SledStore>, TempDir) {
    let tmp = TempDir::new().expect("failed to create tempdir");
    let store = SledStore::open(tmp.path().join("store")).expect("failed to open sled store");
    (Arc::new(store), tmp)
}

#[allow(dead_code)]
pub fn proxy_config(base_url: &str) -> ProxyConfig {
    ProxyConfig {
        base_url: base_url.to_string(),
        timeout_seconds: 5,
        ..Default::default()
    }
}
