//! Test utilities for SoulCare
//!
//! Temporary directories, fixture files, a store that always fails, and a
//! scripted proxy that records what it was asked.

use crate::assessment::AssessmentRequest;
use crate::error::{Result, SoulCareError};
use crate::providers::{AnalysisReply, ChatReply, Proxy};
use crate::storage::KeyValueStore;
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Create a temporary directory for testing
pub fn temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Create a test file with the given content
///
/// # Panics
///
/// Panics if file creation or writing fails
pub fn create_test_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("Failed to write test file");
    path
}

/// A configuration YAML overriding a few proxy settings
pub fn test_config_yaml() -> String {
    r#"
proxy:
  base_url: https://proxy.example.com
  timeout_seconds: 10
storage:
  data_dir: /tmp/soulcare-test
"#
    .to_string()
}

/// Key-value store whose every operation fails
pub struct FailingStore;

impl KeyValueStore for FailingStore {
    fn get(&self, _key: &str) -> Result<Option<String>> {
        Err(SoulCareError::Storage("store unavailable".to_string()).into())
    }

    fn set(&self, _key: &str, _value: &str) -> Result<()> {
        Err(SoulCareError::Storage("store unavailable".to_string()).into())
    }

    fn remove(&self, _key: &str) -> Result<()> {
        Err(SoulCareError::Storage("store unavailable".to_string()).into())
    }
}

/// How a [`MockProxy`] answers
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Answer with this text (or analysis)
    Text(String),
    /// Answer successfully without the expected field
    Empty,
    /// Fail as if the proxy were unreachable
    Fail,
}

#[derive(Default)]
struct MockLog {
    prompts: Vec<String>,
    analyzed: Vec<Vec<u8>>,
}

/// Scripted [`Proxy`] that records every call
#[derive(Clone)]
pub struct MockProxy {
    reply: MockReply,
    log: Arc<Mutex<MockLog>>,
}

impl MockProxy {
    /// Create a proxy that always answers with `reply`
    pub fn new(reply: MockReply) -> Self {
        Self {
            reply,
            log: Arc::new(Mutex::new(MockLog::default())),
        }
    }

    /// Prompts sent to the chat endpoint, in order
    pub fn prompts(&self) -> Vec<String> {
        self.log.lock().unwrap().prompts.clone()
    }

    /// Answer lists sent to the assessment endpoint, in order
    pub fn analyzed_answers(&self) -> Vec<Vec<u8>> {
        self.log.lock().unwrap().analyzed.clone()
    }

    /// Total calls across both endpoints
    pub fn calls(&self) -> usize {
        let log = self.log.lock().unwrap();
        log.prompts.len() + log.analyzed.len()
    }

    fn text(&self) -> Result<Option<String>> {
        match &self.reply {
            MockReply::Text(text) => Ok(Some(text.clone())),
            MockReply::Empty => Ok(None),
            MockReply::Fail => Err(SoulCareError::Gateway("connection refused".to_string()).into()),
        }
    }
}

#[async_trait]
impl Proxy for MockProxy {
    async fn chat(&self, prompt: &str) -> Result<ChatReply> {
        self.log.lock().unwrap().prompts.push(prompt.to_string());
        Ok(ChatReply { text: self.text()? })
    }

    async fn analyze(&self, request: &AssessmentRequest) -> Result<AnalysisReply> {
        self.log
            .lock()
            .unwrap()
            .analyzed
            .push(request.answers.clone());
        Ok(AnalysisReply {
            analysis: self.text()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_dir_creation() {
        let dir = temp_dir();
        assert!(dir.path().exists());
    }

    #[test]
    fn test_create_test_file() {
        let dir = temp_dir();
        let path = create_test_file(&dir, "test.txt", "content");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "content");
    }

    #[test]
    fn test_failing_store_fails() {
        assert!(FailingStore.get("k").is_err());
        assert!(FailingStore.set("k", "v").is_err());
        assert!(FailingStore.remove("k").is_err());
    }

    #[tokio::test]
    async fn test_mock_proxy_records_calls() {
        let proxy = MockProxy::new(MockReply::Fail);
        assert!(proxy.chat("hello").await.is_err());
        assert_eq!(proxy.prompts(), vec!["hello".to_string()]);
        assert_eq!(proxy.calls(), 1);
    }
}
