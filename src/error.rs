//! Error types for SoulCare
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for SoulCare operations
///
/// Covers configuration loading, key-value storage, the remote proxy,
/// the stress assessment, and the chat session. Quota exhaustion is not
/// an error: the gateway reports it as a normal reply string.
#[derive(Error, Debug)]
pub enum SoulCareError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Key-value storage errors (open, read, write, flush)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Remote proxy errors (non-2xx status, undecodable body)
    #[error("Gateway error: {0}")]
    Gateway(String),

    /// Invalid assessment answers
    #[error("Assessment error: {0}")]
    Assessment(String),

    /// No stored conversation carries the requested id
    #[error("Conversation {0} not found")]
    ConversationNotFound(u64),

    /// Chat input was empty after trimming
    #[error("Message cannot be empty")]
    EmptyMessage,

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Line editor errors
    #[error("Readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
}

/// Result type alias for SoulCare operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let error = SoulCareError::Config("invalid format".to_string());
        assert_eq!(error.to_string(), "Configuration error: invalid format");
    }

    #[test]
    fn test_storage_error_display() {
        let error = SoulCareError::Storage("flush failed".to_string());
        assert_eq!(error.to_string(), "Storage error: flush failed");
    }

    #[test]
    fn test_gateway_error_display() {
        let error = SoulCareError::Gateway("status 502".to_string());
        assert_eq!(error.to_string(), "Gateway error: status 502");
    }

    #[test]
    fn test_conversation_not_found_display() {
        let error = SoulCareError::ConversationNotFound(7);
        assert_eq!(error.to_string(), "Conversation 7 not found");
    }

    #[test]
    fn test_empty_message_display() {
        assert_eq!(
            SoulCareError::EmptyMessage.to_string(),
            "Message cannot be empty"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: SoulCareError = io_error.into();
        assert!(matches!(error, SoulCareError::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>("{invalid json}").unwrap_err();
        let error: SoulCareError = json_error.into();
        assert!(matches!(error, SoulCareError::Serialization(_)));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let yaml_error = serde_yaml::from_str::<serde_yaml::Value>("invalid: : yaml").unwrap_err();
        let error: SoulCareError = yaml_error.into();
        assert!(matches!(error, SoulCareError::Yaml(_)));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SoulCareError>();
    }
}
