use std::path::PathBuf;

use tempfile::TempDir;

use shared_config::{AppConfig, MessagingTimings};

/// Test configuration whose favorites file lives in a private temp dir
/// that is removed when the `TestConfig` is dropped.
pub struct TestConfig {
    pub dir: TempDir,
    pub messaging: MessagingTimings,
    pub booking_latency_ms: u64,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create temp dir for test config"),
            messaging: MessagingTimings::default(),
            booking_latency_ms: 2000,
        }
    }
}

impl TestConfig {
    /// Zero-delay variant for tests that do not exercise timing.
    pub fn instant() -> Self {
        Self {
            messaging: MessagingTimings {
                delivered_after_ms: 0,
                reply_after_ms: 0,
                read_after_ms: 0,
                ..MessagingTimings::default()
            },
            booking_latency_ms: 0,
            ..Self::default()
        }
    }

    pub fn favorites_path(&self) -> PathBuf {
        self.dir.path().join("favorites.json")
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            bind_address: "127.0.0.1:0".to_string(),
            favorites_path: self.favorites_path(),
            catalog_path: None,
            messaging: self.messaging,
            booking_latency_ms: self.booking_latency_ms,
        }
    }
}

pub struct TestResponses;

impl TestResponses {
    pub fn error_response(message: &str) -> serde_json::Value {
        serde_json::json!({ "error": message })
    }

    pub fn validation_response(field: &str, message: &str) -> serde_json::Value {
        serde_json::json!({ "error": message, "field": field })
    }
}
