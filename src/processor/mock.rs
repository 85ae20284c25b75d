//! Mock processing collaborator for unit testing.
//!
//! This module provides a mock processor that can be used in tests (and in
//! dry-run mode) without invoking a real external program.

use std::sync::{Arc, Mutex};

use serde_json::{json, Value};

use crate::error::ProcessingError;

use super::PathProcessor;

/// Configuration for mock processor behavior.
#[derive(Debug, Clone)]
pub struct MockConfig {
    /// Result to return on success.
    pub result: Value,
    /// Whether to fail processing requests.
    pub fail_processing: bool,
    /// Message used for simulated failures.
    pub fail_message: String,
    /// Simulated latency in milliseconds.
    pub latency_ms: u64,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            result: json!({"status": "ok"}),
            fail_processing: false,
            fail_message: "Mock processing failure".to_string(),
            latency_ms: 0,
        }
    }
}

/// Mock processing collaborator for testing.
#[derive(Debug, Clone)]
pub struct MockProcessor {
    /// Mock configuration.
    config: MockConfig,
    /// Paths passed to `process`, in call order.
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockProcessor {
    /// Create a new mock processor with default configuration.
    pub fn new() -> Self {
        Self::with_config(MockConfig::default())
    }

    /// Create a mock processor with custom configuration.
    pub fn with_config(config: MockConfig) -> Self {
        Self {
            config,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock processor that returns the given result.
    pub fn with_result(result: Value) -> Self {
        Self::with_config(MockConfig {
            result,
            ..MockConfig::default()
        })
    }

    /// Create a mock processor that fails with the given message.
    pub fn with_failure(message: impl Into<String>) -> Self {
        Self::with_config(MockConfig {
            fail_processing: true,
            fail_message: message.into(),
            ..MockConfig::default()
        })
    }

    /// Paths this mock has been asked to process.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Clear recorded calls.
    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }
}

impl Default for MockProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl PathProcessor for MockProcessor {
    fn process(&self, path: &str) -> Result<Value, ProcessingError> {
        self.calls.lock().unwrap().push(path.to_string());

        if self.config.latency_ms > 0 {
            std::thread::sleep(std::time::Duration::from_millis(self.config.latency_ms));
        }

        if self.config.fail_processing {
            return Err(ProcessingError::Failed(self.config.fail_message.clone()));
        }

        Ok(self.config.result.clone())
    }
}
