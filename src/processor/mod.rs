//! Collaborator boundary for the external processing routine.
//!
//! The real analysis logic lives outside this crate. Everything behind this
//! boundary is reachable through a single call contract: hand it a filesystem
//! path, get back a JSON-serializable result or an error.

pub mod command;
pub mod mock;

pub use command::CommandProcessor;
pub use mock::{MockConfig, MockProcessor};

use serde_json::Value;

use crate::error::ProcessingError;

/// The external processing routine.
///
/// Implementations are synchronous and may block for the full duration of the
/// call; callers on an async runtime are expected to move the call onto the
/// blocking pool. No timeout is imposed at this boundary.
pub trait PathProcessor: Send + Sync {
    /// Process the file at `path` and return the routine's JSON result.
    fn process(&self, path: &str) -> Result<Value, ProcessingError>;
}
