//! Command-backed implementation of the processing collaborator.
//!
//! The external routine is a separate program named in configuration. It is
//! invoked once per request with the requested path appended as the final
//! argument and must print its JSON result on stdout.

use std::process::Command;

use serde_json::Value;
use tracing::debug;

use crate::config::Config;
use crate::error::ProcessingError;

use super::PathProcessor;

/// Invokes the configured external program for each processing request.
#[derive(Debug, Clone)]
pub struct CommandProcessor {
    /// Program to run.
    program: String,
    /// Fixed arguments placed before the path.
    args: Vec<String>,
}

impl CommandProcessor {
    /// Create a processor for the given program and fixed arguments.
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Build the processor from configuration.
    ///
    /// Fails with [`ProcessingError::NotConfigured`] when no command is set.
    pub fn from_config(config: &Config) -> Result<Self, ProcessingError> {
        let program = config
            .processor_command
            .clone()
            .filter(|c| !c.is_empty())
            .ok_or(ProcessingError::NotConfigured)?;

        Ok(Self::new(program, config.processor_args_vec()))
    }

    /// The program this processor runs.
    pub fn program(&self) -> &str {
        &self.program
    }
}

impl PathProcessor for CommandProcessor {
    fn process(&self, path: &str) -> Result<Value, ProcessingError> {
        debug!(program = %self.program, path, "invoking processor command");

        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .output()
            .map_err(|e| ProcessingError::Spawn {
                command: self.program.clone(),
                reason: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let message = stderr.trim();
            // Fall back to the exit status when the routine says nothing.
            if message.is_empty() {
                return Err(ProcessingError::Failed(format!(
                    "processor exited with {}",
                    output.status
                )));
            }
            return Err(ProcessingError::Failed(message.to_string()));
        }

        serde_json::from_slice(&output.stdout)
            .map_err(|e| ProcessingError::InvalidOutput(e.to_string()))
    }
}
