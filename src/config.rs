//! Application configuration loaded from environment variables.

use std::path::PathBuf;

use serde::Deserialize;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Image Serving ===
    /// Base directory report images are served from.
    #[serde(default = "default_base_folder")]
    pub base_folder: PathBuf,

    // === Processing Collaborator ===
    /// External program implementing the processing routine.
    /// Invoked with the requested path appended as the final argument;
    /// must print a JSON result on stdout.
    #[serde(default)]
    pub processor_command: Option<String>,

    /// Extra arguments passed to the processor command, comma-separated.
    #[serde(default)]
    pub processor_args: Option<String>,

    // === Operation Modes ===
    /// Serve a canned mock result instead of invoking the command.
    #[serde(default)]
    pub dry_run: bool,

    // === Server Configuration ===
    /// HTTP listen port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    /// Enable verbose logging.
    #[serde(default)]
    pub verbose: bool,
}

fn default_base_folder() -> PathBuf {
    PathBuf::from("images")
}

fn default_port() -> u16 {
    5000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_folder.as_os_str().is_empty() {
            return Err("BASE_FOLDER must not be empty".to_string());
        }

        if !self.dry_run {
            match &self.processor_command {
                Some(cmd) if !cmd.is_empty() => {}
                _ => {
                    return Err(
                        "PROCESSOR_COMMAND is required unless DRY_RUN is set".to_string()
                    );
                }
            }
        }

        Ok(())
    }

    /// Processor arguments split out of the comma-separated form.
    pub fn processor_args_vec(&self) -> Vec<String> {
        self.processor_args
            .as_deref()
            .map(|args| {
                args.split(',')
                    .map(str::trim)
                    .filter(|a| !a.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default()
    }
}
