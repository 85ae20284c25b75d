//! HTTP façade for the payment validator.
//!
//! This library exposes two routes: one that serves report images from a
//! configured base directory, and one that accepts a filesystem path and
//! forwards it to the external processing routine, returning whatever JSON
//! result (or error) that routine produces.
//!
//! The processing routine itself is an opaque collaborator reachable through
//! the [`processor::PathProcessor`] trait; this crate never looks inside it.
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`processor`]: Collaborator boundary (command-backed + mock)
//! - [`api`]: HTTP routes and handlers
//! - [`metrics`]: Request counters and latency
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod processor;
pub mod utils;

pub use config::Config;
pub use error::{Result, ServiceError};
