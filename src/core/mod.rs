//! Core application layer
//!
//! This module provides the shared foundations of the service:
//! - Configuration management
//! - Structured logging system
//! - Error handling and type system

pub mod config;
pub mod error;
pub mod logging;

pub use config::Config;
pub use error::{BoardError, ErrorResponse, Result};
pub use logging::Logger;
