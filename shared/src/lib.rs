//! Shared library for the vibecheck quiz service
//!
//! This library contains the pieces every layer agrees on:
//! - Item models and their projections
//! - Configuration loaded from the environment
//! - The error taxonomy and its HTTP mapping

pub mod config;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, Result};
pub use models::*;
