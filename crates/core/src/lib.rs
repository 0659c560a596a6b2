//! Zodiac Core Library
//!
//! Foundational utilities shared by every crate of the workspace:
//! - Error handling (`AppError`, `AppResult`)
//! - Logging infrastructure
//! - Layered configuration

pub mod config;
pub mod error;
pub mod logging;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{AppError, AppResult};
