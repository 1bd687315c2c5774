//! PediSafe Core Library
//!
//! Foundational utilities shared by every PediSafe crate:
//! - Error handling (`AppError`, `AppResult`, `GenerationErrorKind`)
//! - Logging infrastructure
//! - Configuration and provider profiles

pub mod config;
pub mod error;
pub mod logging;

// Re-export commonly used types
pub use config::{AppConfig, ProviderKind, ProviderProfile};
pub use error::{AppError, AppResult, GenerationErrorKind};
