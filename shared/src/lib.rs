//! Shared utilities and common types for the mall verification services
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - Response envelope and return codes
//! - Utility functions (phone and email validation, masking)

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CacheBackend, CacheConfig, ConfigError, EmailConfig, Environment, LoggingConfig,
    ServerConfig, SmsConfig, VerificationConfig,
};
pub use types::{CodeResponse, HealthResponse, RetCode};
pub use utils::{email, phone};
