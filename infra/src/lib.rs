//! # Infrastructure Layer
//!
//! Concrete implementations of the stores and delivery channels the
//! verification core runs against.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Cache**: Redis client and an in-process store, both implementing
//!   `CacheStoreTrait`
//! - **SMS**: Gateway implementations (Twilio, logging mock)
//! - **Email**: SMTP delivery through lettre and a logging mock
//!
//! ## Features
//!
//! - `redis-cache`: Enable Redis caching support (default)
//! - `twilio-sms`: Enable Twilio SMS service

/// Cache module - Redis client and expiring stores
pub mod cache;

/// SMS service module - External SMS providers
pub mod sms;

/// Email module - Outbound verification mail
pub mod email;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// SMS service error
    #[error("SMS service error: {0}")]
    Sms(String),

    /// Email delivery error
    #[error("Email error: {0}")]
    Email(String),

    /// Operation did not finish in time
    #[error("Timed out: {0}")]
    Timeout(String),
}
