//! # Mall Verification Core
//!
//! Domain layer of the verification services: image captchas, SMS one-time
//! codes and signed email tokens. Storage, SMS delivery and email delivery
//! are reached through the traits in [`services::verification`].

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;
