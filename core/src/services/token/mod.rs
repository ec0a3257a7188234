//! Email verification token service
//!
//! Stateless HS256 tokens carrying `{user_id, email, iat, exp}`.

mod config;
mod service;


pub use config::EmailTokenConfig;
pub use service::EmailTokenService;
