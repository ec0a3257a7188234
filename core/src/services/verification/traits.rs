//! Traits for the store, SMS gateway and email sender integrations

use async_trait::async_trait;

/// Expiring key-value store holding live codes
///
/// Implementations must make `get_and_delete`, `set_if_absent` and
/// `compare_and_delete` atomic with respect to concurrent callers.
#[async_trait]
pub trait CacheStoreTrait: Send + Sync {
    /// Store a value, replacing any previous one, with a TTL
    async fn set_with_expiry(&self, key: &str, value: &str, ttl_secs: u64) -> Result<(), String>;
    /// Get a live value
    async fn get(&self, key: &str) -> Result<Option<String>, String>;
    /// Delete a key; returns whether it existed
    async fn delete(&self, key: &str) -> Result<bool, String>;
    /// Read and remove a value in one step
    async fn get_and_delete(&self, key: &str) -> Result<Option<String>, String>;
    /// Store a value only if no live value exists; returns whether it was stored
    async fn set_if_absent(&self, key: &str, value: &str, ttl_secs: u64) -> Result<bool, String>;
    /// Delete a key only if it still holds `expected`; returns whether it was deleted
    async fn compare_and_delete(&self, key: &str, expected: &str) -> Result<bool, String>;
    /// Remaining lifetime in seconds, `None` when the key is absent
    async fn ttl(&self, key: &str) -> Result<Option<u64>, String>;
    /// Check connectivity
    async fn ping(&self) -> Result<(), String> {
        Ok(())
    }
}

/// Trait for SMS gateway integration
#[async_trait]
pub trait SmsGatewayTrait: Send + Sync {
    /// Send a verification code via SMS, returning the provider message id
    async fn send_verification_code(&self, phone: &str, code: &str) -> Result<String, String>;
}

/// Trait for outgoing email
#[async_trait]
pub trait EmailSenderTrait: Send + Sync {
    /// Send an HTML message
    async fn send_html(&self, to: &str, subject: &str, html_body: &str) -> Result<(), String>;
}
