//! Type definitions shared by the API layer

pub mod response;

pub use response::{CodeResponse, HealthResponse, HealthStatus, RetCode};
