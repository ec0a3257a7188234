//! Value objects representing immutable domain concepts.

pub mod stage;

// Re-export commonly used types
pub use stage::VerificationStage;
