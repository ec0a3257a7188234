//! Common utility functions

pub mod email;
pub mod phone;

// Re-export commonly used utilities
pub use email::{is_valid_email, mask_email};
pub use phone::{canonical_mobile, is_valid_mobile, mask_phone_number, normalize_phone_number};
