//! Image captcha generation
//!
//! Captchas are rendered from a built-in bitmap font so no font files are
//! needed at runtime.

mod generator;
mod glyphs;

#[cfg(test)]
mod tests;

pub use generator::{Captcha, CaptchaGenerator, DEFAULT_CAPTCHA_LENGTH};
pub use glyphs::ALPHABET;
