//! Response language selection
//!
//! Domain error messages are bilingual (`English | 中文`). The handlers pick
//! one half based on the request's `Accept-Language` header.

use actix_web::http::header;
use actix_web::HttpRequest;

use mv_core::errors::{extract_chinese_message, extract_english_message};

/// Language of `errmsg` in responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    Chinese,
    English,
}

impl Language {
    /// Detect the preferred language from `Accept-Language`.
    ///
    /// Entries are weighed by their `q` value; Chinese wins when nothing
    /// usable is present.
    pub fn from_request(req: &HttpRequest) -> Self {
        req.headers()
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|value| value.to_str().ok())
            .map(Self::from_header)
            .unwrap_or_default()
    }

    /// Parse an `Accept-Language` value such as `en-US,en;q=0.9,zh;q=0.8`
    pub fn from_header(header_value: &str) -> Self {
        let mut preferred = Language::default();
        let mut best_quality = 0.0_f32;

        for entry in header_value.split(',') {
            let mut parts = entry.trim().split(';');
            let tag = parts.next().unwrap_or_default().trim().to_lowercase();
            let quality = parts
                .find_map(|p| p.trim().strip_prefix("q="))
                .and_then(|q| q.parse::<f32>().ok())
                .unwrap_or(1.0);

            let language = if tag.starts_with("zh") {
                Language::Chinese
            } else if tag.starts_with("en") {
                Language::English
            } else {
                continue;
            };

            if quality > best_quality {
                preferred = language;
                best_quality = quality;
            }
        }

        preferred
    }

    /// Pick the half of a bilingual message for this language
    pub fn localize<'a>(&self, message: &'a str) -> &'a str {
        match self {
            Language::Chinese => extract_chinese_message(message),
            Language::English => extract_english_message(message),
        }
    }

    /// Choose between two literal messages
    pub fn pick(&self, zh: &'static str, en: &'static str) -> &'static str {
        match self {
            Language::Chinese => zh,
            Language::English => en,
        }
    }
}
