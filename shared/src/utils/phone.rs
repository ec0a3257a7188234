//! Phone number utilities

use once_cell::sync::Lazy;
use regex::Regex;

// Chinese mobile phone number regex
static CHINA_MOBILE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^1[3-9]\d{9}$").unwrap());

// International phone number regex (E.164 format)
static INTERNATIONAL_PHONE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+[1-9]\d{1,14}$").unwrap());

/// Normalize a phone number by removing common formatting characters
pub fn normalize_phone_number(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

/// Check if a phone number is valid (Chinese mobile)
pub fn is_valid_chinese_mobile(phone: &str) -> bool {
    CHINA_MOBILE_REGEX.is_match(phone)
}

/// Check if a phone number is valid (international E.164 format)
pub fn is_valid_international_phone(phone: &str) -> bool {
    INTERNATIONAL_PHONE_REGEX.is_match(phone)
}

/// Check if a mobile number is acceptable as an SMS subject.
///
/// The number must already be normalized: formatting characters are a
/// client bug, and accepting them would let one handset own several
/// throttle keys.
pub fn is_valid_mobile(phone: &str) -> bool {
    is_valid_chinese_mobile(phone) || is_valid_international_phone(phone)
}

/// Canonical spelling of an SMS subject, or `None` when it is not valid.
///
/// Mainland numbers written with the `+86` country code collapse to the
/// bare 11-digit form so both spellings share one throttle key.
pub fn canonical_mobile(phone: &str) -> Option<String> {
    if is_valid_chinese_mobile(phone) {
        return Some(phone.to_string());
    }
    if let Some(local) = phone.strip_prefix("+86") {
        if is_valid_chinese_mobile(local) {
            return Some(local.to_string());
        }
    }
    is_valid_international_phone(phone).then(|| phone.to_string())
}

/// Mask a phone number for display and logs (e.g., 138****5678)
pub fn mask_phone_number(phone: &str) -> String {
    let normalized = normalize_phone_number(phone);
    if normalized.len() >= 7 {
        format!(
            "{}****{}",
            &normalized[0..3],
            &normalized[normalized.len() - 4..]
        )
    } else {
        "****".to_string()
    }
}
