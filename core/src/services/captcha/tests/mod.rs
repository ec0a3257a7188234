//! Unit tests for captcha generation

use std::collections::HashSet;

use crate::services::captcha::{CaptchaGenerator, ALPHABET, DEFAULT_CAPTCHA_LENGTH};

const PNG_SIGNATURE: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

#[test]
fn test_default_length() {
    let generator = CaptchaGenerator::default();
    let captcha = generator.generate().unwrap();

    assert_eq!(generator.length(), DEFAULT_CAPTCHA_LENGTH);
    assert_eq!(captcha.text.len(), DEFAULT_CAPTCHA_LENGTH);
}

#[test]
fn test_text_uses_unambiguous_alphabet() {
    let generator = CaptchaGenerator::new(6);
    for _ in 0..200 {
        let text = generator.random_text();
        assert_eq!(text.len(), 6);
        assert!(text.bytes().all(|b| ALPHABET.contains(&b)));
        assert!(!text.contains('O') && !text.contains('0'));
        assert!(!text.contains('I') && !text.contains('1'));
    }
}

#[test]
fn test_image_is_png() {
    let captcha = CaptchaGenerator::default().generate().unwrap();
    assert!(captcha.image.starts_with(PNG_SIGNATURE));

    let decoded = image::load_from_memory(&captcha.image).unwrap();
    let (width, height) = CaptchaGenerator::default().dimensions();
    assert_eq!(decoded.width(), width);
    assert_eq!(decoded.height(), height);
}

#[test]
fn test_generate_for_keeps_challenge_id() {
    let captcha = CaptchaGenerator::default()
        .generate_for("3f2b9c1e-client-chosen")
        .unwrap();
    assert_eq!(captcha.challenge_id, "3f2b9c1e-client-chosen");
}

#[test]
fn test_fresh_challenge_ids() {
    let generator = CaptchaGenerator::default();
    let ids: HashSet<String> = (0..20)
        .map(|_| generator.generate().unwrap().challenge_id)
        .collect();
    assert_eq!(ids.len(), 20);
}

#[test]
fn test_render_every_alphabet_character() {
    let generator = CaptchaGenerator::new(ALPHABET.len());
    let text = String::from_utf8(ALPHABET.to_vec()).unwrap();
    assert!(generator.render(&text).is_ok());
}

#[test]
fn test_render_rejects_unknown_character() {
    let result = CaptchaGenerator::default().render("AB?D");
    assert!(result.is_err());
}
