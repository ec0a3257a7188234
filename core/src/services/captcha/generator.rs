//! Captcha text and PNG image generation.

use std::io::Cursor;

use image::{ImageFormat, Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_filled_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;
use rand::Rng;
use uuid::Uuid;

use crate::errors::{DomainError, DomainResult};

use super::glyphs::{self, GLYPH_HEIGHT, GLYPH_WIDTH};

/// Default number of characters in a captcha
pub const DEFAULT_CAPTCHA_LENGTH: usize = 4;

/// Pixels per glyph bitmap cell
const SCALE: u32 = 4;
/// Horizontal space reserved for each character
const CELL_WIDTH: u32 = GLYPH_WIDTH * SCALE + 6;
const PADDING: u32 = 8;
const HEIGHT: u32 = GLYPH_HEIGHT * SCALE + 16;

const NOISE_LINES: usize = 6;
const NOISE_DOTS: usize = 60;

/// A rendered challenge. `text` is the answer and stays server-side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Captcha {
    pub challenge_id: String,
    pub text: String,
    /// PNG encoded image
    pub image: Vec<u8>,
}

/// Generates captcha text and renders it as a noisy PNG raster
#[derive(Debug, Clone)]
pub struct CaptchaGenerator {
    length: usize,
}

impl Default for CaptchaGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_CAPTCHA_LENGTH)
    }
}

impl CaptchaGenerator {
    pub fn new(length: usize) -> Self {
        Self {
            length: length.max(1),
        }
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Generate a captcha under a fresh challenge id
    pub fn generate(&self) -> DomainResult<Captcha> {
        self.generate_for(&Uuid::new_v4().to_string())
    }

    /// Generate a captcha for a challenge id chosen by the client
    pub fn generate_for(&self, challenge_id: &str) -> DomainResult<Captcha> {
        let text = self.random_text();
        let image = self.render(&text)?;

        Ok(Captcha {
            challenge_id: challenge_id.to_string(),
            text,
            image,
        })
    }

    /// Random text over the unambiguous alphabet
    pub fn random_text(&self) -> String {
        let mut rng = rand::thread_rng();
        (0..self.length)
            .map(|_| glyphs::ALPHABET[rng.gen_range(0..glyphs::ALPHABET.len())] as char)
            .collect()
    }

    /// Image dimensions for the configured length
    pub fn dimensions(&self) -> (u32, u32) {
        (PADDING * 2 + CELL_WIDTH * self.length as u32, HEIGHT)
    }

    /// Render `text` as a PNG
    pub fn render(&self, text: &str) -> DomainResult<Vec<u8>> {
        let mut rng = rand::thread_rng();
        let (width, height) = self.dimensions();

        let background = Rgb([
            rng.gen_range(225..=255),
            rng.gen_range(225..=255),
            rng.gen_range(225..=255),
        ]);
        let mut canvas = RgbImage::from_pixel(width, height, background);

        for _ in 0..NOISE_LINES {
            let start = (rng.gen_range(0.0..width as f32), rng.gen_range(0.0..height as f32));
            let end = (rng.gen_range(0.0..width as f32), rng.gen_range(0.0..height as f32));
            draw_line_segment_mut(&mut canvas, start, end, random_ink(&mut rng, 120..200));
        }

        for (index, c) in text.chars().enumerate() {
            let Some(rows) = glyphs::glyph(c) else {
                return Err(DomainError::Internal {
                    message: format!("No captcha glyph for character {:?}", c),
                });
            };

            let ink = random_ink(&mut rng, 20..130);
            let origin_x = (PADDING + CELL_WIDTH * index as u32) as i32 + rng.gen_range(0..=4);
            let origin_y = rng.gen_range(2..=(HEIGHT - GLYPH_HEIGHT * SCALE - 2)) as i32;
            // Per-row horizontal offset slants the glyph
            let shear: i32 = rng.gen_range(-1..=1);

            for row in 0..GLYPH_HEIGHT {
                let row_shift = shear * (GLYPH_HEIGHT as i32 / 2 - row as i32);
                for col in 0..GLYPH_WIDTH {
                    if glyphs::is_set(&rows, col, row) {
                        let x = origin_x + (col * SCALE) as i32 + row_shift;
                        let y = origin_y + (row * SCALE) as i32;
                        draw_filled_rect_mut(&mut canvas, Rect::at(x, y).of_size(SCALE, SCALE), ink);
                    }
                }
            }
        }

        for _ in 0..NOISE_DOTS {
            let center = (rng.gen_range(0..width) as i32, rng.gen_range(0..height) as i32);
            draw_filled_circle_mut(&mut canvas, center, 1, random_ink(&mut rng, 60..220));
        }

        let mut buffer = Cursor::new(Vec::new());
        canvas
            .write_to(&mut buffer, ImageFormat::Png)
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to encode captcha image: {}", e),
            })?;

        Ok(buffer.into_inner())
    }
}

fn random_ink(rng: &mut impl Rng, range: std::ops::Range<u8>) -> Rgb<u8> {
    Rgb([
        rng.gen_range(range.clone()),
        rng.gen_range(range.clone()),
        rng.gen_range(range),
    ])
}
