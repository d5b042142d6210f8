//! Synthetic page fixtures for detector tests.

#![allow(dead_code)]

use image::{Rgb, RgbImage};
use rand::Rng;
use rand::rngs::StdRng;

use crate::rect::Rect;

pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
/// Luminance 150, in neither mask with default thresholds.
pub const MID_GREY: Rgb<u8> = Rgb([150, 150, 150]);

pub const GLYPH_WIDTH: usize = 8;
pub const GLYPH_HEIGHT: usize = 10;
/// Gap between glyphs and between lines. Closed by the default dark dilation.
pub const GLYPH_GAP: usize = 4;

/// Initialize tracing for tests. Respects RUST_LOG, defaults to "info".
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

pub fn page(width: usize, height: usize, color: Rgb<u8>) -> RgbImage {
    RgbImage::from_pixel(width as u32, height as u32, color)
}

pub fn fill_rect(image: &mut RgbImage, rect: Rect, color: Rgb<u8>) {
    for y in rect.y..rect.bottom() {
        for x in rect.x..rect.right() {
            image.put_pixel(x as u32, y as u32, color);
        }
    }
}

/// Tile black glyph blocks over `area` in lines, starting at its top-left.
///
/// Returns the bounding box of the drawn glyphs.
pub fn draw_text_block(image: &mut RgbImage, area: Rect) -> Rect {
    let step_x = GLYPH_WIDTH + GLYPH_GAP;
    let step_y = GLYPH_HEIGHT + GLYPH_GAP;
    let columns = (area.width + GLYPH_GAP) / step_x;
    let lines = (area.height + GLYPH_GAP) / step_y;
    assert!(columns > 0 && lines > 0, "text area {:?} too small", area);

    for line in 0..lines {
        for column in 0..columns {
            let glyph = Rect::new(
                area.x + column * step_x,
                area.y + line * step_y,
                GLYPH_WIDTH,
                GLYPH_HEIGHT,
            );
            fill_rect(image, glyph, BLACK);
        }
    }

    Rect::new(
        area.x,
        area.y,
        columns * step_x - GLYPH_GAP,
        lines * step_y - GLYPH_GAP,
    )
}

/// White bubble filled with text, leaving `margin` pixels of white around it.
pub fn draw_bubble(image: &mut RgbImage, bubble: Rect, margin: usize) -> Rect {
    fill_rect(image, bubble, WHITE);
    let text_area = Rect::new(
        bubble.x + margin,
        bubble.y + margin,
        bubble.width - 2 * margin,
        bubble.height - 2 * margin,
    );
    draw_text_block(image, text_area)
}

/// Random page of flat rectangles in random grey levels.
pub fn random_page(rng: &mut StdRng, width: usize, height: usize, shapes: usize) -> RgbImage {
    let background = rng.random_range(0..=255u8);
    let mut image = page(width, height, Rgb([background; 3]));

    for _ in 0..shapes {
        let w = rng.random_range(1..=width / 2);
        let h = rng.random_range(1..=height / 2);
        let x = rng.random_range(0..=width - w);
        let y = rng.random_range(0..=height - h);
        let shade = rng.random_range(0..=255u8);
        fill_rect(&mut image, Rect::new(x, y, w, h), Rgb([shade; 3]));
    }

    image
}
