//! Luminance threshold masks.
//!
//! Splits an RGB image into two independent bit masks: dark pixels (text ink,
//! outlines) and light pixels (bubble fill). Mid-tone pixels belong to
//! neither, so the masks are not complements of each other.


use common::{BITS_PER_WORD, BitBuffer2};

use crate::raster::RgbRaster;

/// Dark and light masks built from one image.
#[derive(Debug, Clone)]
pub struct LuminanceMasks {
    pub dark: BitBuffer2,
    pub light: BitBuffer2,
}

/// Rec. 709 luminance `0.2126R + 0.7152G + 0.0722B`, truncated.
///
/// Evaluated in fixed point (weights scaled by 10^4) so grey pixels map
/// exactly onto their own value.
#[inline]
pub fn luminance([r, g, b]: [u8; 3]) -> u8 {
    ((2126 * r as u32 + 7152 * g as u32 + 722 * b as u32) / 10_000) as u8
}

/// Build the dark (`L <= dark_threshold`) and light (`L >= light_threshold`)
/// masks of an image.
///
/// Bits are accumulated a word at a time and stored row by row.
pub fn build_luminance_masks<R: RgbRaster + ?Sized>(
    image: &R,
    dark_threshold: u8,
    light_threshold: u8,
) -> LuminanceMasks {
    let width = image.width();
    let height = image.height();
    let mut dark = BitBuffer2::new_default(width, height);
    let mut light = BitBuffer2::new_default(width, height);
    let words_per_row = dark.words_per_row();

    for y in 0..height {
        let row_start = y * words_per_row;

        for word_idx in 0..words_per_row {
            let base_x = word_idx * BITS_PER_WORD;
            let end_x = (base_x + BITS_PER_WORD).min(width);
            let mut dark_word = 0u64;
            let mut light_word = 0u64;

            for x in base_x..end_x {
                let lum = luminance(image.rgb(x, y));
                let bit = 1u64 << (x - base_x);
                if lum <= dark_threshold {
                    dark_word |= bit;
                }
                if lum >= light_threshold {
                    light_word |= bit;
                }
            }

            dark.words_mut()[row_start + word_idx] = dark_word;
            light.words_mut()[row_start + word_idx] = light_word;
        }
    }

    LuminanceMasks { dark, light }
}
