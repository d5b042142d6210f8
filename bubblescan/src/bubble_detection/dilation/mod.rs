//! Morphological dilation for binary masks.
//!
//! A pixel of the output is set when any pixel within Chebyshev distance
//! `radius` is set in the input, i.e. the structuring element is a
//! `(2r + 1) x (2r + 1)` square. The square is separable, so each pass runs
//! a horizontal dilation on packed words followed by a vertical one.


use common::{BITS_PER_WORD, BitBuffer2};

use super::config::DilationParams;

/// Dilate `mask` once by `radius` into `output`.
pub fn dilate_mask(mask: &BitBuffer2, radius: usize, output: &mut BitBuffer2) {
    assert_eq!(mask.width(), output.width(), "width mismatch");
    assert_eq!(mask.height(), output.height(), "height mismatch");

    if radius == 0 {
        output.copy_from(mask);
        return;
    }

    let width = mask.width();
    let height = mask.height();
    let words_per_row = mask.words_per_row();
    let tail_mask = mask.tail_mask();

    // Horizontal pass
    for y in 0..height {
        let row = mask.row_words(y);
        let row_start = y * words_per_row;

        for word_idx in 0..words_per_row {
            let mut result = if radius < BITS_PER_WORD {
                dilate_word_fast(row, word_idx, radius)
            } else {
                dilate_word_slow(row, word_idx, width, radius)
            };
            if word_idx + 1 == words_per_row {
                result &= tail_mask;
            }
            output.words_mut()[row_start + word_idx] = result;
        }
    }

    // Vertical pass, one word column at a time
    let mut column = vec![0u64; height];
    for word_idx in 0..words_per_row {
        for (y, value) in column.iter_mut().enumerate() {
            *value = output.words()[y * words_per_row + word_idx];
        }

        let words = output.words_mut();
        for y in 0..height {
            let y_min = y.saturating_sub(radius);
            let y_max = (y + radius).min(height - 1);
            words[y * words_per_row + word_idx] =
                column[y_min..=y_max].iter().fold(0u64, |acc, &v| acc | v);
        }
    }
}

/// Dilate `mask` `params.iterations` times by `params.radius`.
///
/// Zero iterations return a copy of the input.
pub fn dilate_repeated(mask: &BitBuffer2, params: DilationParams) -> BitBuffer2 {
    let mut current = mask.clone();
    let mut scratch = BitBuffer2::new_default(mask.width(), mask.height());

    for _ in 0..params.iterations {
        dilate_mask(&current, params.radius, &mut scratch);
        current.swap(&mut scratch);
    }

    current
}

/// Horizontal dilation of one word using shifts (radius < 64).
#[inline]
fn dilate_word_fast(row: &[u64], word_idx: usize, radius: usize) -> u64 {
    let current = row[word_idx];
    let mut result = current;

    for shift in 1..=radius {
        result |= current << shift;
        result |= current >> shift;
    }

    // High bits of the left word spill into our low bits
    if word_idx > 0 {
        let prev = row[word_idx - 1];
        if prev != 0 {
            for shift in 1..=radius {
                result |= prev >> (BITS_PER_WORD - shift);
            }
        }
    }

    // Low bits of the right word spill into our high bits
    if word_idx + 1 < row.len() {
        let next = row[word_idx + 1];
        if next != 0 {
            for shift in 1..=radius {
                result |= next << (BITS_PER_WORD - shift);
            }
        }
    }

    result
}

/// Horizontal dilation of one word by per-bit range checks (radius >= 64).
fn dilate_word_slow(row: &[u64], word_idx: usize, width: usize, radius: usize) -> u64 {
    let base_x = word_idx * BITS_PER_WORD;
    let mut result = 0u64;

    for bit in 0..BITS_PER_WORD {
        let x = base_x + bit;
        if x >= width {
            break;
        }

        let x_min = x.saturating_sub(radius);
        let x_max = (x + radius).min(width - 1);
        if has_set_bit_in_range(row, x_min, x_max) {
            result |= 1u64 << bit;
        }
    }

    result
}

/// Whether any bit in the inclusive column range is set.
fn has_set_bit_in_range(row: &[u64], x_min: usize, x_max: usize) -> bool {
    let word_min = x_min / BITS_PER_WORD;
    let word_max = x_max / BITS_PER_WORD;

    (word_min..=word_max).any(|word_idx| {
        let word_start = word_idx * BITS_PER_WORD;
        let bit_start = x_min.saturating_sub(word_start);
        let bit_end = (x_max - word_start).min(BITS_PER_WORD - 1);
        let range_mask = if bit_end == BITS_PER_WORD - 1 {
            !0u64 << bit_start
        } else {
            ((1u64 << (bit_end + 1)) - 1) & (!0u64 << bit_start)
        };
        row[word_idx] & range_mask != 0
    })
}
