//! Bit-packed 2D buffer for boolean masks.
//!
//! Uses 1 bit per pixel instead of 1 byte. Every row starts on a fresh `u64`
//! word so row-wise word operations (dilation, run scanning) never have to
//! straddle two rows. Bits beyond `width` in the last word of a row are
//! always kept clear.

/// Number of bits per storage word.
pub const BITS_PER_WORD: usize = 64;

/// A 2D boolean buffer packed into row-aligned `u64` words, LSB first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitBuffer2 {
    words: Vec<u64>,
    width: usize,
    height: usize,
    words_per_row: usize,
}

impl BitBuffer2 {
    /// Create a new bit buffer filled with the given value.
    pub fn new_filled(width: usize, height: usize, value: bool) -> Self {
        let words_per_row = width.div_ceil(BITS_PER_WORD);
        let mut buffer = Self {
            words: vec![0u64; words_per_row * height],
            width,
            height,
            words_per_row,
        };
        if value {
            buffer.fill(true);
        }
        buffer
    }

    /// Create a new bit buffer with all bits cleared.
    #[inline]
    pub fn new_default(width: usize, height: usize) -> Self {
        Self::new_filled(width, height, false)
    }

    /// Create a bit buffer from row-major booleans.
    ///
    /// The slice length must equal `width * height`.
    pub fn from_slice(width: usize, height: usize, data: &[bool]) -> Self {
        assert_eq!(
            data.len(),
            width * height,
            "data length {} does not match dimensions {}x{}",
            data.len(),
            width,
            height
        );

        let mut buffer = Self::new_default(width, height);
        for (idx, &value) in data.iter().enumerate() {
            if value {
                buffer.set_xy(idx % width, idx / width, true);
            }
        }
        buffer
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of pixels (`width * height`).
    #[inline]
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of `u64` words backing one row.
    #[inline]
    pub fn words_per_row(&self) -> usize {
        self.words_per_row
    }

    #[inline]
    pub fn get_xy(&self, x: usize, y: usize) -> bool {
        debug_assert!(x < self.width && y < self.height);
        let word = self.words[y * self.words_per_row + x / BITS_PER_WORD];
        (word >> (x % BITS_PER_WORD)) & 1 != 0
    }

    #[inline]
    pub fn set_xy(&mut self, x: usize, y: usize, value: bool) {
        debug_assert!(x < self.width && y < self.height);
        let word = &mut self.words[y * self.words_per_row + x / BITS_PER_WORD];
        let bit = 1u64 << (x % BITS_PER_WORD);
        if value {
            *word |= bit;
        } else {
            *word &= !bit;
        }
    }

    /// Fill all pixels with the given value, keeping row padding clear.
    pub fn fill(&mut self, value: bool) {
        if !value {
            self.words.fill(0);
            return;
        }

        let tail_mask = self.tail_mask();
        for row in self.words.chunks_exact_mut(self.words_per_row.max(1)) {
            row.fill(!0u64);
            if let Some(last) = row.last_mut() {
                *last &= tail_mask;
            }
        }
    }

    /// Mask of the valid bits in the last word of every row.
    #[inline]
    pub fn tail_mask(&self) -> u64 {
        match self.width % BITS_PER_WORD {
            0 => !0u64,
            bits => (1u64 << bits) - 1,
        }
    }

    /// Underlying word storage, `words_per_row` words per row.
    #[inline]
    pub fn words(&self) -> &[u64] {
        &self.words
    }

    #[inline]
    pub fn words_mut(&mut self) -> &mut [u64] {
        &mut self.words
    }

    /// Words of a single row.
    #[inline]
    pub fn row_words(&self, y: usize) -> &[u64] {
        let start = y * self.words_per_row;
        &self.words[start..start + self.words_per_row]
    }

    /// Copy contents from another buffer of the same dimensions.
    pub fn copy_from(&mut self, other: &Self) {
        assert_eq!(self.width, other.width, "width mismatch");
        assert_eq!(self.height, other.height, "height mismatch");
        self.words.copy_from_slice(&other.words);
    }

    /// Swap contents with another buffer of the same dimensions.
    pub fn swap(&mut self, other: &mut Self) {
        assert_eq!(self.width, other.width, "width mismatch");
        assert_eq!(self.height, other.height, "height mismatch");
        std::mem::swap(&mut self.words, &mut other.words);
    }

    /// Count the set bits in the whole buffer.
    #[inline]
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Count the set bits inside the half-open rectangle `[x0, x1) x [y0, y1)`.
    ///
    /// The rectangle is clamped to the buffer bounds.
    pub fn count_ones_in_rect(&self, x0: usize, y0: usize, x1: usize, y1: usize) -> usize {
        let x1 = x1.min(self.width);
        let y1 = y1.min(self.height);
        if x0 >= x1 || y0 >= y1 {
            return 0;
        }

        let first_word = x0 / BITS_PER_WORD;
        let last_word = (x1 - 1) / BITS_PER_WORD;
        let first_mask = !0u64 << (x0 % BITS_PER_WORD);
        let last_mask = match x1 % BITS_PER_WORD {
            0 => !0u64,
            bits => (1u64 << bits) - 1,
        };

        let mut count = 0usize;
        for y in y0..y1 {
            let row = self.row_words(y);
            for (word_idx, &word) in row.iter().enumerate().take(last_word + 1).skip(first_word) {
                let mut masked = word;
                if word_idx == first_word {
                    masked &= first_mask;
                }
                if word_idx == last_word {
                    masked &= last_mask;
                }
                count += masked.count_ones() as usize;
            }
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_filled_true_keeps_padding_clear() {
        let buf = BitBuffer2::new_filled(100, 100, true);
        assert_eq!(buf.words_per_row(), 2);
        assert_eq!(buf.count_ones(), 10_000);
        assert_eq!(buf.row_words(99)[1], buf.tail_mask());
    }

    #[test]
    fn test_set_get_xy_across_words() {
        let mut buf = BitBuffer2::new_default(130, 3);

        buf.set_xy(0, 0, true);
        buf.set_xy(63, 1, true);
        buf.set_xy(64, 1, true);
        buf.set_xy(129, 2, true);

        assert!(buf.get_xy(0, 0));
        assert!(buf.get_xy(63, 1));
        assert!(buf.get_xy(64, 1));
        assert!(buf.get_xy(129, 2));
        assert!(!buf.get_xy(1, 0));
        assert!(!buf.get_xy(129, 1));
        assert_eq!(buf.count_ones(), 4);

        buf.set_xy(64, 1, false);
        assert!(!buf.get_xy(64, 1));
    }

    #[test]
    fn test_rows_are_word_aligned() {
        let mut buf = BitBuffer2::new_default(10, 2);
        buf.set_xy(0, 1, true);
        assert_eq!(buf.row_words(0), &[0]);
        assert_eq!(buf.row_words(1), &[1]);
    }

    #[test]
    fn test_fill_and_clear() {
        let mut buf = BitBuffer2::new_default(70, 4);
        buf.fill(true);
        assert_eq!(buf.count_ones(), 280);
        assert_eq!(buf.row_words(0)[1], buf.tail_mask());

        buf.fill(false);
        assert_eq!(buf.count_ones(), 0);
    }

    #[test]
    fn test_count_ones_in_rect() {
        let buf = BitBuffer2::new_filled(200, 50, true);
        assert_eq!(buf.count_ones_in_rect(0, 0, 200, 50), 10_000);
        assert_eq!(buf.count_ones_in_rect(60, 10, 70, 20), 100);
        assert_eq!(buf.count_ones_in_rect(63, 0, 129, 1), 66);
        assert_eq!(buf.count_ones_in_rect(190, 45, 500, 500), 50);
        assert_eq!(buf.count_ones_in_rect(10, 10, 10, 20), 0);
    }

    #[test]
    fn test_count_ones_in_rect_sparse() {
        let mut buf = BitBuffer2::new_default(128, 8);
        buf.set_xy(5, 2, true);
        buf.set_xy(64, 2, true);
        buf.set_xy(127, 7, true);

        assert_eq!(buf.count_ones_in_rect(0, 0, 128, 8), 3);
        assert_eq!(buf.count_ones_in_rect(6, 0, 64, 8), 0);
        assert_eq!(buf.count_ones_in_rect(64, 2, 65, 3), 1);
        assert_eq!(buf.count_ones_in_rect(100, 7, 128, 8), 1);
    }

    #[test]
    fn test_from_slice_row_major() {
        let data = vec![true, false, true, false, false, true];
        let buf = BitBuffer2::from_slice(3, 2, &data);

        assert!(buf.get_xy(0, 0));
        assert!(!buf.get_xy(1, 0));
        assert!(buf.get_xy(2, 0));
        assert!(!buf.get_xy(0, 1));
        assert!(!buf.get_xy(1, 1));
        assert!(buf.get_xy(2, 1));
        assert_eq!(buf.count_ones(), 3);
    }

    #[test]
    #[should_panic(expected = "data length")]
    fn test_from_slice_wrong_length() {
        BitBuffer2::from_slice(2, 2, &[true, false, true]);
    }

    #[test]
    fn test_swap() {
        let mut a = BitBuffer2::new_filled(8, 8, true);
        let mut b = BitBuffer2::new_default(8, 8);
        a.swap(&mut b);
        assert_eq!(a.count_ones(), 0);
        assert_eq!(b.count_ones(), 64);
    }
}
