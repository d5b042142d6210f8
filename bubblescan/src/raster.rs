//! Read-only RGB pixel access for detector input.

use image::{DynamicImage, GenericImageView, ImageBuffer, Rgb, Rgba};
use std::ops::Deref;

/// A raster image with per-pixel RGB access.
///
/// The detector only reads through this trait and never mutates the image.
pub trait RgbRaster {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    /// RGB components of the pixel at `(x, y)`.
    fn rgb(&self, x: usize, y: usize) -> [u8; 3];
}

impl<C> RgbRaster for ImageBuffer<Rgb<u8>, C>
where
    C: Deref<Target = [u8]>,
{
    #[inline]
    fn width(&self) -> usize {
        ImageBuffer::width(self) as usize
    }

    #[inline]
    fn height(&self) -> usize {
        ImageBuffer::height(self) as usize
    }

    #[inline]
    fn rgb(&self, x: usize, y: usize) -> [u8; 3] {
        self.get_pixel(x as u32, y as u32).0
    }
}

impl<C> RgbRaster for ImageBuffer<Rgba<u8>, C>
where
    C: Deref<Target = [u8]>,
{
    #[inline]
    fn width(&self) -> usize {
        ImageBuffer::width(self) as usize
    }

    #[inline]
    fn height(&self) -> usize {
        ImageBuffer::height(self) as usize
    }

    #[inline]
    fn rgb(&self, x: usize, y: usize) -> [u8; 3] {
        let [r, g, b, _] = self.get_pixel(x as u32, y as u32).0;
        [r, g, b]
    }
}

/// Alpha is ignored; colour components are converted to 8-bit.
impl RgbRaster for DynamicImage {
    #[inline]
    fn width(&self) -> usize {
        GenericImageView::width(self) as usize
    }

    #[inline]
    fn height(&self) -> usize {
        GenericImageView::height(self) as usize
    }

    #[inline]
    fn rgb(&self, x: usize, y: usize) -> [u8; 3] {
        let [r, g, b, _] = self.get_pixel(x as u32, y as u32).0;
        [r, g, b]
    }
}
