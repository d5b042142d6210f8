//! Rendering and cropping of detection results.

use common::BitBuffer2;
use image::{GrayImage, Luma, Rgb, RgbImage, imageops};
use imageproc::drawing::{draw_filled_circle_mut, draw_hollow_circle_mut, draw_hollow_rect_mut};

use crate::rect::Rect;

const OUTLINE_COLORS: [Rgb<u8>; 6] = [
    Rgb([230, 25, 75]),
    Rgb([60, 180, 75]),
    Rgb([0, 130, 200]),
    Rgb([245, 130, 48]),
    Rgb([145, 30, 180]),
    Rgb([0, 160, 160]),
];

const MARKER_RADIUS: i32 = 7;

fn outline_color(index: usize) -> Rgb<u8> {
    OUTLINE_COLORS[index % OUTLINE_COLORS.len()]
}

/// Copy of `image` with each box outlined and marked at its top-left corner.
///
/// Boxes are drawn in order, so later markers cover earlier ones.
pub fn draw_detections(image: &RgbImage, boxes: &[Rect]) -> RgbImage {
    let mut output = image.clone();

    for (index, rect) in boxes.iter().enumerate() {
        let color = outline_color(index);

        draw_hollow_rect_mut(&mut output, (*rect).into(), color);
        if rect.width > 2 && rect.height > 2 {
            let inner = Rect::new(rect.x + 1, rect.y + 1, rect.width - 2, rect.height - 2);
            draw_hollow_rect_mut(&mut output, inner.into(), color);
        }

        let center = (rect.x as i32, rect.y as i32);
        draw_filled_circle_mut(&mut output, center, MARKER_RADIUS, Rgb([255, 255, 255]));
        draw_hollow_circle_mut(&mut output, center, MARKER_RADIUS, color);
    }

    output
}

/// Grayscale view of a mask, 255 where set.
pub fn mask_to_image(mask: &BitBuffer2) -> GrayImage {
    GrayImage::from_fn(mask.width() as u32, mask.height() as u32, |x, y| {
        if mask.get_xy(x as usize, y as usize) {
            Luma([255])
        } else {
            Luma([0])
        }
    })
}

/// Crop each box out of `image`, in order.
///
/// Boxes must lie within the image, as detector output does.
pub fn crop_regions(image: &RgbImage, boxes: &[Rect]) -> Vec<RgbImage> {
    boxes
        .iter()
        .map(|rect| {
            imageops::crop_imm(
                image,
                rect.x as u32,
                rect.y as u32,
                rect.width as u32,
                rect.height as u32,
            )
            .to_image()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MID_GREY, WHITE, draw_bubble, page};
    use crate::{BubbleDetector, detect};

    #[test]
    fn test_mask_to_image() {
        let mut mask = BitBuffer2::new_default(70, 3);
        mask.set_xy(0, 0, true);
        mask.set_xy(69, 2, true);

        let image = mask_to_image(&mask);

        assert_eq!(image.dimensions(), (70, 3));
        assert_eq!(image.get_pixel(0, 0).0, [255]);
        assert_eq!(image.get_pixel(69, 2).0, [255]);
        assert_eq!(image.get_pixel(1, 0).0, [0]);
        assert_eq!(image.pixels().filter(|p| p.0[0] == 255).count(), 2);
    }

    #[test]
    fn test_crop_regions_copies_pixels() {
        let mut image = page(50, 40, MID_GREY);
        image.put_pixel(12, 7, Rgb([1, 2, 3]));
        let boxes = [Rect::new(10, 5, 8, 6), Rect::full(50, 40)];

        let crops = crop_regions(&image, &boxes);

        assert_eq!(crops.len(), 2);
        assert_eq!(crops[0].dimensions(), (8, 6));
        assert_eq!(crops[0].get_pixel(2, 2).0, [1, 2, 3]);
        assert_eq!(crops[1], image);
    }

    #[test]
    fn test_draw_detections_outlines_two_pixels() {
        let image = page(60, 60, MID_GREY);
        let rect = Rect::new(20, 20, 30, 30);

        let output = draw_detections(&image, &[rect]);
        let color = outline_color(0);

        // Bottom-right corner is away from the marker
        assert_eq!(*output.get_pixel(49, 49), color);
        assert_eq!(*output.get_pixel(48, 48), color);
        assert_eq!(*output.get_pixel(47, 47), MID_GREY);
        assert_eq!(*output.get_pixel(35, 49), color);
        // Marker center
        assert_eq!(*output.get_pixel(20, 20), WHITE);
        // Input is untouched
        assert_eq!(*image.get_pixel(49, 49), MID_GREY);
    }

    #[test]
    fn test_draw_detected_bubbles() {
        let mut image = page(600, 400, MID_GREY);
        draw_bubble(&mut image, Rect::new(40, 30, 200, 120), 20);
        draw_bubble(&mut image, Rect::new(340, 240, 220, 120), 20);

        let boxes = detect(&image).unwrap();
        let output = draw_detections(&image, &boxes);
        let crops = crop_regions(&image, &boxes);

        assert_eq!(output.dimensions(), image.dimensions());
        for (crop, rect) in crops.iter().zip(&boxes) {
            assert_eq!(crop.dimensions(), (rect.width as u32, rect.height as u32));
        }

        let masks = BubbleDetector::new().debug_masks(&image).unwrap();
        output
            .save(common::test_utils::test_output_path("bubblescan_overlay.png"))
            .unwrap();
        mask_to_image(&masks.dilated_dark)
            .save(common::test_utils::test_output_path(
                "bubblescan_dilated_dark.png",
            ))
            .unwrap();
    }
}
