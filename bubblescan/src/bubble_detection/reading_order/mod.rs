//! Final box selection and reading order.
//!
//! Oversized boxes are dropped, the rest are grouped into rows and sorted
//! top-to-bottom, left-to-right. An empty result is replaced by a single box
//! covering the whole image so callers always get at least one region.


use crate::rect::Rect;

/// Output of the finalization stage.
#[derive(Debug, Clone)]
pub struct Finalized {
    /// Boxes in reading order, never empty.
    pub boxes: Vec<Rect>,
    pub rejected_oversized: usize,
    pub used_fallback: bool,
}

/// Drop oversized boxes, sort into reading order and apply the fallback.
pub fn finalize(
    mut boxes: Vec<Rect>,
    max_area_fraction: f64,
    row_tolerance: usize,
    width: usize,
    height: usize,
) -> Finalized {
    let max_area = (width * height) as f64 * max_area_fraction;
    let before = boxes.len();
    boxes.retain(|rect| rect.area() as f64 <= max_area);
    let rejected_oversized = before - boxes.len();

    if boxes.is_empty() {
        return Finalized {
            boxes: vec![Rect::full(width, height)],
            rejected_oversized,
            used_fallback: true,
        };
    }

    sort_reading_order(&mut boxes, row_tolerance);

    Finalized {
        boxes,
        rejected_oversized,
        used_fallback: false,
    }
}

/// Sort boxes top-to-bottom, then left-to-right within a row.
///
/// A row starts at its topmost remaining box and takes every box whose top
/// is less than `row_tolerance` pixels below it. The anchor always belongs to
/// its own row, so a tolerance of 0 puts every box in a row of its own.
pub fn sort_reading_order(boxes: &mut [Rect], row_tolerance: usize) {
    boxes.sort_by_key(|r| (r.y, r.x, r.width, r.height));

    let mut start = 0;
    while start < boxes.len() {
        let row_top = boxes[start].y;
        let end = boxes[start + 1..]
            .iter()
            .position(|r| r.y - row_top >= row_tolerance)
            .map_or(boxes.len(), |offset| start + 1 + offset);

        boxes[start..end].sort_by_key(|r| (r.x, r.y, r.width, r.height));
        start = end;
    }
}
