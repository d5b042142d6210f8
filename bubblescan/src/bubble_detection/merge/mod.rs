//! Fixed-point merging of overlapping or adjacent candidate boxes.
//!
//! Each pass walks the list in order; every box not yet absorbed becomes an
//! accumulator that swallows all later boxes it overlaps (IoU above the
//! threshold) or comes close to (within the proximity margin), growing to
//! their union as it goes. Passes repeat until one makes no merge. The
//! number of boxes never grows between passes, so the loop terminates.


use crate::rect::Rect;

/// Merge criteria.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MergeParams {
    pub iou_threshold: f64,
    pub proximity: usize,
}

impl MergeParams {
    #[inline]
    pub fn should_merge(&self, a: &Rect, b: &Rect) -> bool {
        a.iou(b) > self.iou_threshold || a.is_within_margin(b, self.proximity)
    }
}

/// Merge boxes until no pair satisfies [`MergeParams::should_merge`].
///
/// Returns the merged boxes and the number of passes performed.
pub fn merge_boxes(boxes: Vec<Rect>, params: MergeParams) -> (Vec<Rect>, usize) {
    let mut working = boxes;
    let mut passes = 0;

    loop {
        passes += 1;
        let (next, merged) = merge_pass(&working, params);
        working = next;
        if !merged {
            break;
        }
    }

    (working, passes)
}

/// Run one pass; returns the new list and whether anything merged.
fn merge_pass(boxes: &[Rect], params: MergeParams) -> (Vec<Rect>, bool) {
    let mut consumed = vec![false; boxes.len()];
    let mut next = Vec::with_capacity(boxes.len());
    let mut merged = false;

    for i in 0..boxes.len() {
        if consumed[i] {
            continue;
        }
        consumed[i] = true;

        let mut accum = boxes[i];
        for j in (i + 1)..boxes.len() {
            if consumed[j] {
                continue;
            }
            if params.should_merge(&accum, &boxes[j]) {
                accum = accum.union(&boxes[j]);
                consumed[j] = true;
                merged = true;
            }
        }

        next.push(accum);
    }

    (next, merged)
}
