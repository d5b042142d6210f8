//! Connected component extraction from dilated masks.
//!
//! Components are grown with an explicit-stack flood fill over the 8
//! neighbours of each pixel. Seeds are found by scanning unvisited set bits a
//! word at a time, so background regions cost one word test per 64 pixels.
//! Components are reported in raster order of their first pixel.

#[cfg(test)]
mod tests;

use common::{BITS_PER_WORD, BitBuffer2};

use crate::rect::Rect;

/// Offsets of the 8 neighbours of a pixel.
const NEIGHBORS_8: [(isize, isize); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// One 8-connected component of a mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Component {
    /// Bounding box of the component.
    pub rect: Rect,
    /// Number of pixels in the component.
    pub area: usize,
}

/// Size limits below which a component is treated as noise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComponentLimits {
    pub min_area: usize,
    pub min_dimension: usize,
}

impl ComponentLimits {
    #[inline]
    pub fn accepts(&self, component: &Component) -> bool {
        component.area >= self.min_area
            && component.rect.width >= self.min_dimension
            && component.rect.height >= self.min_dimension
    }
}

/// Components found in one mask.
#[derive(Debug, Clone, Default)]
pub struct Components {
    /// Components passing the size limits, in raster order.
    pub kept: Vec<Component>,
    /// Number of components dropped as too small.
    pub discarded: usize,
}

/// Label the 8-connected components of `mask` and keep those within `limits`.
pub fn find_components(mask: &BitBuffer2, limits: ComponentLimits) -> Components {
    let width = mask.width();
    let height = mask.height();
    let words_per_row = mask.words_per_row();
    let mut visited = BitBuffer2::new_default(width, height);
    let mut stack: Vec<(usize, usize)> = Vec::new();
    let mut components = Components::default();

    for y in 0..height {
        for word_idx in 0..words_per_row {
            let idx = y * words_per_row + word_idx;
            loop {
                let unvisited = mask.words()[idx] & !visited.words()[idx];
                if unvisited == 0 {
                    break;
                }

                let x = word_idx * BITS_PER_WORD + unvisited.trailing_zeros() as usize;
                let component = flood_fill(mask, &mut visited, &mut stack, x, y);
                if limits.accepts(&component) {
                    components.kept.push(component);
                } else {
                    components.discarded += 1;
                }
            }
        }
    }

    components
}

/// Grow the component containing `(seed_x, seed_y)`, marking it visited.
fn flood_fill(
    mask: &BitBuffer2,
    visited: &mut BitBuffer2,
    stack: &mut Vec<(usize, usize)>,
    seed_x: usize,
    seed_y: usize,
) -> Component {
    let width = mask.width() as isize;
    let height = mask.height() as isize;

    let (mut x_min, mut x_max, mut y_min, mut y_max) = (seed_x, seed_x, seed_y, seed_y);
    let mut area = 0usize;

    stack.clear();
    stack.push((seed_x, seed_y));
    visited.set_xy(seed_x, seed_y, true);

    while let Some((x, y)) = stack.pop() {
        area += 1;
        x_min = x_min.min(x);
        x_max = x_max.max(x);
        y_min = y_min.min(y);
        y_max = y_max.max(y);

        for (dx, dy) in NEIGHBORS_8 {
            let nx = x as isize + dx;
            let ny = y as isize + dy;
            if nx < 0 || ny < 0 || nx >= width || ny >= height {
                continue;
            }

            let (nx, ny) = (nx as usize, ny as usize);
            if mask.get_xy(nx, ny) && !visited.get_xy(nx, ny) {
                visited.set_xy(nx, ny, true);
                stack.push((nx, ny));
            }
        }
    }

    Component {
        rect: Rect::from_bounds(x_min, y_min, x_max, y_max),
        area,
    }
}
