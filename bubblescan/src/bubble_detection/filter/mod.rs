//! Candidate filtering.
//!
//! Rejects components that look like page background, are too elongated to
//! be a bubble, or do not contain enough dark (ink) pixels to hold text.
//! Dark-mask survivors are padded so the final boxes include glyph strokes
//! that fell outside the strict dark threshold.


use common::BitBuffer2;

use super::config::Config;
use super::labeling::Component;
use crate::rect::Rect;

/// Mask a candidate was labeled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskSource {
    Light,
    Dark,
}

/// Reason a candidate was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Spans the image edge to edge and covers most of it.
    Background,
    /// Width/height ratio outside the allowed range.
    AspectRatio,
    /// Too few dark pixels inside the box.
    DarkContent,
}

/// A component with the metrics used for filtering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub rect: Rect,
    /// Pixel count of the source component.
    pub area: usize,
    /// Undilated dark pixels inside `rect`.
    pub dark_pixels: usize,
    pub source: MaskSource,
}

impl Candidate {
    pub fn new(component: &Component, source: MaskSource, dark_mask: &BitBuffer2) -> Self {
        let rect = component.rect;
        Self {
            rect,
            area: component.area,
            dark_pixels: dark_mask.count_ones_in_rect(rect.x, rect.y, rect.right(), rect.bottom()),
            source,
        }
    }

    /// Fraction of the bounding box covered by dark pixels.
    #[inline]
    pub fn dark_fraction(&self) -> f64 {
        self.dark_pixels as f64 / self.rect.area() as f64
    }

    /// Apply the background, aspect and content tests in that order.
    pub fn check(&self, config: &Config, width: usize, height: usize) -> Result<(), Rejection> {
        let rect = &self.rect;

        let touches_left = rect.x <= config.edge_tolerance_near;
        let touches_right = rect.right() + config.edge_tolerance_far >= width;
        let touches_top = rect.y <= config.edge_tolerance_near;
        let touches_bottom = rect.bottom() + config.edge_tolerance_far >= height;
        let spans_image = (touches_left && touches_right) || (touches_top && touches_bottom);
        let image_area = (width * height) as f64;
        if spans_image && rect.area() as f64 > image_area * config.max_background_area_fraction {
            return Err(Rejection::Background);
        }

        let aspect = rect.aspect_ratio();
        if aspect < config.min_aspect_ratio || aspect > config.max_aspect_ratio {
            return Err(Rejection::AspectRatio);
        }

        if self.dark_pixels < config.min_dark_pixels
            || self.dark_fraction() < config.min_dark_fraction
        {
            return Err(Rejection::DarkContent);
        }

        Ok(())
    }
}

/// Surviving boxes and rejection counts from one filtering run.
#[derive(Debug, Clone, Default)]
pub struct FilterOutcome {
    /// Light survivors followed by padded dark survivors.
    pub boxes: Vec<Rect>,
    pub rejected_background: usize,
    pub rejected_aspect: usize,
    pub rejected_dark_content: usize,
}

impl FilterOutcome {
    fn record(&mut self, rejection: Rejection) {
        match rejection {
            Rejection::Background => self.rejected_background += 1,
            Rejection::AspectRatio => self.rejected_aspect += 1,
            Rejection::DarkContent => self.rejected_dark_content += 1,
        }
    }
}

/// Filter light and dark components into one pool of candidate boxes.
///
/// `dark_mask` must be the undilated dark mask.
pub fn filter_candidates(
    light: &[Component],
    dark: &[Component],
    dark_mask: &BitBuffer2,
    config: &Config,
) -> FilterOutcome {
    let width = dark_mask.width();
    let height = dark_mask.height();
    let mut outcome = FilterOutcome::default();

    let sources = light
        .iter()
        .map(|c| (c, MaskSource::Light))
        .chain(dark.iter().map(|c| (c, MaskSource::Dark)));

    for (component, source) in sources {
        let candidate = Candidate::new(component, source, dark_mask);
        match candidate.check(config, width, height) {
            Ok(()) => {
                let rect = match source {
                    MaskSource::Light => candidate.rect,
                    MaskSource::Dark => candidate.rect.padded(config.dark_box_padding, width, height),
                };
                outcome.boxes.push(rect);
            }
            Err(rejection) => {
                tracing::trace!(?candidate, ?rejection, "Candidate rejected");
                outcome.record(rejection);
            }
        }
    }

    outcome
}
