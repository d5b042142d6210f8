//! Speech-bubble region detection.
//!
//! Finds rectangular regions of a screenshot that are likely to hold
//! dialogue text. The detector is a deterministic geometric heuristic, it
//! does not recognize text or classify bubble shapes.
//!
//! # Algorithm Overview
//!
//! 1. **Luminance masks**: threshold Rec. 709 luminance into a dark mask (ink)
//!    and a light mask (bubble fill). Mid tones belong to neither.
//!
//! 2. **Dilation**: grow each mask with a small square neighbourhood, several
//!    times, so glyphs fuse into text clusters and bubble fills close over
//!    anti-aliasing gaps.
//!
//! 3. **Labeling**: 8-connected components of each dilated mask, dropping
//!    tiny or thin ones.
//!
//! 4. **Filtering**: reject page background, extreme aspect ratios and
//!    regions without enough ink. Dark survivors are padded.
//!
//! 5. **Merging**: union overlapping or adjacent boxes to a fixed point.
//!
//! 6. **Finalization**: drop oversized boxes, sort into reading order, fall
//!    back to the whole image when nothing is left.

mod config;
mod dilation;
mod error;
mod filter;
mod labeling;
mod luminance_mask;
mod merge;
mod reading_order;


pub use config::{Config, DilationParams};
pub use error::{DetectError, Result};
pub use luminance_mask::luminance;

use common::BitBuffer2;
use rayon::prelude::*;

use crate::raster::RgbRaster;
use crate::rect::Rect;
use dilation::dilate_repeated;
use filter::filter_candidates;
use labeling::{ComponentLimits, find_components};
use luminance_mask::{LuminanceMasks, build_luminance_masks};
use merge::{MergeParams, merge_boxes};
use reading_order::finalize;

/// Bubble detector configured with a fixed set of tunables.
///
/// # Example
///
/// ```rust,ignore
/// use bubblescan::BubbleDetector;
///
/// let image = image::open("page.png")?.to_rgb8();
/// let detector = BubbleDetector::new();
/// let result = detector.detect(&image)?;
///
/// for rect in &result.boxes {
///     println!("{:?}", rect);
/// }
/// ```
#[derive(Debug, Default, Clone)]
pub struct BubbleDetector {
    config: Config,
}

impl BubbleDetector {
    /// Create a detector with the default configuration.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Create a detector from a configuration, validating it first.
    pub fn from_config(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Detect bubble regions in one image.
    ///
    /// The returned boxes are in reading order and never empty.
    pub fn detect<R: RgbRaster + ?Sized>(&self, image: &R) -> Result<DetectionResult> {
        let width = image.width();
        let height = image.height();
        if width == 0 || height == 0 {
            return Err(DetectError::InvalidDimensions { width, height });
        }

        let config = &self.config;
        let mut diagnostics = Diagnostics::default();

        // Step 1: Luminance masks
        let masks = build_luminance_masks(image, config.dark_threshold, config.light_threshold);
        diagnostics.dark_pixels = masks.dark.count_ones();
        diagnostics.light_pixels = masks.light.count_ones();

        // Step 2-3: Dilate and label each mask independently
        let limits = ComponentLimits {
            min_area: config.min_component_area,
            min_dimension: config.min_component_dimension,
        };
        let light_components = find_components(
            &dilate_repeated(&masks.light, config.light_dilation),
            limits,
        );
        let dark_components = find_components(
            &dilate_repeated(&masks.dark, config.dark_dilation),
            limits,
        );
        diagnostics.light_components = light_components.kept.len();
        diagnostics.dark_components = dark_components.kept.len();
        diagnostics.discarded_components = light_components.discarded + dark_components.discarded;
        tracing::debug!(
            light = diagnostics.light_components,
            dark = diagnostics.dark_components,
            discarded = diagnostics.discarded_components,
            "Labeled mask components"
        );

        // Step 4: Filter against the undilated dark mask
        let filtered = filter_candidates(
            &light_components.kept,
            &dark_components.kept,
            &masks.dark,
            config,
        );
        diagnostics.rejected_background = filtered.rejected_background;
        diagnostics.rejected_aspect = filtered.rejected_aspect;
        diagnostics.rejected_dark_content = filtered.rejected_dark_content;
        diagnostics.candidates_after_filtering = filtered.boxes.len();
        tracing::debug!(
            kept = filtered.boxes.len(),
            background = filtered.rejected_background,
            aspect = filtered.rejected_aspect,
            dark_content = filtered.rejected_dark_content,
            "Filtered candidates"
        );

        // Step 5: Merge to a fixed point
        let merge_params = MergeParams {
            iou_threshold: config.merge_iou_threshold,
            proximity: config.merge_proximity,
        };
        let (merged, passes) = merge_boxes(filtered.boxes, merge_params);
        diagnostics.boxes_after_merging = merged.len();
        diagnostics.merge_passes = passes;
        tracing::debug!(boxes = merged.len(), passes, "Merged candidates");

        // Step 6: Oversize filter, reading order, fallback
        let finalized = finalize(
            merged,
            config.max_box_area_fraction,
            config.row_tolerance,
            width,
            height,
        );
        diagnostics.rejected_oversized = finalized.rejected_oversized;
        diagnostics.used_fallback = finalized.used_fallback;
        diagnostics.final_box_count = finalized.boxes.len();

        if finalized.used_fallback {
            tracing::debug!(width, height, "No bubbles found, using the whole image");
        }
        tracing::info!(
            width,
            height,
            boxes = finalized.boxes.len(),
            "Bubble detection finished"
        );

        Ok(DetectionResult {
            boxes: finalized.boxes,
            diagnostics,
        })
    }

    /// Detect bubbles in several images in parallel.
    ///
    /// Each image runs through its own single-threaded pipeline; results are
    /// returned in input order.
    pub fn detect_all<R: RgbRaster + Sync>(&self, images: &[R]) -> Vec<Result<DetectionResult>> {
        images.par_iter().map(|image| self.detect(image)).collect()
    }

    /// Intermediate masks for inspection.
    pub fn debug_masks<R: RgbRaster + ?Sized>(&self, image: &R) -> Result<DebugMasks> {
        let width = image.width();
        let height = image.height();
        if width == 0 || height == 0 {
            return Err(DetectError::InvalidDimensions { width, height });
        }

        let LuminanceMasks { dark, light } = build_luminance_masks(
            image,
            self.config.dark_threshold,
            self.config.light_threshold,
        );
        let dilated_dark = dilate_repeated(&dark, self.config.dark_dilation);
        let dilated_light = dilate_repeated(&light, self.config.light_dilation);

        Ok(DebugMasks {
            dark,
            light,
            dilated_dark,
            dilated_light,
        })
    }
}

/// Detect bubbles with the default configuration.
pub fn detect<R: RgbRaster + ?Sized>(image: &R) -> Result<Vec<Rect>> {
    Ok(BubbleDetector::new().detect(image)?.boxes)
}

/// Result of bubble detection with diagnostics.
#[derive(Debug, Clone)]
pub struct DetectionResult {
    /// Bubble boxes in reading order. Never empty.
    pub boxes: Vec<Rect>,
    /// Per-stage statistics of the run.
    pub diagnostics: Diagnostics,
}

/// Per-stage counts from one detection run, for debugging and tuning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    /// Pixels in the undilated dark mask.
    pub dark_pixels: usize,
    /// Pixels in the undilated light mask.
    pub light_pixels: usize,
    /// Light-mask components passing the size limits.
    pub light_components: usize,
    /// Dark-mask components passing the size limits.
    pub dark_components: usize,
    /// Components from both masks dropped as too small or too thin.
    pub discarded_components: usize,
    pub rejected_background: usize,
    pub rejected_aspect: usize,
    pub rejected_dark_content: usize,
    /// Candidates entering the merge stage.
    pub candidates_after_filtering: usize,
    pub boxes_after_merging: usize,
    pub merge_passes: usize,
    pub rejected_oversized: usize,
    /// Whether the whole-image fallback box was returned.
    pub used_fallback: bool,
    pub final_box_count: usize,
}

/// Masks produced by the first two pipeline stages.
#[derive(Debug, Clone)]
pub struct DebugMasks {
    pub dark: BitBuffer2,
    pub light: BitBuffer2,
    pub dilated_dark: BitBuffer2,
    pub dilated_light: BitBuffer2,
}
