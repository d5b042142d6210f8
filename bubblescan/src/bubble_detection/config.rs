//! Configuration for bubble detection.
//!
//! All tunables of the pipeline live in the flat [`Config`] struct, grouped by
//! comments into the stage that consumes them. The defaults are empirically
//! tuned values for manga/comic screenshots.

use std::path::Path;

use common::FileFormat;
use serde::{Deserialize, Serialize};

use super::error::{DetectError, Result};

/// Upper bound for every pixel distance in [`Config`] (radii, tolerances,
/// padding, proximity). Keeps box and window arithmetic far from overflow.
pub const MAX_PIXEL_DISTANCE: usize = 1 << 16;

/// Radius and repeat count for one mask's dilation.
///
/// Repeating a small square neighbourhood reaches roughly
/// `radius * iterations` pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DilationParams {
    pub radius: usize,
    pub iterations: usize,
}

impl DilationParams {
    pub const fn new(radius: usize, iterations: usize) -> Self {
        Self { radius, iterations }
    }

    /// Approximate reach in pixels after all iterations.
    pub const fn reach(&self) -> usize {
        self.radius.saturating_mul(self.iterations)
    }
}

/// Bubble detection parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // ========================================================================
    // Luminance masks
    // ========================================================================
    /// Pixels with luminance at or below this value are dark (text ink).
    pub dark_threshold: u8,
    /// Pixels with luminance at or above this value are light (bubble fill).
    pub light_threshold: u8,

    // ========================================================================
    // Dilation
    // ========================================================================
    /// Bridges anti-aliasing and line-art gaps in bubble interiors.
    pub light_dilation: DilationParams,
    /// Bridges inter-glyph whitespace so characters fuse into one cluster.
    pub dark_dilation: DilationParams,

    // ========================================================================
    // Component labeling
    // ========================================================================
    /// Components with fewer pixels are dropped.
    pub min_component_area: usize,
    /// Components narrower or shorter than this are dropped.
    pub min_component_dimension: usize,

    // ========================================================================
    // Candidate filtering
    // ========================================================================
    /// A box with `x <= edge_tolerance_near` touches the left edge (same for top).
    pub edge_tolerance_near: usize,
    /// A box reaching `width - edge_tolerance_far` touches the right edge
    /// (same for bottom).
    pub edge_tolerance_far: usize,
    /// Edge-spanning boxes above this fraction of the image are background.
    pub max_background_area_fraction: f64,
    pub min_aspect_ratio: f64,
    pub max_aspect_ratio: f64,
    /// Minimum undilated dark pixels inside a candidate.
    pub min_dark_pixels: usize,
    /// Minimum fraction of the candidate's area that must be dark.
    pub min_dark_fraction: f64,
    /// Padding added around dark-mask survivors to recover clipped glyphs.
    pub dark_box_padding: usize,

    // ========================================================================
    // Merging
    // ========================================================================
    /// Boxes overlapping by more than this IoU are merged.
    pub merge_iou_threshold: f64,
    /// Boxes closer than this many pixels are merged.
    pub merge_proximity: usize,

    // ========================================================================
    // Finalization
    // ========================================================================
    /// Merged boxes above this fraction of the image are dropped.
    pub max_box_area_fraction: f64,
    /// Boxes whose tops differ by less than this share a reading row.
    pub row_tolerance: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dark_threshold: 120,
            light_threshold: 180,

            light_dilation: DilationParams::new(2, 2),
            dark_dilation: DilationParams::new(2, 3),

            min_component_area: 500,
            min_component_dimension: 15,

            edge_tolerance_near: 2,
            edge_tolerance_far: 3,
            max_background_area_fraction: 0.5,
            min_aspect_ratio: 0.25,
            max_aspect_ratio: 6.0,
            min_dark_pixels: 200,
            min_dark_fraction: 0.01,
            dark_box_padding: 8,

            merge_iou_threshold: 0.2,
            merge_proximity: 8,

            max_box_area_fraction: 0.45,
            row_tolerance: 20,
        }
    }
}

impl Config {
    /// Check the parameters for internal consistency.
    pub fn validate(&self) -> Result<()> {
        if self.dark_threshold >= self.light_threshold {
            return Err(DetectError::InvalidConfig(format!(
                "dark_threshold ({}) must be below light_threshold ({})",
                self.dark_threshold, self.light_threshold
            )));
        }
        if self.min_component_dimension == 0 {
            return Err(DetectError::InvalidConfig(
                "min_component_dimension must be at least 1".to_string(),
            ));
        }
        if self.row_tolerance == 0 {
            return Err(DetectError::InvalidConfig(
                "row_tolerance must be at least 1".to_string(),
            ));
        }

        let distances = [
            ("light_dilation.radius", self.light_dilation.radius),
            ("dark_dilation.radius", self.dark_dilation.radius),
            ("edge_tolerance_near", self.edge_tolerance_near),
            ("edge_tolerance_far", self.edge_tolerance_far),
            ("dark_box_padding", self.dark_box_padding),
            ("merge_proximity", self.merge_proximity),
            ("row_tolerance", self.row_tolerance),
        ];
        for (name, value) in distances {
            if value > MAX_PIXEL_DISTANCE {
                return Err(DetectError::InvalidConfig(format!(
                    "{} must be at most {}, got {}",
                    name, MAX_PIXEL_DISTANCE, value
                )));
            }
        }
        if !(self.min_aspect_ratio > 0.0 && self.min_aspect_ratio <= self.max_aspect_ratio) {
            return Err(DetectError::InvalidConfig(format!(
                "aspect ratio bounds [{}, {}] must be positive and ordered",
                self.min_aspect_ratio, self.max_aspect_ratio
            )));
        }

        let fractions = [
            ("max_background_area_fraction", self.max_background_area_fraction),
            ("min_dark_fraction", self.min_dark_fraction),
            ("merge_iou_threshold", self.merge_iou_threshold),
            ("max_box_area_fraction", self.max_box_area_fraction),
        ];
        for (name, value) in fractions {
            if !(value > 0.0 && value <= 1.0) {
                return Err(DetectError::InvalidConfig(format!(
                    "{} must be in (0, 1], got {}",
                    name, value
                )));
            }
        }

        Ok(())
    }

    /// Load and validate a YAML or JSON configuration file.
    ///
    /// Missing fields take their default values.
    pub fn load_file(path: impl AsRef<Path>) -> Result<Self> {
        let config: Config = common::read_file(path.as_ref())?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to YAML or JSON text.
    pub fn to_string(&self, format: FileFormat) -> Result<String> {
        Ok(common::serialize(self, format)?)
    }
}
