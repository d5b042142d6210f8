//! Bubblescan - speech-bubble region detection for comic screenshots.
//!
//! Given an RGB screenshot of a manga or comic page, the detector returns
//! rectangles that likely contain dialogue text, in reading order. Boxes are
//! meant to be cropped and passed on to an OCR engine.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use bubblescan::{BubbleDetector, overlay};
//!
//! let image = image::open("page.png")?.to_rgb8();
//! let result = BubbleDetector::new().detect(&image)?;
//!
//! println!("Found {} bubbles", result.boxes.len());
//! let crops = overlay::crop_regions(&image, &result.boxes);
//! ```

mod bubble_detection;
pub mod overlay;
mod raster;
mod rect;

#[cfg(test)]
pub(crate) mod testing;

pub mod prelude;

// ============================================================================
// Geometry and input
// ============================================================================

pub use raster::RgbRaster;
pub use rect::Rect;

// ============================================================================
// Bubble detection
// ============================================================================

pub use bubble_detection::{
    BubbleDetector,
    // Configuration
    Config as BubbleDetectionConfig,
    DebugMasks,
    DetectError,
    // Main API
    DetectionResult,
    Diagnostics as BubbleDetectionDiagnostics,
    DilationParams,
    detect,
    luminance,
};
