//! Commonly used types.
//!
//! ```rust,ignore
//! use bubblescan::prelude::*;
//! ```

pub use crate::{BubbleDetectionConfig, BubbleDetector, DetectError, DetectionResult, Rect, detect};
