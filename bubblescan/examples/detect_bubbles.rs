//! Example: Detect speech bubbles in a screenshot
//!
//! Runs bubble detection on one image, then writes an annotated copy and one
//! crop per detected region.
//!
//! Output:
//! ```text
//! test_output/bubbles/
//!   <name>_detected.png
//!   <name>_mask_dark.png
//!   <name>_mask_light.png
//!   <name>_bubble_00.png, <name>_bubble_01.png, ...
//! ```
//!
//! # Usage
//!
//! ```bash
//! cargo run --example detect_bubbles -- page.png [detector.yaml]
//! ```

use std::env;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, bail};
use bubblescan::{BubbleDetectionConfig, BubbleDetector, overlay};

fn main() -> anyhow::Result<()> {
    common::log_setup::setup_logging("info", "detect_bubbles")?;

    let mut args = env::args().skip(1);
    let Some(image_path) = args.next().map(PathBuf::from) else {
        bail!("usage: detect_bubbles <image> [config.yaml|config.json]");
    };

    let config = match args.next() {
        Some(path) => BubbleDetectionConfig::load_file(&path)
            .with_context(|| format!("Failed to load config {}", path))?,
        None => BubbleDetectionConfig::default(),
    };
    let detector = BubbleDetector::from_config(config)?;

    let image = image::open(&image_path)
        .with_context(|| format!("Failed to open {}", image_path.display()))?
        .to_rgb8();
    tracing::info!(
        path = %image_path.display(),
        width = image.width(),
        height = image.height(),
        "Image loaded"
    );

    let start = Instant::now();
    let result = detector.detect(&image)?;
    tracing::info!(
        boxes = result.boxes.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Detection complete"
    );
    tracing::info!(diagnostics = ?result.diagnostics, "Diagnostics");

    for (index, rect) in result.boxes.iter().enumerate() {
        tracing::info!(
            index,
            x = rect.x,
            y = rect.y,
            width = rect.width,
            height = rect.height,
            "Bubble"
        );
    }

    let output_dir = common::test_utils::test_output_path("bubbles");
    std::fs::create_dir_all(&output_dir)?;
    let stem = file_stem(&image_path);

    let annotated = overlay::draw_detections(&image, &result.boxes);
    annotated.save(output_dir.join(format!("{}_detected.png", stem)))?;

    let masks = detector.debug_masks(&image)?;
    overlay::mask_to_image(&masks.dilated_dark)
        .save(output_dir.join(format!("{}_mask_dark.png", stem)))?;
    overlay::mask_to_image(&masks.dilated_light)
        .save(output_dir.join(format!("{}_mask_light.png", stem)))?;

    for (index, crop) in overlay::crop_regions(&image, &result.boxes)
        .iter()
        .enumerate()
    {
        crop.save(output_dir.join(format!("{}_bubble_{:02}.png", stem, index)))?;
    }

    tracing::info!(path = %output_dir.display(), "Saved results");
    Ok(())
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string())
}
