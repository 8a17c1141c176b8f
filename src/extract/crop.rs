// Crop-region math: display-space rectangle -> source-pixel rectangle -> PNG.

use std::io::Cursor;

use image::DynamicImage;

use crate::error::WorkflowError;
use crate::geometry::Rect;

/// A crop region in source-image pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Map a display-space crop rectangle onto source pixels.
///
/// The image is shown scaled; the per-axis scale factor is
/// `natural / displayed`. The resulting rectangle is clamped into the source
/// bounds so a crop that grazes the image edge never reads past it.
pub fn map_to_source(
    display: &Rect,
    natural_width: u32,
    natural_height: u32,
    displayed_width: f32,
    displayed_height: f32,
) -> crate::error::Result<SourceRect> {
    if displayed_width <= 0.0 || displayed_height <= 0.0 {
        return Err(WorkflowError::crop(format!(
            "displayed size must be positive, got {displayed_width}x{displayed_height}"
        )));
    }

    let scale_x = natural_width as f32 / displayed_width;
    let scale_y = natural_height as f32 / displayed_height;

    let x = ((display.left * scale_x).floor().max(0.0) as u32).min(natural_width);
    let y = ((display.top * scale_y).floor().max(0.0) as u32).min(natural_height);
    let width = ((display.width * scale_x).round() as u32).min(natural_width - x);
    let height = ((display.height * scale_y).round() as u32).min(natural_height - y);

    if width == 0 || height == 0 {
        return Err(WorkflowError::crop(format!(
            "crop region collapses to {width}x{height} source pixels"
        )));
    }

    Ok(SourceRect {
        x,
        y,
        width,
        height,
    })
}

/// Crop a source image by a display-space rectangle and encode the result
/// as PNG bytes.
pub fn crop_to_png(
    source: &DynamicImage,
    display: &Rect,
    displayed_width: f32,
    displayed_height: f32,
) -> crate::error::Result<Vec<u8>> {
    let region = map_to_source(
        display,
        source.width(),
        source.height(),
        displayed_width,
        displayed_height,
    )?;

    let cropped = source.crop_imm(region.x, region.y, region.width, region.height);

    let mut buf = Cursor::new(Vec::new());
    cropped.write_to(&mut buf, image::ImageFormat::Png)?;

    Ok(buf.into_inner())
}
