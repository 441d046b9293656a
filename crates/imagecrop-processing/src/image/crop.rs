//! Rectangle crop onto a transparent canvas.
//!
//! The output always has exactly the requested size. Source pixels inside the rectangle
//! are copied verbatim; any part of the rectangle that falls outside the source stays
//! fully transparent.

use super::checked_canvas;
use crate::error::{ProcessingError, ProcessingResult};
use image::{imageops, DynamicImage, RgbaImage};
use imagecrop_core::models::CropSpec;

pub fn crop(img: DynamicImage, spec: &CropSpec) -> ProcessingResult<DynamicImage> {
    let (width, height) = checked_canvas(spec.width, spec.height, "crop")?;

    let (offset_x, offset_y) = match (spec.x.checked_neg(), spec.y.checked_neg()) {
        (Some(x), Some(y)) => (x, y),
        _ => {
            return Err(ProcessingError::InvalidGeometry(format!(
                "crop origin ({}, {}) is out of range",
                spec.x, spec.y
            )))
        }
    };

    let mut canvas = RgbaImage::new(width, height);
    imageops::replace(&mut canvas, &img, offset_x, offset_y);

    Ok(DynamicImage::ImageRgba8(canvas))
}
