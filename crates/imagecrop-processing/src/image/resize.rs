use super::checked_canvas;
use crate::error::ProcessingResult;
use image::{imageops::FilterType, DynamicImage, GenericImageView};
use imagecrop_core::models::ResizeSpec;

/// Resample filter used for every resize
pub const RESIZE_FILTER: FilterType = FilterType::Triangle;

/// Calculate target dimensions for a resize request.
///
/// Returns `None` when the request names neither width nor height. A side derived from the
/// aspect ratio is rounded half away from zero and never drops below 1; explicit values
/// must be positive.
pub fn target_dimensions(
    current: (u32, u32),
    spec: &ResizeSpec,
) -> ProcessingResult<Option<(u32, u32)>> {
    let (current_width, current_height) = current;

    let (width, height) = match (spec.width, spec.height) {
        (None, None) => return Ok(None),
        (Some(w), Some(h)) => (w, h),
        (Some(w), None) if spec.maintain_aspect_ratio => {
            checked_canvas(w, 1, "resize")?;
            let h = w as f64 * f64::from(current_height) / f64::from(current_width);
            (w, derived_side(h))
        }
        (None, Some(h)) if spec.maintain_aspect_ratio => {
            checked_canvas(1, h, "resize")?;
            let w = h as f64 * f64::from(current_width) / f64::from(current_height);
            (derived_side(w), h)
        }
        (w, h) => (
            w.unwrap_or_else(|| i64::from(current_width)),
            h.unwrap_or_else(|| i64::from(current_height)),
        ),
    };

    checked_canvas(width, height, "resize").map(Some)
}

fn derived_side(value: f64) -> i64 {
    (value.round() as i64).max(1)
}

/// Resize the working raster according to `spec`
pub fn resize(img: DynamicImage, spec: &ResizeSpec) -> ProcessingResult<DynamicImage> {
    match target_dimensions(img.dimensions(), spec)? {
        None => Ok(img),
        Some(dimensions) if dimensions == img.dimensions() => Ok(img),
        Some((width, height)) => Ok(img.resize_exact(width, height, RESIZE_FILTER)),
    }
}
