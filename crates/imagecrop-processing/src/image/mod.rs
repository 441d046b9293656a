//! Raster transformation steps
//!
//! Each step takes the working raster by value and returns the next one, so a superseded
//! raster is dropped as soon as its successor exists.

pub mod crop;
pub mod resize;

pub use crop::crop;
pub use resize::{resize, target_dimensions, RESIZE_FILTER};

use crate::error::{ProcessingError, ProcessingResult};

/// Largest raster any step may allocate
pub const MAX_CANVAS_PIXELS: u64 = 100_000_000;

/// Convert requested dimensions into a raster size, rejecting non-positive or oversized values.
pub(crate) fn checked_canvas(width: i64, height: i64, step: &str) -> ProcessingResult<(u32, u32)> {
    if width <= 0 || height <= 0 {
        return Err(ProcessingError::InvalidGeometry(format!(
            "{} width and height must be positive (got {}x{})",
            step, width, height
        )));
    }

    let (w, h) = match (u32::try_from(width), u32::try_from(height)) {
        (Ok(w), Ok(h)) => (w, h),
        _ => {
            return Err(ProcessingError::InvalidGeometry(format!(
                "{} dimensions {}x{} are too large",
                step, width, height
            )))
        }
    };

    if u64::from(w) * u64::from(h) > MAX_CANVAS_PIXELS {
        return Err(ProcessingError::InvalidGeometry(format!(
            "{} dimensions {}x{} exceed the {} pixel limit",
            step, w, h, MAX_CANVAS_PIXELS
        )));
    }

    Ok((w, h))
}
