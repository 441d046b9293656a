//! Crop → resize → encode
//!
//! Steps run in a fixed order regardless of how the request lists them. Missing steps
//! are skipped. The raster is always re-encoded, so a request with no steps produces a
//! PNG copy of the source.

use crate::encode::{clamp_quality, encode, OutputFormat};
use crate::error::{ProcessingError, ProcessingResult};
use crate::image::{crop, resize};
use bytes::Bytes;
use image::GenericImageView;
use imagecrop_core::models::ProcessImageRequest;

/// Format label used when the request has no convert step
pub const DEFAULT_FORMAT_LABEL: &str = "png";

/// Encoded pipeline result
#[derive(Debug, Clone)]
pub struct TransformOutput {
    pub data: Bytes,
    pub width: u32,
    pub height: u32,
    /// Requested format label, echoed verbatim even when it fell back to PNG
    pub format: String,
}

#[derive(Debug, Clone, Copy)]
pub struct TransformPipeline {
    default_quality: u8,
}

impl TransformPipeline {
    pub fn new(default_quality: u8) -> Self {
        Self {
            default_quality: default_quality.min(100),
        }
    }

    pub fn default_quality(&self) -> u8 {
        self.default_quality
    }

    /// Quality for the encode step: compress wins over convert, then the configured default.
    pub fn resolve_quality(&self, request: &ProcessImageRequest) -> u8 {
        request
            .compress
            .map(|c| c.quality)
            .or_else(|| request.convert.as_ref().and_then(|c| c.quality))
            .map(clamp_quality)
            .unwrap_or(self.default_quality)
    }

    /// Decode `data` and apply the request's steps
    pub fn run(
        &self,
        data: &[u8],
        request: &ProcessImageRequest,
    ) -> ProcessingResult<TransformOutput> {
        let mut img = image::load_from_memory(data).map_err(ProcessingError::Decode)?;
        tracing::debug!(
            width = img.width(),
            height = img.height(),
            "Decoded source image"
        );

        if let Some(spec) = &request.crop {
            img = crop(img, spec)?;
            tracing::debug!(
                x = spec.x,
                y = spec.y,
                width = spec.width,
                height = spec.height,
                "Applied crop"
            );
        }

        if let Some(spec) = &request.resize {
            img = resize(img, spec)?;
            tracing::debug!(
                width = img.width(),
                height = img.height(),
                "Applied resize"
            );
        }

        let label = request
            .convert
            .as_ref()
            .map(|c| c.target_format.clone())
            .unwrap_or_else(|| DEFAULT_FORMAT_LABEL.to_string());
        let format = OutputFormat::from_label(&label);
        let quality = self.resolve_quality(request);

        let (width, height) = img.dimensions();
        let data = encode(&img, format, quality)?;

        tracing::debug!(
            format = %label,
            quality = quality,
            size_bytes = data.len(),
            "Encoded output"
        );

        Ok(TransformOutput {
            data,
            width,
            height,
            format: label,
        })
    }
}
