use crate::error::{ProcessingError, ProcessingResult};
use bytes::Bytes;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, GenericImageView, ImageFormat};
use std::io::Cursor;

/// Largest width or height libwebp accepts
pub const WEBP_MAX_DIMENSION: u32 = 16383;

/// Output encodings the pipeline can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Jpeg,
    WebP,
    Bmp,
    Gif,
}

impl OutputFormat {
    /// Parse a requested format label. Matching is case-insensitive and unknown labels
    /// fall back to PNG.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "jpg" | "jpeg" => OutputFormat::Jpeg,
            "webp" => OutputFormat::WebP,
            "bmp" => OutputFormat::Bmp,
            "gif" => OutputFormat::Gif,
            _ => OutputFormat::Png,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpg",
            OutputFormat::WebP => "webp",
            OutputFormat::Bmp => "bmp",
            OutputFormat::Gif => "gif",
        }
    }
}

/// Clamp a requested quality into 0..=100
pub fn clamp_quality(quality: i64) -> u8 {
    quality.clamp(0, 100) as u8
}

/// Encode a raster. `quality` is only consulted by lossy formats.
pub fn encode(img: &DynamicImage, format: OutputFormat, quality: u8) -> ProcessingResult<Bytes> {
    match format {
        OutputFormat::Jpeg => encode_jpeg(img, quality),
        OutputFormat::WebP => encode_webp(img, quality),
        OutputFormat::Png => write_with(img, ImageFormat::Png, format),
        OutputFormat::Bmp => write_with(img, ImageFormat::Bmp, format),
        OutputFormat::Gif => write_with(img, ImageFormat::Gif, format),
    }
}

fn encode_jpeg(img: &DynamicImage, quality: u8) -> ProcessingResult<Bytes> {
    // JPEG has no alpha channel
    let rgb = img.to_rgb8();

    let mut buffer = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut buffer, quality.max(1));
    encoder
        .encode_image(&rgb)
        .map_err(|e| ProcessingError::encode("jpeg", e))?;

    Ok(Bytes::from(buffer))
}

fn encode_webp(img: &DynamicImage, quality: u8) -> ProcessingResult<Bytes> {
    let (width, height) = img.dimensions();
    if width > WEBP_MAX_DIMENSION || height > WEBP_MAX_DIMENSION {
        return Err(ProcessingError::encode(
            "webp",
            format!(
                "{}x{} exceeds the maximum side of {} pixels",
                width, height, WEBP_MAX_DIMENSION
            ),
        ));
    }

    let rgba = img.to_rgba8();
    let encoder = webp::Encoder::from_rgba(&rgba, width, height);
    let webp_data = encoder
        .encode_simple(false, f32::from(quality))
        .map_err(|e| ProcessingError::encode("webp", format!("{:?}", e)))?;

    Ok(Bytes::copy_from_slice(&webp_data))
}

fn write_with(
    img: &DynamicImage,
    image_format: ImageFormat,
    format: OutputFormat,
) -> ProcessingResult<Bytes> {
    let mut buffer = Vec::new();
    img.write_to(&mut Cursor::new(&mut buffer), image_format)
        .map_err(|e| ProcessingError::encode(format.extension(), e))?;

    Ok(Bytes::from(buffer))
}
