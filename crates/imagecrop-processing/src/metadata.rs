//! Image metadata probing

use crate::error::{ProcessingError, ProcessingResult};
use image::ImageReader;
use serde::{Deserialize, Serialize};
use std::io::Cursor;

/// Image metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageMetadata {
    pub width: u32,
    pub height: u32,
    /// Lower-cased file extension the bytes were stored under
    pub format: String,
    pub size_bytes: u64,
}

impl ImageMetadata {
    /// Build metadata for stored bytes, reading only as much as needed for dimensions.
    ///
    /// `format` is the extension the file was stored under and is not re-derived from
    /// the content.
    pub fn extract(data: &[u8], extension: &str) -> ProcessingResult<Self> {
        let (width, height) = probe_dimensions(data)?;
        Ok(Self {
            width,
            height,
            format: extension.trim_start_matches('.').to_lowercase(),
            size_bytes: data.len() as u64,
        })
    }
}

/// Read pixel dimensions from the image header
pub fn probe_dimensions(data: &[u8]) -> ProcessingResult<(u32, u32)> {
    let reader = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| ProcessingError::Decode(image::ImageError::IoError(e)))?;

    // Unrecognised signatures fail here with an Unsupported error
    reader.into_dimensions().map_err(ProcessingError::Decode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};

    fn create_test_image(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
        let img = image::DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            width,
            height,
            Rgba([255, 0, 0, 255]),
        ));
        let img = if format == ImageFormat::Jpeg {
            image::DynamicImage::ImageRgb8(img.to_rgb8())
        } else {
            img
        };
        let mut buffer = Vec::new();
        img.write_to(&mut Cursor::new(&mut buffer), format).unwrap();
        buffer
    }

    #[test]
    fn test_probe_dimensions_png() {
        let data = create_test_image(120, 45, ImageFormat::Png);
        assert_eq!(probe_dimensions(&data).unwrap(), (120, 45));
    }

    #[test]
    fn test_probe_dimensions_jpeg() {
        let data = create_test_image(800, 600, ImageFormat::Jpeg);
        assert_eq!(probe_dimensions(&data).unwrap(), (800, 600));
    }

    #[test]
    fn test_probe_dimensions_invalid() {
        let result = probe_dimensions(b"not an image");
        assert!(matches!(result, Err(ProcessingError::Decode(_))));
    }

    #[test]
    fn test_extract_uses_extension_not_content() {
        let data = create_test_image(10, 20, ImageFormat::Png);
        let metadata = ImageMetadata::extract(&data, "JPG").unwrap();

        assert_eq!(metadata.width, 10);
        assert_eq!(metadata.height, 20);
        assert_eq!(metadata.format, "jpg");
        assert_eq!(metadata.size_bytes, data.len() as u64);
    }

    #[test]
    fn test_image_metadata_serialization() {
        let metadata = ImageMetadata {
            width: 1920,
            height: 1080,
            format: "png".to_string(),
            size_bytes: 1024000,
        };

        let json = serde_json::to_string(&metadata).unwrap();
        let deserialized: ImageMetadata = serde_json::from_str(&json).unwrap();
        assert_eq!(metadata, deserialized);
    }
}
