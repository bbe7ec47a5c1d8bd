//! BMP, TIFF, JPEG and GIF export through `image`'s generic encoders

use std::io::Cursor;

use image::{DynamicImage, GrayImage, ImageFormat};
use versegrid_core::{
    error::{ExportError, Result},
    traits::Exporter,
    types::BitmapData,
};

use crate::png::validate;

/// Exporter for any single-channel raster format `image` can write
pub struct ImageExporter {
    format: ImageFormat,
}

impl ImageExporter {
    /// Windows bitmap
    pub fn bmp() -> Self {
        Self {
            format: ImageFormat::Bmp,
        }
    }

    /// Tagged Image File Format
    pub fn tiff() -> Self {
        Self {
            format: ImageFormat::Tiff,
        }
    }

    /// JPEG at the encoder's default quality
    pub fn jpeg() -> Self {
        Self {
            format: ImageFormat::Jpeg,
        }
    }

    pub fn gif() -> Self {
        Self {
            format: ImageFormat::Gif,
        }
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }
}

impl Exporter for ImageExporter {
    fn name(&self) -> &'static str {
        match self.format {
            ImageFormat::Bmp => "bmp",
            ImageFormat::Tiff => "tiff",
            ImageFormat::Jpeg => "jpeg",
            ImageFormat::Gif => "gif",
            _ => "raster",
        }
    }

    fn export(&self, bitmap: &BitmapData) -> Result<Vec<u8>> {
        validate(bitmap)?;

        let img = GrayImage::from_raw(bitmap.width, bitmap.height, bitmap.data.clone())
            .ok_or_else(|| {
                ExportError::EncodingFailed("Failed to create image buffer from gray data".into())
            })?;

        let mut encoded = Vec::new();
        let mut cursor = Cursor::new(&mut encoded);
        let written = match self.format {
            // The GIF encoder only takes RGB(A) frames
            ImageFormat::Gif => DynamicImage::ImageLuma8(img)
                .to_rgb8()
                .write_to(&mut cursor, ImageFormat::Gif),
            format => img.write_to(&mut cursor, format),
        };
        written.map_err(|e| {
                ExportError::EncodingFailed(format!("{:?} encoding failed: {}", self.format, e))
            })?;

        log::debug!("{} exporter: {} bytes", self.name(), encoded.len());
        Ok(encoded)
    }

    fn extension(&self) -> &'static str {
        match self.format {
            ImageFormat::Bmp => "bmp",
            ImageFormat::Tiff => "tiff",
            ImageFormat::Jpeg => "jpg",
            ImageFormat::Gif => "gif",
            _ => "bin",
        }
    }

    fn mime_type(&self) -> &'static str {
        match self.format {
            ImageFormat::Bmp => "image/bmp",
            ImageFormat::Tiff => "image/tiff",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Gif => "image/gif",
            _ => "application/octet-stream",
        }
    }
}
