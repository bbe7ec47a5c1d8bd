//! PNG export format
//!
//! Writes single-channel 8-bit PNGs through the `image` crate's encoder.

use image::ImageEncoder;
use versegrid_core::{
    error::{ExportError, Result},
    traits::Exporter,
    types::BitmapData,
};

/// Check that `bitmap` carries exactly `width * height` gray samples.
pub(crate) fn validate(bitmap: &BitmapData) -> Result<()> {
    let expected = bitmap.expected_len();
    if bitmap.data.len() != expected {
        return Err(ExportError::EncodingFailed(format!(
            "Buffer size mismatch: expected {} bytes for {}x{} gray, got {}",
            expected,
            bitmap.width,
            bitmap.height,
            bitmap.data.len()
        ))
        .into());
    }
    if bitmap.width == 0 || bitmap.height == 0 {
        return Err(ExportError::EncodingFailed(format!(
            "Cannot encode a {}x{} image",
            bitmap.width, bitmap.height
        ))
        .into());
    }
    Ok(())
}

/// Encode a grayscale bitmap to PNG bytes.
///
/// The output is a valid PNG with IHDR, IDAT, and IEND chunks and color
/// type 0 (grayscale), bit depth 8.
pub fn encode_gray_png(bitmap: &BitmapData) -> Result<Vec<u8>> {
    validate(bitmap)?;

    let mut png_data = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new_with_quality(
        &mut png_data,
        image::codecs::png::CompressionType::Default,
        image::codecs::png::FilterType::Sub,
    );

    encoder
        .write_image(&bitmap.data, bitmap.width, bitmap.height, image::ExtendedColorType::L8)
        .map_err(|e| ExportError::EncodingFailed(format!("PNG encoding failed: {}", e)))?;

    Ok(png_data)
}

/// PNG exporter for rendered grids
///
/// # Examples
///
/// ```
/// use versegrid_export::PngExporter;
/// let exporter = PngExporter::new();
/// ```
pub struct PngExporter;

impl PngExporter {
    /// Create a new PNG exporter
    pub fn new() -> Self {
        Self
    }
}

impl Exporter for PngExporter {
    fn name(&self) -> &'static str {
        "png"
    }

    fn export(&self, bitmap: &BitmapData) -> Result<Vec<u8>> {
        encode_gray_png(bitmap)
    }

    fn extension(&self) -> &'static str {
        "png"
    }

    fn mime_type(&self) -> &'static str {
        "image/png"
    }
}

impl Default for PngExporter {
    fn default() -> Self {
        Self::new()
    }
}
