//! Export module for versegrid
//!
//! Turns a normalized grayscale bitmap into file bytes. The output path's
//! extension picks the format through [`exporter_for_path`].

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use versegrid_core::{
    error::{ExportError, Result},
    traits::Exporter,
    types::BitmapData,
};

pub mod png;
pub mod raster;

pub use png::PngExporter;
pub use raster::ImageExporter;

/// PGM (Portable Graymap) exporter
pub struct PnmExporter {
    encoding: PnmEncoding,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PnmEncoding {
    /// `P5`, raw bytes after the header
    Binary,
    /// `P2`, whitespace-separated decimal samples
    Ascii,
}

impl PnmExporter {
    pub fn new(encoding: PnmEncoding) -> Self {
        Self { encoding }
    }

    /// Binary (`P5`) graymap
    pub fn pgm() -> Self {
        Self::new(PnmEncoding::Binary)
    }

    /// ASCII (`P2`) graymap, one image row per line
    pub fn pgm_ascii() -> Self {
        Self::new(PnmEncoding::Ascii)
    }

    pub fn encoding(&self) -> PnmEncoding {
        self.encoding
    }
}

impl Exporter for PnmExporter {
    fn name(&self) -> &'static str {
        match self.encoding {
            PnmEncoding::Binary => "pgm",
            PnmEncoding::Ascii => "pgm-ascii",
        }
    }

    fn export(&self, bitmap: &BitmapData) -> Result<Vec<u8>> {
        png::validate(bitmap)?;

        let mut output = Vec::with_capacity(bitmap.data.len() * 4 + 32);
        let magic = match self.encoding {
            PnmEncoding::Binary => "P5",
            PnmEncoding::Ascii => "P2",
        };
        writeln!(&mut output, "{}", magic)?;
        writeln!(&mut output, "{} {}", bitmap.width, bitmap.height)?;
        writeln!(&mut output, "255")?; // Max gray value

        match self.encoding {
            PnmEncoding::Binary => output.extend_from_slice(&bitmap.data),
            PnmEncoding::Ascii => {
                for row in bitmap.data.chunks(bitmap.width as usize) {
                    let line: Vec<String> = row.iter().map(u8::to_string).collect();
                    writeln!(&mut output, "{}", line.join(" "))?;
                }
            },
        }

        Ok(output)
    }

    fn extension(&self) -> &'static str {
        "pgm"
    }

    fn mime_type(&self) -> &'static str {
        "image/x-portable-graymap"
    }
}

impl Default for PnmExporter {
    fn default() -> Self {
        Self::pgm()
    }
}

/// Pick an exporter from the lower-cased extension of `path`.
///
/// | extension      | exporter                  |
/// |----------------|---------------------------|
/// | `png`          | [`PngExporter`]           |
/// | `pgm`          | [`PnmExporter::pgm`]      |
/// | `bmp`          | [`ImageExporter::bmp`]    |
/// | `tif`, `tiff`  | [`ImageExporter::tiff`]   |
/// | `jpg`, `jpeg`  | [`ImageExporter::jpeg`]   |
/// | `gif`          | [`ImageExporter::gif`]    |
///
/// Anything else, including a missing extension, is
/// [`ExportError::FormatNotSupported`].
pub fn exporter_for_path(path: &Path) -> Result<Arc<dyn Exporter>> {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .ok_or_else(|| {
            ExportError::FormatNotSupported(format!(
                "{} has no file extension (expected png, pgm, bmp, tif, tiff, jpg, jpeg or gif)",
                path.display()
            ))
        })?;

    let exporter: Arc<dyn Exporter> = match ext.as_str() {
        "png" => Arc::new(PngExporter::new()),
        "pgm" => Arc::new(PnmExporter::pgm()),
        "bmp" => Arc::new(ImageExporter::bmp()),
        "tif" | "tiff" => Arc::new(ImageExporter::tiff()),
        "jpg" | "jpeg" => Arc::new(ImageExporter::jpeg()),
        "gif" => Arc::new(ImageExporter::gif()),
        other => {
            return Err(ExportError::FormatNotSupported(format!(
                "Unknown output format '.{}'",
                other
            ))
            .into())
        },
    };

    log::debug!("Selected {} exporter for {}", exporter.name(), path.display());
    Ok(exporter)
}
