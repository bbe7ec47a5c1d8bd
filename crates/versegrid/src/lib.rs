//! versegrid - a verse corpus seen as a picture of its bytes
//!
//! Reads a `field|field|text` corpus, shapes the Arabic text into its
//! displayed presentation forms, keeps the low byte of every code point,
//! folds the bytes into a near-square grid and writes that grid as a
//! contrast-stretched grayscale image.
//!
//! The pipeline runs six stages:
//! 1. Input parsing (`versegrid-input`)
//! 2. Shaping and bidi reordering (`versegrid-unicode`)
//! 3. Byte mapping
//! 4. Grid building
//! 5. Gray rendering (`versegrid-render-gray`)
//! 6. Export, format chosen by the output extension (`versegrid-export`)
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! if let Some(vis) = versegrid::visualize(Path::new("quran.txt"), Path::new("quran.png")) {
//!     println!("{}x{} grid", vis.grid.height(), vis.grid.width());
//! }
//! ```
//!
//! [`try_visualize`] returns the error instead of printing it, for callers
//! that need to tell failures apart through [`ErrorKind`].

use std::path::Path;
use std::sync::Arc;

pub use versegrid_core::{
    error, traits, types, ErrorKind, Grid, Pipeline, RenderParams, ShapingParams, UniformPolicy,
    Visualization,
};
pub use versegrid_export as export;
pub use versegrid_input as input;
pub use versegrid_render_gray as render_gray;
pub use versegrid_shape_none as shape_none;
pub use versegrid_unicode as unicode;

use versegrid_core::{error::Result, traits::Shaper};
use versegrid_export::exporter_for_path;
use versegrid_input::VerseReader;
use versegrid_render_gray::GrayRenderer;
use versegrid_shape_none::NoneShaper;
use versegrid_unicode::ArabicShaper;

/// Everything a caller can tune about one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Apply contextual forms and visual reordering before byte mapping
    pub shaping: bool,
    pub shaping_params: ShapingParams,
    /// Force the number of grid rows; `None` picks `floor(sqrt(n))`
    pub grid_height: Option<u32>,
    pub render_params: RenderParams,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            shaping: true,
            shaping_params: ShapingParams::default(),
            grid_height: None,
            render_params: RenderParams::default(),
        }
    }
}

/// Build the default pipeline for writing to `output`
pub fn pipeline_for(output: &Path, options: &Options) -> Result<Pipeline> {
    let shaper: Arc<dyn Shaper> = if options.shaping {
        Arc::new(ArabicShaper::new())
    } else {
        Arc::new(NoneShaper::new())
    };

    Pipeline::builder()
        .source(Arc::new(VerseReader::new()))
        .shaper(shaper)
        .renderer(Arc::new(GrayRenderer::new()))
        .exporter(exporter_for_path(output)?)
        .shaping_params(options.shaping_params.clone())
        .grid_height(options.grid_height)
        .render_params(options.render_params.clone())
        .build()
}

/// Run the whole pipeline and return the first error encountered
pub fn try_visualize(input: &Path, output: &Path, options: &Options) -> Result<Visualization> {
    log::info!("Visualizing {} -> {}", input.display(), output.display());
    let vis = pipeline_for(output, options)?.process(input, output)?;
    log::info!(
        "Wrote {} bytes ({}x{} grid)",
        vis.encoded_len,
        vis.grid.height(),
        vis.grid.width()
    );
    Ok(vis)
}

/// Visualize with default options
///
/// Prints the grid shape and output path on success. Any failure is
/// printed as `An error occurred: <message>` and yields `None`.
pub fn visualize(input: &Path, output: &Path) -> Option<Visualization> {
    visualize_with(input, output, &Options::default())
}

/// [`visualize`] with explicit options
pub fn visualize_with(input: &Path, output: &Path, options: &Options) -> Option<Visualization> {
    report(try_visualize(input, output, options), output, false)
}

/// Print the outcome of a run the way [`visualize`] does
///
/// Failures are logged at `error` and always printed. `quiet` only
/// silences the success lines.
pub fn report(result: Result<Visualization>, output: &Path, quiet: bool) -> Option<Visualization> {
    match result {
        Ok(vis) => {
            if !quiet {
                println!("Matrix shape: ({}, {})", vis.grid.height(), vis.grid.width());
                println!("Image saved to: {}", output.display());
            }
            Some(vis)
        },
        Err(e) => {
            log::error!("Visualization failed ({:?}): {}", e.kind(), e);
            println!("An error occurred: {}", e);
            None
        },
    }
}

/// Common imports for typical usage
pub mod prelude {
    pub use crate::{report, try_visualize, visualize, visualize_with, Options};
    pub use versegrid_core::{
        error::{Result, VersegridError},
        traits::{Exporter, Renderer, Shaper, TextSource},
        types::{BaseDirection, BitmapData},
        ErrorKind, Grid, Pipeline, RenderParams, ShapingParams, UniformPolicy, Visualization,
    };
}
