//! The contracts that bind every backend together
//!
//! Each trait is one role in the pipeline. Swap an implementation and the
//! rest of the pipeline never notices.
//!
//! - [`Stage`] - The foundation every pipeline step builds upon
//! - [`TextSource`] - Where verses come from
//! - [`Shaper`] - Where logical text becomes display text
//! - [`Renderer`] - Where grids become pixels
//! - [`Exporter`] - Where pixels become files

use crate::{
    error::Result, grid::Grid, types::BitmapData, PipelineContext, RenderParams, ShapingParams,
};
use std::path::Path;

/// One step of the pipeline
///
/// ```ignore
/// struct MyStage;
///
/// impl Stage for MyStage {
///     fn name(&self) -> &'static str {
///         "my-stage"
///     }
///
///     fn process(&self, context: PipelineContext) -> Result<PipelineContext> {
///         // Transform the context, pass it forward
///         Ok(context)
///     }
/// }
/// ```
pub trait Stage: Send + Sync {
    /// Used for debugging and logging
    fn name(&self) -> &'static str;

    /// Take the context, make your changes, and return it for the next stage.
    fn process(&self, context: PipelineContext) -> Result<PipelineContext>;
}

/// Reads a corpus file into its list of verses
pub trait TextSource: Send + Sync {
    fn name(&self) -> &'static str;

    /// Every extracted verse, in file order
    ///
    /// Lines that do not fit the record layout are skipped, not reported.
    fn read_verses(&self, path: &Path) -> Result<Vec<String>>;
}

/// Turns logical-order text into the text a display should show
///
/// The result is opaque to the rest of the pipeline: its length and
/// characters are whatever the shaping algorithm decides.
pub trait Shaper: Send + Sync {
    fn name(&self) -> &'static str;

    fn shape(&self, text: &str, params: &ShapingParams) -> Result<String>;
}

/// Where grids become visible
pub trait Renderer: Send + Sync {
    fn name(&self) -> &'static str;

    /// Produce a bitmap with the same dimensions as `grid`
    fn render(&self, grid: &Grid, params: &RenderParams) -> Result<BitmapData>;
}

/// The final step: pixels become file contents
pub trait Exporter: Send + Sync {
    fn name(&self) -> &'static str;

    /// Encode the bitmap as bytes
    fn export(&self, bitmap: &BitmapData) -> Result<Vec<u8>>;

    /// What file extension should be used?
    fn extension(&self) -> &'static str;

    fn mime_type(&self) -> &'static str;
}
