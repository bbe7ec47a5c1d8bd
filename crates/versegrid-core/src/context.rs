//! The traveling container that carries data through pipeline stages

use crate::{
    grid::Grid,
    traits::{Exporter, Renderer, Shaper, TextSource},
    types::BitmapData,
    RenderParams, ShapingParams,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Everything a stage needs, nothing it doesn't
///
/// The context flows from stage to stage, accumulating the results of each
/// transformation. Lines become verses, verses become bytes, bytes become a
/// grid, and the grid becomes a file - all tracked here.
pub struct PipelineContext {
    // What we start with
    input_path: PathBuf,
    output_path: PathBuf,

    // Who does the work
    source: Option<Arc<dyn TextSource>>,
    shaper: Option<Arc<dyn Shaper>>,
    renderer: Option<Arc<dyn Renderer>>,
    exporter: Option<Arc<dyn Exporter>>,

    // What emerges along the way
    verses: Option<Vec<String>>,
    shaped: Option<String>,
    bytes: Option<Vec<u8>>,
    grid: Option<Grid>,
    output: Option<BitmapData>,
    exported: Option<Vec<u8>>,

    // How we want it done
    shaping_params: ShapingParams,
    grid_height: Option<u32>,
    render_params: RenderParams,
}

impl PipelineContext {
    /// Start fresh with the two paths
    pub fn new(input_path: PathBuf, output_path: PathBuf) -> Self {
        Self {
            input_path,
            output_path,
            source: None,
            shaper: None,
            renderer: None,
            exporter: None,
            verses: None,
            shaped: None,
            bytes: None,
            grid: None,
            output: None,
            exported: None,
            shaping_params: ShapingParams::default(),
            grid_height: None,
            render_params: RenderParams::default(),
        }
    }

    // Read what's inside

    pub fn input_path(&self) -> &Path {
        &self.input_path
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn source(&self) -> Option<Arc<dyn TextSource>> {
        self.source.clone()
    }

    pub fn shaper(&self) -> Option<Arc<dyn Shaper>> {
        self.shaper.clone()
    }

    pub fn renderer(&self) -> Option<Arc<dyn Renderer>> {
        self.renderer.clone()
    }

    pub fn exporter(&self) -> Option<Arc<dyn Exporter>> {
        self.exporter.clone()
    }

    pub fn verses(&self) -> Option<&[String]> {
        self.verses.as_deref()
    }

    pub fn shaped(&self) -> Option<&str> {
        self.shaped.as_deref()
    }

    pub fn grid(&self) -> Option<&Grid> {
        self.grid.as_ref()
    }

    pub fn output(&self) -> Option<&BitmapData> {
        self.output.as_ref()
    }

    pub fn exported(&self) -> Option<&[u8]> {
        self.exported.as_deref()
    }

    pub fn shaping_params(&self) -> &ShapingParams {
        &self.shaping_params
    }

    pub fn grid_height(&self) -> Option<u32> {
        self.grid_height
    }

    pub fn render_params(&self) -> &RenderParams {
        &self.render_params
    }

    // Change what's inside

    pub fn set_source(&mut self, source: Arc<dyn TextSource>) {
        self.source = Some(source);
    }

    pub fn set_shaper(&mut self, shaper: Arc<dyn Shaper>) {
        self.shaper = Some(shaper);
    }

    pub fn set_renderer(&mut self, renderer: Arc<dyn Renderer>) {
        self.renderer = Some(renderer);
    }

    pub fn set_exporter(&mut self, exporter: Arc<dyn Exporter>) {
        self.exporter = Some(exporter);
    }

    pub fn set_verses(&mut self, verses: Vec<String>) {
        self.verses = Some(verses);
    }

    pub fn set_shaped(&mut self, shaped: String) {
        self.shaped = Some(shaped);
    }

    /// Hand the byte sequence over to whoever builds the grid
    pub fn take_bytes(&mut self) -> Option<Vec<u8>> {
        self.bytes.take()
    }

    pub fn set_bytes(&mut self, bytes: Vec<u8>) {
        self.bytes = Some(bytes);
    }

    pub fn set_grid(&mut self, grid: Grid) {
        self.grid = Some(grid);
    }

    pub fn set_output(&mut self, output: BitmapData) {
        self.output = Some(output);
    }

    pub fn set_exported(&mut self, exported: Vec<u8>) {
        self.exported = Some(exported);
    }

    pub fn set_shaping_params(&mut self, params: ShapingParams) {
        self.shaping_params = params;
    }

    pub fn set_grid_height(&mut self, height: Option<u32>) {
        self.grid_height = height;
    }

    pub fn set_render_params(&mut self, params: RenderParams) {
        self.render_params = params;
    }

    /// Move the finished grid and image out of the context
    pub fn into_results(self) -> (Option<Grid>, Option<BitmapData>, Option<Vec<u8>>) {
        (self.grid, self.output, self.exported)
    }
}
