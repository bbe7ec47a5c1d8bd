//! The engine that drives verses through six stages to become an image

// this_file: crates/versegrid-core/src/pipeline.rs

use crate::{
    bytes::map_bytes,
    context::PipelineContext,
    error::{ExportError, GridError, Result, VersegridError},
    grid::Grid,
    traits::{Exporter, Renderer, Shaper, Stage, TextSource},
    types::BitmapData,
    RenderParams, ShapingParams,
};
use std::path::Path;
use std::sync::Arc;

/// Verses are joined with this before shaping
pub const VERSE_SEPARATOR: &str = " ";

/// Pipeline: Parse → Shape → Map → Grid → Render → Export
///
/// Runs six stages, each fully consuming its input before the next begins:
/// 1. **InputParsing** - The source reads the corpus into verses
/// 2. **Shaping** - Verses are joined and shaped for display
/// 3. **ByteMapping** - Characters collapse to bytes
/// 4. **GridBuilding** - Bytes fold into a grid
/// 5. **Rendering** - The grid becomes a normalized bitmap
/// 6. **Export** - The bitmap is encoded and written to the output path
///
/// ```ignore
/// use versegrid_core::Pipeline;
///
/// let pipeline = Pipeline::builder()
///     .source(my_source)
///     .shaper(my_shaper)
///     .renderer(my_renderer)
///     .exporter(my_exporter)
///     .build()?;
///
/// let result = pipeline.process(input, output)?;
/// ```
pub struct Pipeline {
    stages: Vec<Box<dyn Stage>>,
    source: Option<Arc<dyn TextSource>>,
    shaper: Option<Arc<dyn Shaper>>,
    renderer: Option<Arc<dyn Renderer>>,
    exporter: Option<Arc<dyn Exporter>>,
    shaping_params: ShapingParams,
    grid_height: Option<u32>,
    render_params: RenderParams,
}

/// What a successful run leaves behind
#[derive(Debug, Clone)]
pub struct Visualization {
    pub grid: Grid,
    pub image: BitmapData,
    /// Size of the file written to the output path
    pub encoded_len: usize,
}

impl Pipeline {
    /// Start building a new pipeline
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    /// Read `input`, write the image to `output`, hand back grid and bitmap
    pub fn process(&self, input: &Path, output: &Path) -> Result<Visualization> {
        // All four backends must be present before touching the filesystem
        if self.source.is_none() {
            return Err(VersegridError::ConfigError("No text source configured".into()));
        }
        if self.shaper.is_none() {
            return Err(VersegridError::ConfigError("No shaper configured".into()));
        }
        if self.renderer.is_none() {
            return Err(VersegridError::ConfigError("No renderer configured".into()));
        }
        if self.exporter.is_none() {
            return Err(VersegridError::ConfigError("No exporter configured".into()));
        }

        let mut context = PipelineContext::new(input.to_path_buf(), output.to_path_buf());
        context.set_shaping_params(self.shaping_params.clone());
        context.set_grid_height(self.grid_height);
        context.set_render_params(self.render_params.clone());

        let (grid, image, exported) = self.execute(context)?.into_results();

        let grid = grid.ok_or_else(|| VersegridError::Pipeline("No grid produced".into()))?;
        let image =
            image.ok_or_else(|| VersegridError::Pipeline("No render output produced".into()))?;

        Ok(Visualization {
            grid,
            image,
            encoded_len: exported.map_or(0, |bytes| bytes.len()),
        })
    }

    /// Run every stage over a prepared context
    pub fn execute(&self, mut context: PipelineContext) -> Result<PipelineContext> {
        // Backends need to know where they live
        if let Some(source) = &self.source {
            context.set_source(source.clone());
        }
        if let Some(shaper) = &self.shaper {
            context.set_shaper(shaper.clone());
        }
        if let Some(renderer) = &self.renderer {
            context.set_renderer(renderer.clone());
        }
        if let Some(exporter) = &self.exporter {
            context.set_exporter(exporter.clone());
        }

        for stage in &self.stages {
            log::debug!("Executing stage: {}", stage.name());
            context = stage.process(context)?;
        }

        Ok(context)
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|stage| stage.name()).collect()
    }
}

/// Build pipelines piece by piece
///
/// ```ignore
/// let pipeline = Pipeline::builder()
///     .source(Arc::new(VerseReader::new()))
///     .shaper(Arc::new(ArabicShaper::new()))
///     .renderer(Arc::new(GrayRenderer::new()))
///     .exporter(Arc::new(PngExporter::new()))
///     .grid_height(Some(64))
///     .build()?;
/// ```
pub struct PipelineBuilder {
    stages: Vec<Box<dyn Stage>>,
    source: Option<Arc<dyn TextSource>>,
    shaper: Option<Arc<dyn Shaper>>,
    renderer: Option<Arc<dyn Renderer>>,
    exporter: Option<Arc<dyn Exporter>>,
    shaping_params: ShapingParams,
    grid_height: Option<u32>,
    render_params: RenderParams,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self {
            stages: Vec::new(),
            source: None,
            shaper: None,
            renderer: None,
            exporter: None,
            shaping_params: ShapingParams::default(),
            grid_height: None,
            render_params: RenderParams::default(),
        }
    }

    /// Replace the default six stages with your own sequence
    pub fn stage(mut self, stage: Box<dyn Stage>) -> Self {
        self.stages.push(stage);
        self
    }

    pub fn source(mut self, source: Arc<dyn TextSource>) -> Self {
        self.source = Some(source);
        self
    }

    pub fn shaper(mut self, shaper: Arc<dyn Shaper>) -> Self {
        self.shaper = Some(shaper);
        self
    }

    pub fn renderer(mut self, renderer: Arc<dyn Renderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    pub fn exporter(mut self, exporter: Arc<dyn Exporter>) -> Self {
        self.exporter = Some(exporter);
        self
    }

    pub fn shaping_params(mut self, params: ShapingParams) -> Self {
        self.shaping_params = params;
        self
    }

    /// Fix the number of grid rows instead of deriving it from the input
    pub fn grid_height(mut self, height: Option<u32>) -> Self {
        self.grid_height = height;
        self
    }

    pub fn render_params(mut self, params: RenderParams) -> Self {
        self.render_params = params;
        self
    }

    pub fn build(self) -> Result<Pipeline> {
        if self.grid_height == Some(0) {
            return Err(GridError::ZeroHeight.into());
        }

        // No custom stages? Use the classic six
        let stages = if self.stages.is_empty() {
            vec![
                Box::new(InputParsingStage) as Box<dyn Stage>,
                Box::new(ShapingStage) as Box<dyn Stage>,
                Box::new(ByteMappingStage) as Box<dyn Stage>,
                Box::new(GridBuildingStage) as Box<dyn Stage>,
                Box::new(RenderingStage) as Box<dyn Stage>,
                Box::new(ExportStage) as Box<dyn Stage>,
            ]
        } else {
            self.stages
        };

        Ok(Pipeline {
            stages,
            source: self.source,
            shaper: self.shaper,
            renderer: self.renderer,
            exporter: self.exporter,
            shaping_params: self.shaping_params,
            grid_height: self.grid_height,
            render_params: self.render_params,
        })
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Write encoded bytes to `path`, closing the file on every exit path
pub fn write_output(path: &Path, bytes: &[u8]) -> Result<()> {
    std::fs::write(path, bytes).map_err(|source| {
        ExportError::WriteFailed {
            path: path.to_path_buf(),
            source,
        }
        .into()
    })
}

struct InputParsingStage;
impl Stage for InputParsingStage {
    fn name(&self) -> &'static str {
        "InputParsing"
    }

    fn process(&self, mut context: PipelineContext) -> Result<PipelineContext> {
        let source = context
            .source()
            .ok_or_else(|| VersegridError::Pipeline("No text source configured".into()))?;

        log::debug!("Reading {} with {}", context.input_path().display(), source.name());
        let verses = source.read_verses(context.input_path())?;
        if verses.is_empty() {
            return Err(VersegridError::EmptyContent(format!(
                "no verses found in {}",
                context.input_path().display()
            )));
        }

        log::debug!("InputParsing: {} verses", verses.len());
        context.set_verses(verses);
        Ok(context)
    }
}

struct ShapingStage;
impl Stage for ShapingStage {
    fn name(&self) -> &'static str {
        "Shaping"
    }

    fn process(&self, mut context: PipelineContext) -> Result<PipelineContext> {
        let shaper = context
            .shaper()
            .ok_or_else(|| VersegridError::Pipeline("No shaper configured".into()))?;

        let text = context
            .verses()
            .ok_or_else(|| VersegridError::Pipeline("No verses available".into()))?
            .join(VERSE_SEPARATOR);

        log::debug!("Shaping {} chars with backend: {}", text.chars().count(), shaper.name());
        let shaped = shaper.shape(&text, context.shaping_params())?;

        context.set_shaped(shaped);
        Ok(context)
    }
}

struct ByteMappingStage;
impl Stage for ByteMappingStage {
    fn name(&self) -> &'static str {
        "ByteMapping"
    }

    fn process(&self, mut context: PipelineContext) -> Result<PipelineContext> {
        let bytes = map_bytes(
            context
                .shaped()
                .ok_or_else(|| VersegridError::Pipeline("No shaped text available".into()))?,
        );

        log::debug!("ByteMapping: {} bytes", bytes.len());
        context.set_bytes(bytes);
        Ok(context)
    }
}

struct GridBuildingStage;
impl Stage for GridBuildingStage {
    fn name(&self) -> &'static str {
        "GridBuilding"
    }

    fn process(&self, mut context: PipelineContext) -> Result<PipelineContext> {
        let bytes = context
            .take_bytes()
            .ok_or_else(|| VersegridError::Pipeline("No byte sequence available".into()))?;

        let grid = Grid::from_bytes(bytes, context.grid_height())?;
        log::debug!(
            "GridBuilding: {}x{} with {} padding",
            grid.height(),
            grid.width(),
            grid.padding()
        );

        context.set_grid(grid);
        Ok(context)
    }
}

struct RenderingStage;
impl Stage for RenderingStage {
    fn name(&self) -> &'static str {
        "Rendering"
    }

    fn process(&self, mut context: PipelineContext) -> Result<PipelineContext> {
        let renderer = context
            .renderer()
            .ok_or_else(|| VersegridError::Pipeline("No renderer configured".into()))?;

        let grid = context
            .grid()
            .ok_or_else(|| VersegridError::Pipeline("No grid available".into()))?;

        log::debug!("Rendering with backend: {}", renderer.name());
        let output = renderer.render(grid, context.render_params())?;

        if (output.height, output.width) != grid.dimensions() {
            return Err(VersegridError::Pipeline(format!(
                "{} produced {}x{} for a {}x{} grid",
                renderer.name(),
                output.height,
                output.width,
                grid.height(),
                grid.width()
            )));
        }

        context.set_output(output);
        Ok(context)
    }
}

struct ExportStage;
impl Stage for ExportStage {
    fn name(&self) -> &'static str {
        "Export"
    }

    fn process(&self, mut context: PipelineContext) -> Result<PipelineContext> {
        if let Some(exporter) = context.exporter() {
            let output = context
                .output()
                .ok_or_else(|| VersegridError::Pipeline("No render output available".into()))?;

            log::debug!("Exporting with backend: {}", exporter.name());
            let exported = exporter.export(output)?;
            write_output(context.output_path(), &exported)?;

            context.set_exported(exported);
        }

        Ok(context)
    }
}
