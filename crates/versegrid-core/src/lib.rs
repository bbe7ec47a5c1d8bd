//! Versegrid Core: six stages from verses to pixels
//!
//! A corpus of `surah|ayah|text` lines enters, a grayscale image leaves.
//! This crate holds the pipeline that makes that transformation possible
//! and the contracts its backends implement.
//!
//! ## The Pipeline
//!
//! 1. **Input Parsing** - Lines become a list of verses
//! 2. **Shaping** - Joined verses get contextual forms and visual order
//! 3. **Byte Mapping** - Every character collapses to one byte
//! 4. **Grid Building** - Bytes fold into a near-square grid
//! 5. **Rendering** - The grid stretches to the full 0-255 range
//! 6. **Export** - Pixels are encoded and written to disk
//!
//! ## Build Your First Pipeline
//!
//! ```rust,no_run
//! use std::path::Path;
//! use std::sync::Arc;
//! use versegrid_core::Pipeline;
//!
//! # use versegrid_core::traits::*;
//! # use versegrid_core::{grid::Grid, types::BitmapData, RenderParams, ShapingParams};
//! # struct MySource;
//! # impl TextSource for MySource {
//! #     fn name(&self) -> &'static str { "test" }
//! #     fn read_verses(&self, _: &Path) -> versegrid_core::Result<Vec<String>> { unimplemented!() }
//! # }
//! # struct MyShaper;
//! # impl Shaper for MyShaper {
//! #     fn name(&self) -> &'static str { "test" }
//! #     fn shape(&self, _: &str, _: &ShapingParams) -> versegrid_core::Result<String> { unimplemented!() }
//! # }
//! # struct MyRenderer;
//! # impl Renderer for MyRenderer {
//! #     fn name(&self) -> &'static str { "test" }
//! #     fn render(&self, _: &Grid, _: &RenderParams) -> versegrid_core::Result<BitmapData> { unimplemented!() }
//! # }
//! # struct MyExporter;
//! # impl Exporter for MyExporter {
//! #     fn name(&self) -> &'static str { "test" }
//! #     fn export(&self, _: &BitmapData) -> versegrid_core::Result<Vec<u8>> { unimplemented!() }
//! #     fn extension(&self) -> &'static str { "png" }
//! #     fn mime_type(&self) -> &'static str { "image/png" }
//! # }
//! let pipeline = Pipeline::builder()
//!     .source(Arc::new(MySource))
//!     .shaper(Arc::new(MyShaper))
//!     .renderer(Arc::new(MyRenderer))
//!     .exporter(Arc::new(MyExporter))
//!     .build()?;
//!
//! let result = pipeline.process(Path::new("quran.txt"), Path::new("quran.png"))?;
//! println!("{}x{}", result.grid.height(), result.grid.width());
//! # Ok::<(), versegrid_core::VersegridError>(())
//! ```
//!
//! ## The Traits That Power Everything
//!
//! - [`Stage`] - The foundation every pipeline step builds upon
//! - [`TextSource`] - Where verses come from
//! - [`Shaper`] - Where logical text becomes display text
//! - [`Renderer`] - Where grids become pixels
//! - [`Exporter`] - Where pixels become files

pub mod bytes;
pub mod context;
pub mod error;
pub mod grid;
pub mod pipeline;
pub mod traits;

pub use context::PipelineContext;
pub use error::{ErrorKind, Result, VersegridError};
pub use grid::Grid;
pub use pipeline::{Pipeline, PipelineBuilder, Visualization};
pub use traits::{Exporter, Renderer, Shaper, Stage, TextSource};

/// The data structures that flow between stages
pub mod types {
    /// Paragraph direction used when resolving bidi levels
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub enum BaseDirection {
        /// Taken from the first strong character
        #[default]
        Auto,
        LeftToRight,
        RightToLeft,
    }

    /// Single-channel 8-bit pixels, row-major
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct BitmapData {
        pub width: u32,
        pub height: u32,
        pub data: Vec<u8>,
    }

    impl BitmapData {
        /// Number of bytes a buffer of these dimensions must hold
        pub fn expected_len(&self) -> usize {
            self.width as usize * self.height as usize
        }

        pub fn pixel(&self, x: u32, y: u32) -> Option<u8> {
            if x >= self.width || y >= self.height {
                return None;
            }
            self.data
                .get(y as usize * self.width as usize + x as usize)
                .copied()
        }
    }
}

/// How shaping should behave
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapingParams {
    pub direction: types::BaseDirection,
    /// Strip Arabic diacritics before choosing letter forms
    pub delete_harakat: bool,
    /// Fold lam followed by alef into the mandatory ligature
    pub ligatures: bool,
}

impl Default for ShapingParams {
    fn default() -> Self {
        Self {
            direction: types::BaseDirection::Auto,
            delete_harakat: true,
            ligatures: true,
        }
    }
}

/// What to do when every grid cell holds the same value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UniformPolicy {
    /// Emit an all-black image
    #[default]
    Zero,
    /// Fail with [`error::RenderError::UniformGrid`]
    Error,
}

/// How rendering should behave
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderParams {
    pub uniform: UniformPolicy,
}
