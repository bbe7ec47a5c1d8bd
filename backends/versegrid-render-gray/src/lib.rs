//! Gray Renderer: grid cells stretched across the full 0-255 range
//!
//! Byte grids rarely use the whole range; Arabic text mapped modulo 256
//! clusters in a narrow band. The renderer rescales linearly so the
//! smallest cell becomes black and the largest becomes white:
//!
//! ```text
//! out = (value - min) * 255 / (max - min)
//! ```
//!
//! evaluated in integers and truncated. Zero padding counts towards the
//! minimum, exactly like any other cell.

use versegrid_core::{
    error::{RenderError, Result},
    grid::Grid,
    traits::Renderer,
    types::BitmapData,
    RenderParams, UniformPolicy,
};

/// Linear min-max normalization to 8-bit grayscale
#[derive(Debug, Clone, Copy, Default)]
pub struct GrayRenderer;

impl GrayRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for GrayRenderer {
    fn name(&self) -> &'static str {
        "gray"
    }

    fn render(&self, grid: &Grid, params: &RenderParams) -> Result<BitmapData> {
        let (min, max) = (grid.min(), grid.max());
        log::debug!(
            "GrayRenderer: {}x{} grid, values {min}..={max}",
            grid.height(),
            grid.width()
        );

        let data = if min == max {
            match params.uniform {
                UniformPolicy::Zero => {
                    log::warn!("Grid is uniform ({min}); rendering an all-black image");
                    vec![0; grid.cells().len()]
                },
                UniformPolicy::Error => {
                    return Err(RenderError::UniformGrid { value: min }.into());
                },
            }
        } else {
            normalize(grid.cells(), min, max)
        };

        Ok(BitmapData {
            width: grid.width(),
            height: grid.height(),
            data,
        })
    }
}

/// Rescale `cells` so `min` maps to 0 and `max` to 255; requires `min < max`
pub fn normalize(cells: &[u8], min: u8, max: u8) -> Vec<u8> {
    let range = u32::from(max.saturating_sub(min)).max(1);
    cells
        .iter()
        .map(|&value| {
            let offset = u32::from(value.saturating_sub(min));
            (offset * 255 / range).min(255) as u8
        })
        .collect()
}
