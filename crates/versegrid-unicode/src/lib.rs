// this_file: crates/versegrid-unicode/src/lib.rs

//! Arabic shaping and bidi reordering for the versegrid pipeline.
//!
//! [`ArabicShaper`] runs two passes over the joined verses: contextual
//! reshaping into presentation forms, then visual reordering so that the
//! string reads left to right the way it would be drawn. Plain ASCII comes
//! out unchanged.

pub mod bidi;
pub mod reshape;

pub use bidi::BidiReorderer;
pub use reshape::{ArabicReshaper, Joining};

use versegrid_core::{error::Result, traits::Shaper, ShapingParams};

/// Reshape, then reorder
#[derive(Debug, Clone, Copy, Default)]
pub struct ArabicShaper;

impl ArabicShaper {
    pub fn new() -> Self {
        Self
    }

    /// Shape without going through the trait object
    pub fn shape_text(&self, text: &str, params: &ShapingParams) -> String {
        let reshaped = ArabicReshaper::new()
            .delete_harakat(params.delete_harakat)
            .ligatures(params.ligatures)
            .reshape(text);
        BidiReorderer::new(params.direction).reorder(&reshaped)
    }
}

impl Shaper for ArabicShaper {
    fn name(&self) -> &'static str {
        "arabic"
    }

    fn shape(&self, text: &str, params: &ShapingParams) -> Result<String> {
        log::debug!("ArabicShaper: shaping {} chars", text.chars().count());
        let shaped = self.shape_text(text, params);
        log::trace!("ArabicShaper: {} chars after shaping", shaped.chars().count());
        Ok(shaped)
    }
}


#[cfg(test)]
mod proptests;
