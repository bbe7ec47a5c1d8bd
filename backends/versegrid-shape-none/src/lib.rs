//! None Shaper - text passes through in logical order
//!
//! Used when contextual forms and visual reordering are switched off, so
//! the byte grid reflects the code points exactly as they were stored.

use versegrid_core::{error::Result, traits::Shaper, ShapingParams};

/// A shaper that returns its input unchanged
pub struct NoneShaper;

impl NoneShaper {
    /// Create a new NoneShaper
    pub fn new() -> Self {
        Self
    }
}

impl Default for NoneShaper {
    fn default() -> Self {
        Self::new()
    }
}

impl Shaper for NoneShaper {
    fn name(&self) -> &'static str {
        "none"
    }

    fn shape(&self, text: &str, _params: &ShapingParams) -> Result<String> {
        log::debug!("NoneShaper: passing {} chars through", text.chars().count());
        Ok(text.to_owned())
    }
}
