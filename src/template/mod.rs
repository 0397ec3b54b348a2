//! Named symbol templates, correlation plans, and the per-template scale space.

use crate::image::{ImageView, RasterImage};
use crate::util::SymMatchResult;

mod plan;
pub mod scale;

pub use plan::TemplatePlan;
pub use scale::{scale_factors, ScaleCandidate, MIN_TEMPLATE_SIZE};

/// A reference symbol: a grayscale raster plus the name it is reported under.
#[derive(Clone, Debug, PartialEq)]
pub struct Template {
    name: String,
    img: RasterImage,
}

impl Template {
    /// Creates a template from a contiguous grayscale buffer.
    pub fn new(
        name: impl Into<String>,
        data: Vec<u8>,
        width: usize,
        height: usize,
    ) -> SymMatchResult<Self> {
        let img = RasterImage::new(data, width, height)?;
        Ok(Self::from_raster(name, img))
    }

    /// Wraps an already decoded raster.
    pub fn from_raster(name: impl Into<String>, img: RasterImage) -> Self {
        Self {
            name: name.into(),
            img,
        }
    }

    /// Returns the full template name, e.g. `"stop.png"`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the symbol identity with any extension or variant suffix removed.
    pub fn base_name(&self) -> &str {
        base_symbol_name(&self.name)
    }

    /// Returns the template raster.
    pub fn raster(&self) -> &RasterImage {
        &self.img
    }

    /// Returns a borrowed view of the template data.
    pub fn view(&self) -> ImageView<'_, u8> {
        self.img.view()
    }
}

/// Strips everything from the first `.` onwards: `"stop.v2.png"` becomes `"stop"`.
pub fn base_symbol_name(name: &str) -> &str {
    name.split('.').next().unwrap_or(name)
}
