//! SymMatch finds reference symbols in an image at unknown scale.
//!
//! Every template is resized over a linear range of scale factors and
//! correlated against the target with normalized cross-correlation. Placements
//! that clear the match threshold become candidates; a greedy IoU suppression
//! pass keeps one detection per region, and the survivors are reported along
//! with the set of matched symbol names.
//!
//! Optional features: `rayon` runs (template, scale) passes in parallel,
//! `simd` vectorizes the correlation loop, `image-io` decodes PNG/JPEG/WebP
//! rasters, and `tracing` emits spans and events.

mod candidate;
pub mod image;
pub mod kernel;
pub mod lowlevel;
pub mod search;
pub mod template;
mod trace;
pub mod util;

#[cfg(feature = "image-io")]
pub use crate::image::io;
pub use crate::image::resize::resize_u8_bilinear;
pub use crate::image::{ImageView, RasterImage};
pub use kernel::ScoreMap;
pub use template::{base_symbol_name, Template};
pub use util::{SymMatchError, SymMatchResult};

pub use candidate::detection::Detection;
pub use candidate::nms::SuppressionMode;
#[cfg(feature = "rayon")]
pub use search::scan::match_template_par;
pub use search::cancel::CancelToken;
pub use search::scan::match_template;
pub use search::{detect_symbols, DetectConfig, DetectionReport, SkippedScale, SymbolDetector};
