//! Error types for symmatch.

use thiserror::Error;

/// Result alias for symmatch operations.
pub type SymMatchResult<T> = std::result::Result<T, SymMatchError>;

/// Errors that can occur while decoding rasters or searching for symbols.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SymMatchError {
    /// The raster has a zero dimension, a mismatched buffer, or could not be decoded.
    #[error("invalid image: {reason}")]
    InvalidImage { reason: String },
    /// The template does not fit inside the target in at least one axis.
    #[error(
        "template {tpl_width}x{tpl_height} does not fit in image {img_width}x{img_height}"
    )]
    TemplateTooLarge {
        tpl_width: usize,
        tpl_height: usize,
        img_width: usize,
        img_height: usize,
    },
    /// A cancellation request was observed before the search completed.
    #[error("detection cancelled")]
    Cancelled,
    /// The detection configuration is out of range.
    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: &'static str },
}

impl SymMatchError {
    pub(crate) fn invalid_image(reason: impl Into<String>) -> Self {
        Self::InvalidImage {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_dimensions(width: usize, height: usize) -> Self {
        Self::invalid_image(format!("dimensions {width}x{height}"))
    }

    pub(crate) fn buffer_mismatch(needed: usize, got: usize) -> Self {
        Self::invalid_image(format!("buffer holds {got} samples, expected {needed}"))
    }
}
