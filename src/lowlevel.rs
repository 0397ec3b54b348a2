//! Low-level building blocks for custom detection pipelines.
//!
//! These expose the individual stages behind [`SymbolDetector`]: scale-space
//! generation, kernels, candidate collection, suppression, and assembly.
//! Most users should prefer [`detect_symbols`] or [`SymbolDetector`].
//!
//! [`SymbolDetector`]: crate::SymbolDetector
//! [`detect_symbols`]: crate::detect_symbols

pub use crate::candidate::assemble::assemble;
pub use crate::candidate::collect::collect_candidates;
pub use crate::candidate::nms::{suppress, suppress_with_mode};
pub use crate::kernel::scalar::NccScalar;
#[cfg(feature = "simd")]
pub use crate::kernel::simd::NccSimd;
pub use crate::kernel::{Kernel, SearchImage};
pub use crate::template::{scale_factors, ScaleCandidate, TemplatePlan, MIN_TEMPLATE_SIZE};
