//! Candidate detections and their pruning.
//!
//! Includes candidate collection, IoU-based overlap suppression, and final
//! assembly into the reported symbol set.

pub(crate) mod assemble;
pub(crate) mod collect;
pub(crate) mod detection;
pub(crate) mod nms;
