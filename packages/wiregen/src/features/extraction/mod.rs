//! Extraction stage
//!
//! Source text → ordered signatures of target functions. Declarations the
//! scanner cannot interpret are left out without an error.

mod annotation;
mod signature;

pub use annotation::parse_annotations;
pub use signature::{parameter_names, split_parameter_list, SignatureExtractor, SignatureSet};
