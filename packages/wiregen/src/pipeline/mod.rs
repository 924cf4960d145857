//! Pipeline orchestration

pub mod diagnostics;
pub mod orchestrator;
pub mod result;

pub use diagnostics::{Diagnostic, DiagnosticKind};
pub use orchestrator::{read_source, write_artifact, GenerationPipeline};
pub use result::{GenerationOutput, InspectionReport};
