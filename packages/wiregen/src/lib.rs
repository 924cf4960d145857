/*
 * wiregen - dependency-aware builder generator
 *
 * Feature-first layout:
 * - shared/      : Records and the naming convention
 * - features/    : Stages (extraction → resolution → sequencing → planning → emission)
 * - pipeline/    : Orchestration, diagnostics, results
 * - config/      : Versioned YAML configuration
 *
 * Input is a source unit of `construct_`/`count_`/`generate_` functions;
 * output is JavaScript that builds only the requested structures, in
 * dependency order.
 */

#![allow(clippy::new_without_default)] // Default impl not always needed

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports
// ═══════════════════════════════════════════════════════════════════════════

/// Shared models and naming rules
pub mod shared;

/// Generation stages
pub mod features;

/// Pipeline orchestration
pub mod pipeline;

/// Configuration system
pub mod config;

/// Error types
pub mod errors;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports for Public API
// ═══════════════════════════════════════════════════════════════════════════

pub use config::{FlagEncoding, GeneratorConfig};
pub use errors::{Result, WiregenError};
pub use features::planning::{BuildPlan, StructureMask};
pub use pipeline::{Diagnostic, GenerationOutput, GenerationPipeline};
