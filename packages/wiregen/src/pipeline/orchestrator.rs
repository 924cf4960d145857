//! Generation pipeline
//!
//! Runs the stages in order:
//!
//! ```text
//! source ─▶ extract ─▶ resolve ─▶ sequence ─▶ plan ─▶ emit ─▶ artifact
//!                          │
//!                          └─▶ diagnostics (unresolved parameters)
//! ```
//!
//! Any structural error stops the run before anything is emitted.

use std::fs;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

use super::diagnostics::Diagnostic;
use super::result::GenerationOutput;
use crate::config::{GeneratorConfig, Validatable};
use crate::errors::{Result, WiregenError};
use crate::features::emission::{BuilderEmitter, GeneratorTableEmitter};
use crate::features::extraction::{SignatureExtractor, SignatureSet};
use crate::features::planning::BuildPlan;
use crate::features::resolution::{DependencyGraph, FunctionTable};
use crate::features::sequencing::TopologicalSequencer;
use crate::shared::{FunctionKind, NamingConvention};

pub struct GenerationPipeline {
    config: GeneratorConfig,
}

impl GenerationPipeline {
    /// Create a pipeline; the configuration is validated up front
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn convention(&self) -> NamingConvention<'_> {
        NamingConvention::new(&self.config.naming, &self.config.emit)
    }

    /// Function kinds wired into the builder
    pub fn targets(&self) -> Vec<FunctionKind> {
        if self.config.emit.include_counters {
            vec![FunctionKind::Construct, FunctionKind::Count]
        } else {
            vec![FunctionKind::Construct]
        }
    }

    /// Extract builder targets from `source`
    pub fn extract(&self, source: &str) -> SignatureSet {
        SignatureExtractor::new(self.convention(), &self.targets()).extract(source)
    }

    /// Generate the selective builder for `source`
    pub fn run(&self, source: &str) -> Result<GenerationOutput> {
        let start = Instant::now();
        let convention = self.convention();

        let signatures = self.extract(source);
        debug!("Extracted {} target functions", signatures.len());

        let table = FunctionTable::build(&signatures, &convention)?;
        let diagnostics: Vec<Diagnostic> = table
            .unresolved()
            .iter()
            .map(Diagnostic::unresolved)
            .collect();

        let graph = DependencyGraph::build(&table);
        debug!(
            "Dependency graph: {} nodes, {} edges",
            graph.node_count(),
            graph.edge_count()
        );

        let order = TopologicalSequencer::new(&graph).sequence()?;
        let plan = BuildPlan::new(&table, &graph, &order);
        let artifact = BuilderEmitter::new(convention, &self.config.derived_counters)
            .emit(&plan, &table)?;

        if !diagnostics.is_empty() {
            warn!("{} unresolved parameter(s)", diagnostics.len());
        }
        info!(
            "Generated builder for {} structures in {:?}",
            plan.len(),
            start.elapsed()
        );

        Ok(GenerationOutput {
            artifact,
            diagnostics,
            table,
            order,
            plan,
        })
    }

    /// Generate the string generator table for `source`
    pub fn generators(&self, source: &str) -> String {
        let convention = self.convention();
        let signatures =
            SignatureExtractor::new(convention, &[FunctionKind::Generate]).extract(source);
        let emitter = GeneratorTableEmitter::new(convention);
        info!(
            "Listed {} of {} generators",
            emitter.listed(&signatures).len(),
            signatures.len()
        );
        emitter.emit(&signatures)
    }
}

/// Read a source file
pub fn read_source(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    fs::read_to_string(path).map_err(|e| WiregenError::io(path.display().to_string(), e))
}

/// Write an artifact; callers only get here after generation succeeded
pub fn write_artifact(path: impl AsRef<Path>, artifact: &str) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, artifact)
        .map_err(|e| WiregenError::io(path.display().to_string(), e))?;
    info!("Wrote {} ({} bytes)", path.display(), artifact.len());
    Ok(())
}
