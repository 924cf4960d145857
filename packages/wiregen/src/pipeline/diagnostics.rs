//! Non-fatal findings of a generation run
//!
//! Diagnostics never end up in the artifact; they are returned alongside it
//! and logged as warnings.

use serde::Serialize;
use std::fmt;

use crate::features::resolution::UnresolvedDependency;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A parameter has no provider function and is supplied externally
    UnresolvedDependency,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// Function the finding is about
    pub function: String,
    pub message: String,
}

impl Diagnostic {
    pub fn unresolved(missing: &UnresolvedDependency) -> Self {
        Self {
            kind: DiagnosticKind::UnresolvedDependency,
            function: missing.function.clone(),
            message: format!(
                "argument '{}' has no provider function ({}); it is read from the external inputs",
                missing.parameter, missing.expected_provider
            ),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "warning: {}: {}", self.function, self.message)
    }
}
