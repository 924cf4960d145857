//! Error types for wiregen
//!
//! Provides unified error handling across the crate. Only structural
//! problems are errors; unresolved dependencies are diagnostics
//! (see [`crate::pipeline::Diagnostic`]).

use thiserror::Error;

use crate::config::ConfigError;

/// Main error type for wiregen operations
#[derive(Debug, Error)]
pub enum WiregenError {
    /// The dependency graph contains at least one cycle
    #[error("Dependency cycle detected: {}{}", format_cycles(.cycles), format_blocked(.blocked))]
    CycleDetected {
        /// Dependency path around each cycle, from its earliest declared member
        cycles: Vec<Vec<String>>,
        /// Functions that are not cyclic themselves but depend on a cycle
        blocked: Vec<String>,
    },

    /// Two functions would be emitted under the same output key
    #[error("Output key '{key}' is produced by both {first} and {second}")]
    DuplicateOutputKey {
        key: String,
        first: String,
        second: String,
    },

    /// Too many structures for the selected flag encoding
    #[error(
        "Flag encoding '{encoding}' supports at most {max} structures, found {found}"
    )]
    FlagOverflow {
        encoding: String,
        max: usize,
        found: usize,
    },

    /// A requested structure key does not exist in the plan
    #[error("Unknown structure '{0}'")]
    UnknownStructure(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO error
    #[error("IO error for {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl WiregenError {
    /// Create a cycle error
    pub fn cycle(cycles: Vec<Vec<String>>, blocked: Vec<String>) -> Self {
        WiregenError::CycleDetected { cycles, blocked }
    }

    /// Create an IO error tagged with the offending path
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        WiregenError::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a serialization error
    pub fn serialization<E: std::fmt::Display>(e: E) -> Self {
        WiregenError::Serialization(e.to_string())
    }

    /// All function names involved in a cycle error, cyclic members first
    pub fn cycle_members(&self) -> Vec<&str> {
        match self {
            WiregenError::CycleDetected { cycles, .. } => cycles
                .iter()
                .flat_map(|c| c.iter().map(String::as_str))
                .collect(),
            _ => Vec::new(),
        }
    }
}

fn format_cycles(cycles: &[Vec<String>]) -> String {
    cycles
        .iter()
        .map(|members| {
            if members.len() == 1 {
                format!("{} depends on itself", members[0])
            } else {
                format!("[{} -> {}]", members.join(" -> "), members[0])
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_blocked(blocked: &[String]) -> String {
    if blocked.is_empty() {
        String::new()
    } else {
        format!(" (also blocked: {})", blocked.join(", "))
    }
}

/// Result type alias for wiregen operations
pub type Result<T> = std::result::Result<T, WiregenError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_message_names_functions() {
        let err = WiregenError::cycle(
            vec![vec!["construct_a".to_string(), "construct_b".to_string()]],
            vec!["construct_c".to_string()],
        );
        let msg = err.to_string();
        assert!(msg.contains("[construct_a -> construct_b -> construct_a]"));
        assert!(msg.contains("also blocked: construct_c"));
        assert_eq!(err.cycle_members(), vec!["construct_a", "construct_b"]);
    }

    #[test]
    fn test_self_loop_message() {
        let err = WiregenError::cycle(vec![vec!["construct_x".to_string()]], vec![]);
        assert_eq!(
            err.to_string(),
            "Dependency cycle detected: construct_x depends on itself"
        );
    }
}
