//! Core records shared by every stage
//!
//! Records are created once per run and never mutated afterwards; later
//! stages only read them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Role of a target function, derived from its name prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FunctionKind {
    /// `construct_X`: builds structure `X`, may be depended upon
    Construct,
    /// `count_X`: computes counter `X` from structures
    Count,
    /// `generate_X`: string generator, listed in the generator table
    Generate,
}

impl FunctionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Construct => "construct",
            Self::Count => "count",
            Self::Generate => "generate",
        }
    }
}

impl std::fmt::Display for FunctionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Reserved base inputs available to every function without a provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputRole {
    /// The raw input text
    Text,
    /// Length of the raw input text
    Length,
}

/// Typed reference from a parameter to the value that feeds it
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "source", content = "name", rename_all = "lowercase")]
pub enum Dependency {
    /// Output of another target function (by function name)
    Structure(String),
    /// One of the reserved base inputs
    Input(InputRole),
    /// No provider exists; the caller supplies the value by parameter name
    External(String),
}

impl Dependency {
    /// Provider function name, if this dependency is a graph edge
    pub fn provider(&self) -> Option<&str> {
        match self {
            Dependency::Structure(name) => Some(name),
            _ => None,
        }
    }
}

/// Parsed `@field value` lines of a documentation block
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Annotations(BTreeMap<String, String>);

impl Annotations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.0.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `@kind hidden` keeps a function out of user-facing listings
    pub fn is_hidden(&self) -> bool {
        self.get("kind") == Some("hidden")
    }

    /// Structure stems listed by `@structures`, split on whitespace and commas
    pub fn structures(&self) -> Vec<String> {
        self.get("structures")
            .map(|list| {
                list.split(|c: char| c.is_whitespace() || c == ',')
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl From<BTreeMap<String, String>> for Annotations {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self(map)
    }
}

/// One recognized declaration as found in the source text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    pub name: String,
    pub kind: FunctionKind,
    /// Name with the kind prefix stripped
    pub stem: String,
    /// Declared parameter names, in order, type annotations removed
    pub params: Vec<String>,
    /// Annotations of the block directly above the declaration
    pub annotations: Annotations,
}

/// Resolved entry of the function table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionRecord {
    pub name: String,
    pub kind: FunctionKind,
    pub stem: String,
    /// Key under which the function's value is published
    pub output_key: String,
    pub params: Vec<String>,
    /// One entry per parameter, same order as `params`
    pub dependencies: Vec<Dependency>,
    pub annotations: Annotations,
}

impl FunctionRecord {
    /// Distinct provider names, in first-mention order
    pub fn providers(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for provider in self.dependencies.iter().filter_map(Dependency::provider) {
            if !seen.contains(&provider) {
                seen.push(provider);
            }
        }
        seen
    }

    /// Parameters that must be supplied by the caller
    pub fn external_params(&self) -> impl Iterator<Item = &str> {
        self.dependencies.iter().filter_map(|d| match d {
            Dependency::External(name) => Some(name.as_str()),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(deps: Vec<Dependency>) -> FunctionRecord {
        FunctionRecord {
            name: "construct_x".to_string(),
            kind: FunctionKind::Construct,
            stem: "x".to_string(),
            output_key: "x".to_string(),
            params: deps.iter().map(|_| "p".to_string()).collect(),
            dependencies: deps,
            annotations: Annotations::new(),
        }
    }

    #[test]
    fn test_providers_are_deduplicated_in_order() {
        let r = record(vec![
            Dependency::Structure("construct_b".to_string()),
            Dependency::Input(InputRole::Text),
            Dependency::Structure("construct_a".to_string()),
            Dependency::Structure("construct_b".to_string()),
        ]);
        assert_eq!(r.providers(), vec!["construct_b", "construct_a"]);
    }

    #[test]
    fn test_external_params() {
        let r = record(vec![
            Dependency::External("y".to_string()),
            Dependency::Input(InputRole::Length),
        ]);
        assert_eq!(r.external_params().collect::<Vec<_>>(), vec!["y"]);
    }

    #[test]
    fn test_annotation_helpers() {
        let mut ann = Annotations::new();
        assert!(!ann.is_hidden());
        assert!(ann.structures().is_empty());

        ann.insert("kind", "hidden");
        ann.insert("structures", "suffix_array, lcp_array  bw_transform");
        assert!(ann.is_hidden());
        assert_eq!(
            ann.structures(),
            vec!["suffix_array", "lcp_array", "bw_transform"]
        );
    }
}
