//! Function table
//!
//! Single resolution pass over the extracted signatures. Every parameter
//! becomes a typed [`Dependency`]; parameters whose provider is missing are
//! collected as [`UnresolvedDependency`] and treated as external inputs.

use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::errors::{Result, WiregenError};
use crate::features::extraction::SignatureSet;
use crate::shared::{Dependency, FunctionRecord, NamingConvention, Provider};

/// A parameter with no provider function in the source unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnresolvedDependency {
    /// Function declaring the parameter
    pub function: String,
    pub parameter: String,
    /// Provider the naming convention expected to find
    pub expected_provider: String,
}

/// Immutable table of resolved function records, declaration order
#[derive(Debug, Clone, Default, Serialize)]
pub struct FunctionTable {
    records: Vec<FunctionRecord>,
    #[serde(skip)]
    index: HashMap<String, usize>,
    #[serde(skip)]
    unresolved: Vec<UnresolvedDependency>,
}

impl FunctionTable {
    /// Resolve every signature against the naming convention.
    ///
    /// Fails only when two functions (or a function and a builder input)
    /// would publish the same output key.
    pub fn build(signatures: &SignatureSet, convention: &NamingConvention<'_>) -> Result<Self> {
        let mut owners: HashMap<String, String> = convention
            .reserved_keys()
            .iter()
            .map(|key| (key.to_string(), format!("builder input '{}'", key)))
            .collect();

        let mut records = Vec::with_capacity(signatures.len());
        let mut index = HashMap::with_capacity(signatures.len());
        let mut unresolved = Vec::new();

        for signature in signatures.iter() {
            let output_key = convention.output_key(signature.kind, &signature.stem);
            if let Some(first) = owners.get(&output_key) {
                return Err(WiregenError::DuplicateOutputKey {
                    key: output_key,
                    first: first.clone(),
                    second: signature.name.clone(),
                });
            }
            owners.insert(output_key.clone(), signature.name.clone());

            let dependencies = signature
                .params
                .iter()
                .map(|param| match convention.provider_for(param) {
                    Provider::Input(role) => Dependency::Input(role),
                    Provider::Function(provider) if signatures.contains(&provider) => {
                        Dependency::Structure(provider)
                    }
                    Provider::Function(provider) => {
                        let missing = UnresolvedDependency {
                            function: signature.name.clone(),
                            parameter: param.clone(),
                            expected_provider: provider,
                        };
                        if !unresolved.contains(&missing) {
                            warn!(
                                "Parameter '{}' of {} has no provider function ({} not found)",
                                missing.parameter, missing.function, missing.expected_provider
                            );
                            unresolved.push(missing);
                        }
                        Dependency::External(param.clone())
                    }
                })
                .collect();

            index.insert(signature.name.clone(), records.len());
            records.push(FunctionRecord {
                name: signature.name.clone(),
                kind: signature.kind,
                stem: signature.stem.clone(),
                output_key,
                params: signature.params.clone(),
                dependencies,
                annotations: signature.annotations.clone(),
            });
        }

        debug!(
            "Resolved {} functions ({} unresolved parameters)",
            records.len(),
            unresolved.len()
        );

        Ok(Self {
            records,
            index,
            unresolved,
        })
    }

    pub fn get(&self, name: &str) -> Option<&FunctionRecord> {
        self.index.get(name).map(|&i| &self.records[i])
    }

    /// Declaration position of a function
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn records(&self) -> &[FunctionRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &FunctionRecord> {
        self.records.iter()
    }

    pub fn unresolved(&self) -> &[UnresolvedDependency] {
        &self.unresolved
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
