//! Shared models and naming rules

pub mod models;
pub mod naming;

pub use models::{Annotations, Dependency, FunctionKind, FunctionRecord, InputRole, Signature};
pub use naming::{NamingConvention, Provider, EXTERNAL_KEY};
