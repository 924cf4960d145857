//! Emission stage
//!
//! Renders generated JavaScript. Emission is a pure function of its inputs;
//! two runs over the same plan produce identical text.

mod builder;
mod generators;
mod writer;

pub use builder::{counter_structures, BuilderEmitter, DerivedCounterBinding, HEADER};
pub use generators::GeneratorTableEmitter;
pub use writer::{js_string, CodeWriter};
