//! Planning stage
//!
//! Assigns structure bits and evaluates the needed-set closure the
//! generated builder performs at call time.

mod mask;
mod plan;

pub use mask::StructureMask;
pub use plan::{BuildPlan, PlanSlot};
