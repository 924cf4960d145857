//! Pipeline result types

use serde::Serialize;

use super::diagnostics::Diagnostic;
use crate::errors::{Result, WiregenError};
use crate::features::planning::{BuildPlan, PlanSlot};
use crate::features::resolution::FunctionTable;
use crate::features::sequencing::TopologicalOrder;
use crate::shared::FunctionRecord;

/// Everything a successful builder generation produced
#[derive(Debug, Clone)]
pub struct GenerationOutput {
    /// Generated JavaScript
    pub artifact: String,
    pub diagnostics: Vec<Diagnostic>,
    pub table: FunctionTable,
    pub order: TopologicalOrder,
    pub plan: BuildPlan,
}

impl GenerationOutput {
    pub fn has_warnings(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// Construction sequence for the requested keys; all keys when empty
    pub fn sequence_for<S: AsRef<str>>(&self, keys: &[S]) -> Result<Vec<&PlanSlot>> {
        let mask = if keys.is_empty() {
            self.plan.all()
        } else {
            self.plan.mask_for(keys)?
        };
        Ok(self.plan.construction_sequence(&mask))
    }

    /// Parameters `slot` reads from the external inputs object
    pub fn external_params(&self, slot: &PlanSlot) -> Vec<&str> {
        self.table
            .get(&slot.function)
            .map(|record| record.external_params().collect())
            .unwrap_or_default()
    }

    /// Serializable summary of the run
    pub fn report(&self) -> InspectionReport<'_> {
        InspectionReport {
            functions: self.table.records(),
            order: self.order.names(),
            flags: self.plan.slots(),
            diagnostics: &self.diagnostics,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct InspectionReport<'a> {
    pub functions: &'a [FunctionRecord],
    pub order: &'a [String],
    pub flags: &'a [PlanSlot],
    pub diagnostics: &'a [Diagnostic],
}

impl InspectionReport<'_> {
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(WiregenError::serialization)
    }
}
