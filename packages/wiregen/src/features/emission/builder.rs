//! Selective builder emitter
//!
//! Renders a [`BuildPlan`] as a self-contained JavaScript unit:
//!
//! ```text
//! // header
//! const structure_flags = { key: bit, ... };
//! const structure_dependencies = [[dep bits], ...];
//! const counter_structures = { stem: [...], ... };   // counters only
//! function build_ds(ds_text, flags = ALL, ds_external = {}) { ... }
//! ```
//!
//! The builder closes the requested flags over `structure_dependencies`
//! with a worklist, then constructs the needed slots in order.
//!
//! With the default `bigint` encoding every flag is a BigInt: callers must
//! combine flags starting from `0n`, since mixing in a plain `0` throws.
//! The generated builder carries the same hint as a comment.

use tracing::debug;

use super::writer::{js_string, CodeWriter};
use crate::config::{DerivedCounter, FlagEncoding};
use crate::errors::{Result, WiregenError};
use crate::features::planning::BuildPlan;
use crate::features::resolution::FunctionTable;
use crate::shared::{Dependency, FunctionKind, FunctionRecord, InputRole, NamingConvention};

pub const HEADER: &str = "// Generated by wiregen. Do not edit.";

/// A counter computed from an existing structure by a transform function
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedCounterBinding {
    pub key: String,
    /// Local holding the base structure
    pub source: String,
    pub transform: String,
}

pub struct BuilderEmitter<'a> {
    convention: NamingConvention<'a>,
    derived_counters: &'a [DerivedCounter],
}

impl<'a> BuilderEmitter<'a> {
    pub fn new(convention: NamingConvention<'a>, derived_counters: &'a [DerivedCounter]) -> Self {
        Self {
            convention,
            derived_counters,
        }
    }

    fn encoding(&self) -> FlagEncoding {
        self.convention.emit().flag_encoding
    }

    /// Render the builder artifact for `plan`.
    ///
    /// Fails when the plan has more slots than the flag encoding can hold.
    pub fn emit(&self, plan: &BuildPlan, table: &FunctionTable) -> Result<String> {
        let encoding = self.encoding();
        if let Some(max) = encoding.capacity() {
            if plan.len() > max {
                return Err(WiregenError::FlagOverflow {
                    encoding: encoding.to_string(),
                    max,
                    found: plan.len(),
                });
            }
        }

        let emit = self.convention.emit();
        let mut w = CodeWriter::new();
        w.line(HEADER);
        w.blank();

        w.block(
            &format!("const {} = {{", emit.flags_name),
            plan.slots()
                .iter()
                .map(|slot| format!("{}: {},", slot.key, self.flag_literal(slot.bit))),
            "};",
            "",
        );
        w.blank();

        w.block(
            &format!("const {} = [", emit.dependencies_name),
            plan.slots().iter().map(|slot| {
                let deps: Vec<String> = slot.dependencies.iter().map(usize::to_string).collect();
                format!("[{}],", deps.join(", "))
            }),
            "];",
            "",
        );
        w.blank();

        if emit.include_counters {
            w.block(
                &format!("const {} = {{", emit.counter_structures_name),
                counter_structures(table)
                    .into_iter()
                    .map(|(stem, structures)| {
                        let list: Vec<String> = structures.iter().map(|s| js_string(s)).collect();
                        format!("{}: [{}],", stem, list.join(", "))
                    }),
                "};",
                "",
            );
            w.blank();
        }

        self.write_builder(&mut w, plan, table);

        debug!(
            "Emitted builder with {} structures ({} flags)",
            plan.len(),
            encoding
        );
        Ok(w.finish())
    }

    fn write_builder(&self, w: &mut CodeWriter, plan: &BuildPlan, table: &FunctionTable) {
        let emit = self.convention.emit();
        let text = self.convention.input_variable(InputRole::Text);
        let length = self.convention.input_variable(InputRole::Length);
        let external = self.convention.external_variable();

        w.line(&self.flags_hint());
        w.open(&format!(
            "function {}({}, flags = {}, {} = {{}}) {{",
            emit.builder_name,
            text,
            self.all_flags_literal(plan.len()),
            external
        ));
        w.line(&format!("const {} = {}.length;", length, text));

        // Closure over the dependency relation
        w.line(&format!(
            "const needed = {}.map((_, i) => {});",
            emit.dependencies_name,
            self.bit_test("i")
        ));
        w.line("const pending = [];");
        w.open("for (let i = 0; i < needed.length; i++) {");
        w.line("if (needed[i]) pending.push(i);");
        w.close("}");
        w.open("while (pending.length > 0) {");
        w.line("const i = pending.pop();");
        w.open(&format!("for (const d of {}[i]) {{", emit.dependencies_name));
        w.open("if (!needed[d]) {");
        w.line("needed[d] = true;");
        w.line("pending.push(d);");
        w.close("}");
        w.close("}");
        w.close("}");

        let records = plan.records(table);
        for (slot, record) in plan.slots().iter().zip(&records) {
            let var = self.convention.variable(&slot.key);
            w.line(&format!("let {};", var));
            w.line(&format!(
                "if (needed[{}]) {} = {}({});",
                slot.bit,
                var,
                record.name,
                self.arguments(record, table).join(", ")
            ));
        }

        let derived = self.derived_counters(plan, &records);
        w.block(
            "return {",
            plan.slots()
                .iter()
                .map(|slot| format!("{}: {},", slot.key, self.convention.variable(&slot.key)))
                .chain(derived.iter().map(|d| {
                    format!(
                        "{}: {} === undefined ? undefined : {}({}),",
                        d.key, d.source, d.transform, d.source
                    )
                })),
            "};",
            "",
        );
        w.close("}");
    }

    /// Call arguments of a record, one per declared parameter
    fn arguments(&self, record: &FunctionRecord, table: &FunctionTable) -> Vec<String> {
        record
            .dependencies
            .iter()
            .map(|dep| match dep {
                Dependency::Structure(provider) => {
                    let key = table
                        .get(provider)
                        .map(|r| r.output_key.as_str())
                        .unwrap_or(provider.as_str());
                    self.convention.variable(key)
                }
                Dependency::Input(role) => self.convention.input_variable(*role),
                Dependency::External(param) => {
                    format!("{}.{}", self.convention.external_variable(), param)
                }
            })
            .collect()
    }

    /// Derived counters of constructed structures, in plan order.
    ///
    /// A derived key already published by a `count_` function is left to
    /// that function.
    pub fn derived_counters(
        &self,
        plan: &BuildPlan,
        records: &[&FunctionRecord],
    ) -> Vec<DerivedCounterBinding> {
        let mut bindings = Vec::new();
        for record in records {
            if record.kind != FunctionKind::Construct {
                continue;
            }
            let Some(rule) = self.derived_rule(&record.stem) else {
                continue;
            };
            let key = self.convention.counter_key(&record.stem);
            if plan.flag(&key).is_some() {
                debug!("{} comes from a counter function; no derived counter", key);
                continue;
            }
            bindings.push(DerivedCounterBinding {
                key,
                source: self.convention.variable(&record.output_key),
                transform: rule.transform.clone(),
            });
        }
        bindings
    }

    fn derived_rule(&self, stem: &str) -> Option<&DerivedCounter> {
        self.derived_counters.iter().find(|c| c.applies_to(stem))
    }

    /// Comment telling callers how to combine flags
    fn flags_hint(&self) -> String {
        let zero = match self.encoding() {
            FlagEncoding::BigInt => "0n",
            FlagEncoding::Int32 => "0",
        };
        format!(
            "// flags: OR of {} values, starting from {}",
            self.convention.emit().flags_name,
            zero
        )
    }

    fn flag_literal(&self, bit: usize) -> String {
        match self.encoding() {
            FlagEncoding::BigInt => format!("1n << {}n", bit),
            FlagEncoding::Int32 => format!("1 << {}", bit),
        }
    }

    fn all_flags_literal(&self, len: usize) -> String {
        match self.encoding() {
            FlagEncoding::BigInt => format!("(1n << {}n) - 1n", len),
            // len <= 31 here, so the mask is a positive int32
            FlagEncoding::Int32 => ((1u64 << len) - 1).to_string(),
        }
    }

    fn bit_test(&self, index: &str) -> String {
        match self.encoding() {
            FlagEncoding::BigInt => format!("((flags >> BigInt({})) & 1n) === 1n", index),
            FlagEncoding::Int32 => format!("((flags >>> {}) & 1) === 1", index),
        }
    }
}

/// `@structures` lists of user-facing counter functions, declaration order
pub fn counter_structures(table: &FunctionTable) -> Vec<(&str, Vec<String>)> {
    table
        .iter()
        .filter(|r| r.kind == FunctionKind::Count && !r.annotations.is_hidden())
        .map(|r| (r.stem.as_str(), r.annotations.structures()))
        .filter(|(_, structures)| !structures.is_empty())
        .collect()
}
