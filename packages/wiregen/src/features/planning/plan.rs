//! Build plan
//!
//! Rust-side model of the emitted builder: one slot per ordered function,
//! with its structure bit and the bits it depends on. The emitter renders
//! exactly this data, so evaluating the plan answers what the generated
//! routine will construct for a given flags value.

use serde::Serialize;
use std::collections::HashMap;

use super::mask::StructureMask;
use crate::errors::{Result, WiregenError};
use crate::features::resolution::{DependencyGraph, FunctionTable};
use crate::features::sequencing::TopologicalOrder;
use crate::shared::FunctionRecord;

/// One constructible entry of the plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanSlot {
    /// Structure bit (= position in the topological order)
    pub bit: usize,
    pub function: String,
    pub key: String,
    /// Bits of the slots this one consumes, ascending
    pub dependencies: Vec<usize>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BuildPlan {
    slots: Vec<PlanSlot>,
    #[serde(skip)]
    by_key: HashMap<String, usize>,
}

impl BuildPlan {
    /// Lay out slots in topological order.
    ///
    /// Every dependency bit is lower than the dependent's bit.
    pub fn new(table: &FunctionTable, graph: &DependencyGraph, order: &TopologicalOrder) -> Self {
        let mut bit_of_node = vec![0; graph.node_count()];
        for (bit, &node) in order.nodes().iter().enumerate() {
            bit_of_node[node] = bit;
        }

        let slots: Vec<PlanSlot> = order
            .nodes()
            .iter()
            .enumerate()
            .map(|(bit, &node)| {
                let record = &table.records()[node];
                let mut dependencies: Vec<usize> = graph
                    .dependencies_of(node)
                    .iter()
                    .map(|&dep| bit_of_node[dep])
                    .collect();
                dependencies.sort_unstable();
                PlanSlot {
                    bit,
                    function: record.name.clone(),
                    key: record.output_key.clone(),
                    dependencies,
                }
            })
            .collect();

        let by_key = slots
            .iter()
            .map(|slot| (slot.key.clone(), slot.bit))
            .collect();

        Self { slots, by_key }
    }

    pub fn slots(&self) -> &[PlanSlot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Structure bit of an output key
    pub fn flag(&self, key: &str) -> Option<usize> {
        self.by_key.get(key).copied()
    }

    /// Mask requesting exactly the given keys
    pub fn mask_for<S: AsRef<str>>(&self, keys: &[S]) -> Result<StructureMask> {
        let mut mask = StructureMask::empty();
        for key in keys {
            let key = key.as_ref();
            let bit = self
                .flag(key)
                .ok_or_else(|| WiregenError::UnknownStructure(key.to_string()))?;
            mask.insert(bit);
        }
        Ok(mask)
    }

    /// The builder's default flags: every structure requested
    pub fn all(&self) -> StructureMask {
        StructureMask::all(self.slots.len())
    }

    /// Close a request over the dependency relation (worklist).
    ///
    /// Each slot enters the worklist at most once; bits beyond the plan are
    /// ignored.
    pub fn resolve_needed(&self, requested: &StructureMask) -> StructureMask {
        let mut needed = vec![false; self.slots.len()];
        let mut stack: Vec<usize> = Vec::new();

        for bit in requested.iter().take_while(|&bit| bit < self.slots.len()) {
            needed[bit] = true;
            stack.push(bit);
        }

        while let Some(bit) = stack.pop() {
            for &dep in &self.slots[bit].dependencies {
                if !needed[dep] {
                    needed[dep] = true;
                    stack.push(dep);
                }
            }
        }

        StructureMask::from_indices(
            needed
                .iter()
                .enumerate()
                .filter(|(_, &n)| n)
                .map(|(bit, _)| bit),
        )
    }

    /// Close a request by repeated full passes until nothing changes.
    ///
    /// Reference formulation of [`Self::resolve_needed`]; also returns the
    /// number of passes, which never exceeds `len() + 1`.
    pub fn resolve_needed_by_passes(&self, requested: &StructureMask) -> (StructureMask, usize) {
        let mut needed = requested.truncated(self.slots.len());
        let mut passes = 0;

        loop {
            passes += 1;
            let mut changed = false;
            for slot in &self.slots {
                if !needed.contains(slot.bit) {
                    continue;
                }
                for &dep in &slot.dependencies {
                    if !needed.contains(dep) {
                        needed.insert(dep);
                        changed = true;
                    }
                }
            }
            if !changed {
                break;
            }
        }

        (needed, passes)
    }

    /// Slots the builder constructs for `requested`, in construction order
    pub fn construction_sequence(&self, requested: &StructureMask) -> Vec<&PlanSlot> {
        let needed = self.resolve_needed(requested);
        self.slots
            .iter()
            .filter(|slot| needed.contains(slot.bit))
            .collect()
    }

    /// Records of the plan's slots in order
    pub fn records<'t>(&self, table: &'t FunctionTable) -> Vec<&'t FunctionRecord> {
        self.slots
            .iter()
            .filter_map(|slot| table.get(&slot.function))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;
    use crate::features::extraction::SignatureExtractor;
    use crate::features::sequencing::TopologicalSequencer;
    use crate::shared::{FunctionKind, NamingConvention};

    fn plan(source: &str) -> BuildPlan {
        let config = GeneratorConfig::default();
        let conv = NamingConvention::new(&config.naming, &config.emit);
        let set = SignatureExtractor::new(conv, &[FunctionKind::Construct, FunctionKind::Count])
            .extract(source);
        let table = FunctionTable::build(&set, &conv).unwrap();
        let graph = DependencyGraph::build(&table);
        let order = TopologicalSequencer::new(&graph).sequence().unwrap();
        BuildPlan::new(&table, &graph, &order)
    }

    fn keys(slots: Vec<&PlanSlot>) -> Vec<&str> {
        slots.into_iter().map(|s| s.key.as_str()).collect()
    }

    #[test]
    fn test_slots_follow_order() {
        let p = plan(
            "function construct_b(a) {}\nfunction construct_a(text) {}\nfunction count_b(b) {}",
        );
        let layout: Vec<&str> = p.slots().iter().map(|s| s.key.as_str()).collect();
        assert_eq!(layout, vec!["a", "b", "counter_b"]);
        assert!(p.slots().iter().enumerate().all(|(i, s)| s.bit == i));
        assert_eq!(p.slots()[1].dependencies, vec![0]);
        assert_eq!(p.slots()[2].dependencies, vec![1]);
    }

    #[test]
    fn test_skips_unrequested_sibling() {
        let p = plan(
            "function construct_a() {}\nfunction construct_b(a) {}\nfunction construct_c(a) {}",
        );
        let seq = p.construction_sequence(&StructureMask::from_bits(0b100));
        assert_eq!(keys(seq), vec!["a", "c"]);
    }

    #[test]
    fn test_chain_pulls_everything() {
        let p = plan(
            "function construct_a() {}\nfunction construct_b(a) {}\nfunction construct_c(b) {}",
        );
        let mask = p.mask_for(&["c"]).unwrap();
        assert_eq!(p.resolve_needed(&mask), p.all());
    }

    #[test]
    fn test_passes_match_worklist() {
        let p = plan(
            "function construct_a() {}\nfunction construct_b(a) {}\nfunction construct_c(b) {}",
        );
        let mask = p.mask_for(&["c"]).unwrap();
        let (needed, passes) = p.resolve_needed_by_passes(&mask);
        assert_eq!(needed, p.resolve_needed(&mask));
        assert!(passes <= p.len() + 1);
    }

    #[test]
    fn test_unknown_key() {
        let p = plan("function construct_a() {}");
        assert!(matches!(
            p.mask_for(&["missing"]),
            Err(WiregenError::UnknownStructure(key)) if key == "missing"
        ));
        assert_eq!(p.flag("a"), Some(0));
    }

    #[test]
    fn test_out_of_range_bits_are_ignored() {
        let p = plan("function construct_a() {}");
        let requested = StructureMask::from_bits(0b11);
        assert_eq!(p.resolve_needed(&requested), StructureMask::from_bits(0b1));
        assert_eq!(
            p.resolve_needed_by_passes(&requested).0,
            StructureMask::from_bits(0b1)
        );
    }

    #[test]
    fn test_empty_request_builds_nothing() {
        let p = plan("function construct_a() {}\nfunction construct_b(a) {}");
        assert!(p.construction_sequence(&StructureMask::empty()).is_empty());
    }
}
