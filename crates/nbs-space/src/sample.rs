use nbs_core::rng::RngHandle;
use nbs_core::{AdjacencyMatrix, Op, INTERMEDIATE_OPS, NUM_INTERMEDIATE_NODES, NUM_NODES};
use rand::seq::{IteratorRandom, SliceRandom};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::assemble::assemble;
use crate::constraints::ConstraintTable;
use crate::enumerate::{enumerate_without_loose_ends, pinned_assignment, FIRST_FREE_NODE};
use crate::parents::parent_sets;

/// A sampled cell together with the operations of its intermediate nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampledCell {
    /// Cell wiring.
    pub matrix: AdjacencyMatrix,
    /// One operation per intermediate node, in node order.
    pub ops: Vec<Op>,
}

/// Draws one cell uniformly from the loose-ends space.
///
/// Returns `None` when the table lacks the input stem or some free node has
/// no admissible parent set.
pub fn sample_with_loose_ends(
    table: &ConstraintTable,
    rng: &mut RngHandle,
) -> Option<AdjacencyMatrix> {
    if !table.has_input_stem() {
        return None;
    }
    let mut assignment = pinned_assignment();
    for node in FIRST_FREE_NODE..NUM_NODES {
        let mut sets = parent_sets(node, table.required(node));
        if sets.len() == 0 {
            return None;
        }
        let pick = rng.gen_range(0..sets.len());
        assignment.insert(sets.nth(pick)?);
    }
    Some(assemble(&assignment))
}

/// Draws one loose-ends cell plus a random operation for each intermediate node.
pub fn sample_architecture(table: &ConstraintTable, rng: &mut RngHandle) -> Option<SampledCell> {
    let matrix = sample_with_loose_ends(table, rng)?;
    let ops = (0..NUM_INTERMEDIATE_NODES)
        .map(|_| INTERMEDIATE_OPS.choose(rng).copied())
        .collect::<Option<Vec<_>>>()?;
    Some(SampledCell { matrix, ops })
}

/// Draws one cell uniformly from the complete (no loose ends) space.
///
/// Walks the whole enumeration once with reservoir sampling; `None` when the
/// space is empty.
pub fn sample_without_loose_ends(
    table: &ConstraintTable,
    rng: &mut RngHandle,
) -> Option<AdjacencyMatrix> {
    enumerate_without_loose_ends(table).choose(rng)
}
