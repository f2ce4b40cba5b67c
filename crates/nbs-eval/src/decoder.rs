use std::collections::{BTreeMap, BTreeSet};

use nbs_core::errors::{ErrorInfo, NbsError};
use nbs_core::{Op, INPUT_NODE, NUM_INTERMEDIATE_NODES, NUM_NODES};
use nbs_space::{assemble, ConstraintTable, ParentAssignment, ParentSet};
use serde::{Deserialize, Serialize};

use crate::oracle::{ConfigDecoder, DecodedCell};

/// Typed cell configuration: chosen parents per node plus intermediate ops.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CellConfig {
    /// Parents of every non-input node. The input may be omitted or given no parents.
    pub parents: BTreeMap<usize, Vec<usize>>,
    /// One operation per intermediate node, in node order.
    pub ops: Vec<Op>,
}

/// Decodes [`CellConfig`] values against a constraint table.
///
/// Loose ends are allowed; only fan-in, ordering and op rules are checked.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParentChoiceDecoder {
    table: ConstraintTable,
}

impl ParentChoiceDecoder {
    /// Creates a decoder enforcing `table`.
    pub fn new(table: ConstraintTable) -> Self {
        Self { table }
    }

    fn parent_set(&self, node: usize, parents: &[usize]) -> Result<ParentSet, NbsError> {
        let distinct: BTreeSet<usize> = parents.iter().copied().collect();
        if distinct.len() != parents.len() {
            return Err(NbsError::Decoding(
                ErrorInfo::new("duplicate-parent", "a parent is listed more than once")
                    .with_context("node", node),
            ));
        }
        let required = self.table.fan_in(node).unwrap_or(0);
        if parents.len() != required {
            return Err(NbsError::Decoding(
                ErrorInfo::new("fan-in-mismatch", "node has the wrong number of parents")
                    .with_context("node", node)
                    .with_context("required", required)
                    .with_context("actual", parents.len()),
            ));
        }
        ParentSet::new(node, parents).map_err(|err| NbsError::Decoding(err.info().clone()))
    }
}

impl ConfigDecoder for ParentChoiceDecoder {
    type Config = CellConfig;

    fn decode(&self, config: &CellConfig) -> Result<DecodedCell, NbsError> {
        if let Some(&node) = config.parents.keys().find(|&&node| node >= NUM_NODES) {
            return Err(NbsError::Decoding(
                ErrorInfo::new("unknown-node", "parents given for a node outside the cell")
                    .with_context("node", node),
            ));
        }
        let mut assignment = ParentAssignment::new();
        for node in 0..NUM_NODES {
            let parents: &[usize] = match config.parents.get(&node) {
                Some(parents) => parents.as_slice(),
                None if node == INPUT_NODE => &[],
                None => {
                    return Err(NbsError::Decoding(
                        ErrorInfo::new("missing-parents", "no parents chosen for node")
                            .with_context("node", node),
                    ))
                }
            };
            assignment.insert(self.parent_set(node, parents)?);
        }

        if config.ops.len() != NUM_INTERMEDIATE_NODES {
            return Err(NbsError::Decoding(
                ErrorInfo::new("op-count-mismatch", "one op per intermediate node is required")
                    .with_context("ops", config.ops.len())
                    .with_context("expected", NUM_INTERMEDIATE_NODES),
            ));
        }
        if let Some(position) = config.ops.iter().position(|op| !op.is_intermediate()) {
            return Err(NbsError::Decoding(
                ErrorInfo::new("invalid-op", "op cannot be used on an intermediate node")
                    .with_context("node", position + 1)
                    .with_context("op", config.ops[position]),
            ));
        }

        Ok(DecodedCell {
            matrix: assemble(&assignment),
            ops: config.ops.clone(),
        })
    }
}
