use std::collections::BTreeMap;

use nbs_core::errors::{ErrorInfo, NbsError};
use nbs_core::{INPUT_NODE, MAX_EDGES, NUM_NODES};
use serde::{Deserialize, Serialize};

/// Required number of parents (fan-in) for every node of the cell.
///
/// Immutable once built. The only construction-time invariant is the edge
/// budget: the fan-in counts must sum to at most [`MAX_EDGES`]. Tables that
/// respect the budget but ask for more parents than a node has predecessors
/// are accepted; they simply admit no topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub struct ConstraintTable {
    fan_in: [usize; NUM_NODES],
}

impl ConstraintTable {
    /// Validates and wraps a fan-in array indexed by node.
    pub fn new(fan_in: [usize; NUM_NODES]) -> Result<Self, NbsError> {
        let total: usize = fan_in.iter().sum();
        if total > MAX_EDGES {
            return Err(NbsError::Configuration(
                ErrorInfo::new(
                    "edge-budget-exceeded",
                    "fan-in counts exceed the oracle's edge budget for one cell",
                )
                .with_context("total", total)
                .with_context("max", MAX_EDGES)
                .with_hint("lower the fan-in of one or more nodes"),
            ));
        }
        Ok(Self { fan_in })
    }

    /// Builds a table from a slice holding one fan-in count per node.
    pub fn from_slice(fan_in: &[usize]) -> Result<Self, NbsError> {
        let array: [usize; NUM_NODES] = fan_in.try_into().map_err(|_| {
            NbsError::Configuration(
                ErrorInfo::new("table-size-mismatch", "one fan-in count per node is required")
                    .with_context("len", fan_in.len())
                    .with_context("expected", NUM_NODES),
            )
        })?;
        Self::new(array)
    }

    /// Builds a table from a `node -> fan-in` mapping covering every node exactly once.
    pub fn from_map(map: &BTreeMap<usize, usize>) -> Result<Self, NbsError> {
        let mut fan_in = [0usize; NUM_NODES];
        for (&node, &count) in map {
            let slot = fan_in.get_mut(node).ok_or_else(|| {
                NbsError::Configuration(
                    ErrorInfo::new("unknown-node", "fan-in given for a node outside the cell")
                        .with_context("node", node)
                        .with_context("nodes", NUM_NODES),
                )
            })?;
            *slot = count;
        }
        if let Some(missing) = (0..NUM_NODES).find(|node| !map.contains_key(node)) {
            return Err(NbsError::Configuration(
                ErrorInfo::new("missing-node", "fan-in missing for a cell node")
                    .with_context("node", missing),
            ));
        }
        Self::new(fan_in)
    }

    /// Fan-in of `node`, or `None` when the index lies outside the cell.
    pub fn fan_in(&self, node: usize) -> Option<usize> {
        self.fan_in.get(node).copied()
    }

    /// Iterates `(node, fan_in)` pairs in node order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.fan_in.iter().copied().enumerate()
    }

    /// Sum of all fan-in counts, i.e. the edge count of every admissible cell.
    pub fn total_edges(&self) -> usize {
        self.fan_in.iter().sum()
    }

    /// Underlying fan-in array.
    pub fn as_array(&self) -> &[usize; NUM_NODES] {
        &self.fan_in
    }

    /// Whether the input takes no parent and node 1 exactly one.
    ///
    /// Node 1 always reads the input, so a table without this stem
    /// describes an empty space in both enumeration modes.
    pub fn has_input_stem(&self) -> bool {
        self.fan_in[INPUT_NODE] == 0 && self.fan_in[INPUT_NODE + 1] == 1
    }

    pub(crate) fn required(&self, node: usize) -> usize {
        self.fan_in(node).unwrap_or(0)
    }
}

impl Default for ConstraintTable {
    /// The standard table `{0: 0, 1: 1, 2: 1, 3: 2, 4: 2, 5: 3}`.
    fn default() -> Self {
        Self {
            fan_in: [0, 1, 1, 2, 2, 3],
        }
    }
}

impl TryFrom<Vec<usize>> for ConstraintTable {
    type Error = NbsError;

    fn try_from(value: Vec<usize>) -> Result<Self, Self::Error> {
        Self::from_slice(&value)
    }
}

impl From<ConstraintTable> for Vec<usize> {
    fn from(table: ConstraintTable) -> Self {
        table.fan_in.to_vec()
    }
}
