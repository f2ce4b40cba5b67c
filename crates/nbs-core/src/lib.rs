#![deny(missing_docs)]
#![doc = "Core data types for the NBS cell search space: node layout, operation labels, adjacency matrices, errors and seeding."]

pub mod errors;
mod matrix;
mod ops;
pub mod rng;

pub use errors::{ErrorInfo, NbsError};
pub use matrix::{AdjacencyMatrix, MAX_DIM};
pub use ops::{Op, FIXED_BRIDGE_OP, INTERMEDIATE_OPS};
pub use rng::{derive_substream_seed, RngHandle};

/// Number of intermediate operation slots in a cell.
pub const NUM_INTERMEDIATE_NODES: usize = 4;

/// Number of nodes in a cell: input, intermediate slots, output.
pub const NUM_NODES: usize = NUM_INTERMEDIATE_NODES + 2;

/// Index of the input node.
pub const INPUT_NODE: usize = 0;

/// Index of the output node.
pub const OUTPUT_NODE: usize = NUM_NODES - 1;

/// Maximum number of edges the oracle accepts for a single cell.
pub const MAX_EDGES: usize = 9;

/// Node count of the oracle's fixed matrix format.
pub const ORACLE_NUM_NODES: usize = 7;

/// Returns the intermediate node indices `1..=NUM_INTERMEDIATE_NODES`.
pub fn intermediate_nodes() -> std::ops::RangeInclusive<usize> {
    1..=NUM_INTERMEDIATE_NODES
}
