//! Loose-end and reachability checks for assembled cells.

use nbs_core::errors::{ErrorInfo, NbsError};
use nbs_core::{intermediate_nodes, AdjacencyMatrix, INPUT_NODE, NUM_NODES, OUTPUT_NODE};

use crate::constraints::ConstraintTable;

/// Bitmask of nodes reachable from the input (the input included).
pub fn reachable_from_input(matrix: &AdjacencyMatrix) -> u8 {
    let mut reached = 1u8 << INPUT_NODE;
    for node in 0..matrix.dim() {
        if reached & (1 << node) != 0 {
            for child in matrix.children(node) {
                reached |= 1 << child;
            }
        }
    }
    reached
}

/// Bitmask of nodes with a path to the last node of the matrix (that node included).
pub fn reaches_output(matrix: &AdjacencyMatrix) -> u8 {
    let Some(sink) = matrix.dim().checked_sub(1) else {
        return 0;
    };
    let mut reaching = 1u8 << sink;
    for node in (0..sink).rev() {
        if matrix.children(node).any(|child| reaching & (1 << child) != 0) {
            reaching |= 1 << node;
        }
    }
    reaching
}

/// Intermediate nodes whose output is never consumed.
pub fn loose_ends(matrix: &AdjacencyMatrix) -> Vec<usize> {
    intermediate_nodes()
        .filter(|&node| matrix.out_degree(node) == 0)
        .collect()
}

/// Checks that `matrix` is a complete cell under `table`.
///
/// A complete cell has exactly the required fan-in at every node, no loose
/// end, and every intermediate node on some input to output path.
pub fn check_admissible(matrix: &AdjacencyMatrix, table: &ConstraintTable) -> Result<(), NbsError> {
    if matrix.dim() != NUM_NODES {
        return Err(NbsError::InvalidTopology(
            ErrorInfo::new("cell-size-mismatch", "matrix does not describe one cell")
                .with_context("dim", matrix.dim())
                .with_context("expected", NUM_NODES),
        ));
    }
    if !matrix.is_strictly_upper_triangular() {
        return Err(NbsError::InvalidTopology(ErrorInfo::new(
            "not-upper-triangular",
            "cell contains a backward edge or self loop",
        )));
    }
    for (node, required) in table.iter() {
        let actual = matrix.in_degree(node);
        if actual != required {
            return Err(NbsError::InvalidTopology(
                ErrorInfo::new("fan-in-mismatch", "node has the wrong number of parents")
                    .with_context("node", node)
                    .with_context("required", required)
                    .with_context("actual", actual),
            ));
        }
    }
    if let Some(&node) = loose_ends(matrix).first() {
        return Err(NbsError::InvalidTopology(
            ErrorInfo::new("loose-end", "intermediate node output is never consumed")
                .with_context("node", node),
        ));
    }
    let from_input = reachable_from_input(matrix);
    let to_output = reaches_output(matrix);
    for node in intermediate_nodes().chain(std::iter::once(OUTPUT_NODE)) {
        if from_input & (1 << node) == 0 {
            return Err(NbsError::InvalidTopology(
                ErrorInfo::new("unreachable-node", "node is not reachable from the input")
                    .with_context("node", node),
            ));
        }
        if to_output & (1 << node) == 0 {
            return Err(NbsError::InvalidTopology(
                ErrorInfo::new("dead-end-node", "node has no path to the output")
                    .with_context("node", node),
            ));
        }
    }
    Ok(())
}

/// Boolean form of [`check_admissible`].
pub fn is_admissible(matrix: &AdjacencyMatrix, table: &ConstraintTable) -> bool {
    check_admissible(matrix, table).is_ok()
}
