use nbs_core::errors::{ErrorInfo, NbsError};
use nbs_core::{AdjacencyMatrix, NUM_NODES};

use crate::parents::ParentSet;

/// One parent set per cell node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ParentAssignment {
    masks: [u8; NUM_NODES],
}

impl ParentAssignment {
    /// Assignment where no node has parents yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `set` as the parents of its node, replacing any previous choice.
    pub fn insert(&mut self, set: ParentSet) {
        self.masks[set.node()] = set.mask();
    }

    /// Drops the parents of `node`.
    pub fn clear(&mut self, node: usize) {
        if let Some(mask) = self.masks.get_mut(node) {
            *mask = 0;
        }
    }

    /// Raw parent bitmask of `node`; zero outside the cell.
    pub fn mask(&self, node: usize) -> u8 {
        self.masks.get(node).copied().unwrap_or(0)
    }

    /// Parents of `node` in ascending order.
    pub fn parents(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
        let mask = self.mask(node);
        (0..node).filter(move |parent| mask & (1 << parent) != 0)
    }

    /// Reads the parent sets back out of a cell matrix.
    pub fn from_matrix(matrix: &AdjacencyMatrix) -> Result<Self, NbsError> {
        if matrix.dim() != NUM_NODES {
            return Err(NbsError::InvalidTopology(
                ErrorInfo::new("cell-size-mismatch", "matrix does not describe one cell")
                    .with_context("dim", matrix.dim())
                    .with_context("expected", NUM_NODES),
            ));
        }
        let mut assignment = Self::new();
        for node in 0..NUM_NODES {
            let parents: Vec<usize> = matrix.parents(node).collect();
            assignment.insert(ParentSet::new(node, &parents)?);
        }
        Ok(assignment)
    }
}

/// Turns a parent assignment into its adjacency matrix.
///
/// Sets `(p, n)` for every parent `p` of every node `n` and nothing else. No
/// fan-in or reachability check happens here.
pub fn assemble(assignment: &ParentAssignment) -> AdjacencyMatrix {
    AdjacencyMatrix::from_parent_masks(&assignment.masks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assembles_columns_from_parent_sets() {
        let mut assignment = ParentAssignment::new();
        assignment.insert(ParentSet::new(1, &[0]).unwrap());
        assignment.insert(ParentSet::new(3, &[0, 1]).unwrap());
        assignment.insert(ParentSet::new(5, &[1, 3, 4]).unwrap());
        let matrix = assemble(&assignment);

        assert_eq!(matrix.edge_count(), 6);
        assert!(matrix.has_edge(0, 1));
        assert!(matrix.has_edge(0, 3));
        assert!(matrix.has_edge(4, 5));
        assert!(!matrix.has_edge(2, 5));
        assert_eq!(ParentAssignment::from_matrix(&matrix).unwrap(), assignment);
    }

    #[test]
    fn assembly_is_idempotent() {
        let mut assignment = ParentAssignment::new();
        assignment.insert(ParentSet::new(2, &[0, 1]).unwrap());
        assignment.insert(ParentSet::new(5, &[2]).unwrap());
        assert_eq!(assemble(&assignment), assemble(&assignment));
    }

    #[test]
    fn clear_removes_a_column() {
        let mut assignment = ParentAssignment::new();
        assignment.insert(ParentSet::new(4, &[1, 2]).unwrap());
        assignment.clear(4);
        assert_eq!(assemble(&assignment).edge_count(), 0);
        assert_eq!(assignment.parents(4).count(), 0);
    }
}
