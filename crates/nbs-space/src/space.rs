use nbs_core::rng::RngHandle;
use nbs_core::AdjacencyMatrix;

use crate::constraints::ConstraintTable;
use crate::enumerate::{
    count_with_loose_ends, enumerate_with_loose_ends, enumerate_without_loose_ends, CompleteIter,
    LooseEndsIter,
};
use crate::sample::{
    sample_architecture, sample_with_loose_ends, sample_without_loose_ends, SampledCell,
};
use crate::validity::is_admissible;

/// A search space fixed by one constraint table.
///
/// Every method is a pure function of the table; enumerations can be
/// started any number of times and dropped at any point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchSpace {
    table: ConstraintTable,
}

impl SearchSpace {
    /// Wraps an already validated table.
    pub fn new(table: ConstraintTable) -> Self {
        Self { table }
    }

    /// The constraint table defining the space.
    pub fn table(&self) -> &ConstraintTable {
        &self.table
    }

    /// Every complete cell, each exactly once.
    pub fn enumerate_without_loose_ends(&self) -> CompleteIter {
        enumerate_without_loose_ends(&self.table)
    }

    /// Every cell of the unfiltered parent-choice product.
    pub fn enumerate_with_loose_ends(&self) -> LooseEndsIter {
        enumerate_with_loose_ends(&self.table)
    }

    /// Size of [`SearchSpace::enumerate_with_loose_ends`].
    pub fn count_with_loose_ends(&self) -> usize {
        count_with_loose_ends(&self.table)
    }

    /// One uniformly drawn cell of the loose-ends space.
    pub fn sample_with_loose_ends(&self, rng: &mut RngHandle) -> Option<AdjacencyMatrix> {
        sample_with_loose_ends(&self.table, rng)
    }

    /// One uniformly drawn complete cell.
    pub fn sample_without_loose_ends(&self, rng: &mut RngHandle) -> Option<AdjacencyMatrix> {
        sample_without_loose_ends(&self.table, rng)
    }

    /// One loose-ends cell with random intermediate operations.
    pub fn sample_architecture(&self, rng: &mut RngHandle) -> Option<SampledCell> {
        sample_architecture(&self.table, rng)
    }

    /// Whether `matrix` is a complete cell of this space.
    pub fn contains(&self, matrix: &AdjacencyMatrix) -> bool {
        is_admissible(matrix, &self.table)
    }
}
