#![deny(missing_docs)]

//! Enumeration and sampling of fan-in constrained cell topologies.
//!
//! A [`ConstraintTable`] fixes how many parents every node of a cell needs.
//! [`parent_sets`] lists the candidate parents of one node, [`assemble`]
//! turns one choice per node into an [`AdjacencyMatrix`](nbs_core::AdjacencyMatrix),
//! and the two enumeration modes walk the resulting space: the full product
//! with loose ends allowed, or only the complete cells in which every
//! intermediate node sits on an input to output path.

mod assemble;
mod constraints;
mod enumerate;
mod parents;
mod sample;
mod space;
pub mod validity;

pub use assemble::{assemble, ParentAssignment};
pub use constraints::ConstraintTable;
pub use enumerate::{
    count_with_loose_ends, enumerate_with_loose_ends, enumerate_without_loose_ends, CompleteIter,
    LooseEndsIter, FIRST_FREE_NODE,
};
pub use parents::{binomial, parent_sets, ParentSet, ParentSets};
pub use sample::{
    sample_architecture, sample_with_loose_ends, sample_without_loose_ends, SampledCell,
};
pub use space::SearchSpace;
pub use validity::{check_admissible, is_admissible, loose_ends};
