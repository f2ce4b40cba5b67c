use std::fmt;
use std::iter::FusedIterator;

use nbs_core::errors::{ErrorInfo, NbsError};
use nbs_core::{MAX_DIM, NUM_NODES};

/// Parents chosen for one node, stored as a bitmask of strictly lower node indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ParentSet {
    node: usize,
    mask: u8,
}

impl ParentSet {
    /// The empty parent set of `node`.
    pub fn empty(node: usize) -> Result<Self, NbsError> {
        Self::new(node, &[])
    }

    /// Builds the parent set of `node`, rejecting parents that are not lower-indexed.
    pub fn new(node: usize, parents: &[usize]) -> Result<Self, NbsError> {
        if node >= NUM_NODES {
            return Err(NbsError::InvalidTopology(
                ErrorInfo::new("node-out-of-range", "parent set for a node outside the cell")
                    .with_context("node", node),
            ));
        }
        let mut mask = 0u8;
        for &parent in parents {
            if parent >= node {
                return Err(NbsError::InvalidTopology(
                    ErrorInfo::new("parent-not-lower", "parents must precede their child")
                        .with_context("node", node)
                        .with_context("parent", parent),
                ));
            }
            mask |= 1 << parent;
        }
        Ok(Self { node, mask })
    }

    /// The set `{0}` of node 1.
    pub(crate) const fn input_only() -> Self {
        Self { node: 1, mask: 1 }
    }

    /// Node whose parents this set lists.
    pub fn node(&self) -> usize {
        self.node
    }

    /// Raw parent bitmask.
    pub fn mask(&self) -> u8 {
        self.mask
    }

    /// Number of parents.
    pub fn len(&self) -> usize {
        self.mask.count_ones() as usize
    }

    /// Whether the set holds no parent.
    pub fn is_empty(&self) -> bool {
        self.mask == 0
    }

    /// Whether `parent` belongs to the set.
    pub fn contains(&self, parent: usize) -> bool {
        parent < MAX_DIM && self.mask & (1 << parent) != 0
    }

    /// Parents in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.node).filter(move |parent| self.contains(*parent))
    }
}

impl fmt::Display for ParentSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (idx, parent) in self.iter().enumerate() {
            if idx > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{parent}")?;
        }
        write!(f, "}}")
    }
}

/// Binomial coefficient `C(n, k)`; zero when `k > n`.
pub fn binomial(n: usize, k: usize) -> usize {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    (0..k).fold(1, |acc, i| acc * (n - i) / (i + 1))
}

/// Lexicographic iterator over the size-`fan_in` subsets of `{0, .., node - 1}`.
#[derive(Debug, Clone)]
pub struct ParentSets {
    node: usize,
    fan_in: usize,
    indices: [usize; MAX_DIM],
    remaining: usize,
}

/// Enumerates every admissible parent set of `node` with exactly `fan_in` parents.
///
/// Yields `C(node, fan_in)` sets; a fan-in of zero yields the empty set once,
/// a fan-in larger than `node` yields nothing. Each call starts afresh.
pub fn parent_sets(node: usize, fan_in: usize) -> ParentSets {
    let indices: [usize; MAX_DIM] = std::array::from_fn(|slot| slot);
    let remaining = if node < NUM_NODES {
        binomial(node, fan_in)
    } else {
        0
    };
    ParentSets {
        node,
        fan_in,
        indices,
        remaining,
    }
}

impl ParentSets {
    fn current(&self) -> ParentSet {
        let mask = self.indices[..self.fan_in]
            .iter()
            .fold(0u8, |acc, parent| acc | (1 << parent));
        ParentSet {
            node: self.node,
            mask,
        }
    }

    fn advance(&mut self) {
        let width = self.fan_in;
        let Some(pivot) = (0..width)
            .rev()
            .find(|&slot| self.indices[slot] < self.node - width + slot)
        else {
            return;
        };
        self.indices[pivot] += 1;
        for slot in pivot + 1..width {
            self.indices[slot] = self.indices[slot - 1] + 1;
        }
    }
}

impl Iterator for ParentSets {
    type Item = ParentSet;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let set = self.current();
        self.remaining -= 1;
        if self.remaining > 0 {
            self.advance();
        }
        Some(set)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for ParentSets {}

impl FusedIterator for ParentSets {}
