use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, NbsError};
use crate::NUM_NODES;

/// Largest matrix dimension representable by [`AdjacencyMatrix`].
pub const MAX_DIM: usize = 8;

/// Square 0/1 adjacency matrix of a cell DAG.
///
/// Row `i` is stored as a bitmask of the children of node `i`. The only
/// mutator, [`AdjacencyMatrix::set_edge`], refuses anything but `i < j`, so
/// every value of this type is strictly upper-triangular. The serialized
/// form is the oracle's nested 0/1 list and is re-validated on decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "Vec<Vec<u8>>", try_from = "Vec<Vec<u8>>")]
pub struct AdjacencyMatrix {
    dim: usize,
    rows: [u8; MAX_DIM],
}

impl AdjacencyMatrix {
    /// Creates an empty matrix of the given dimension.
    pub fn new(dim: usize) -> Result<Self, NbsError> {
        if dim > MAX_DIM {
            return Err(NbsError::InvalidTopology(
                ErrorInfo::new("matrix-too-large", "matrix dimension exceeds supported maximum")
                    .with_context("dim", dim)
                    .with_context("max", MAX_DIM),
            ));
        }
        Ok(Self {
            dim,
            rows: [0; MAX_DIM],
        })
    }

    /// Creates an empty matrix sized for one cell.
    pub const fn empty_cell() -> Self {
        Self {
            dim: NUM_NODES,
            rows: [0; MAX_DIM],
        }
    }

    /// Builds a cell matrix from one parent bitmask per node.
    ///
    /// Bit `p` of `columns[n]` sets the edge `p -> n`. Bits at or above `n`
    /// are ignored, which keeps the result strictly upper-triangular.
    pub fn from_parent_masks(columns: &[u8; NUM_NODES]) -> Self {
        let mut rows = [0u8; MAX_DIM];
        for (node, mask) in columns.iter().enumerate() {
            let below = mask & ((1u16 << node) - 1) as u8;
            for (parent, row) in rows.iter_mut().enumerate().take(node) {
                if below & (1 << parent) != 0 {
                    *row |= 1 << node;
                }
            }
        }
        Self {
            dim: NUM_NODES,
            rows,
        }
    }

    /// Builds a matrix from the oracle's nested 0/1 representation.
    pub fn from_rows(rows: &[Vec<u8>]) -> Result<Self, NbsError> {
        let mut matrix = Self::new(rows.len())?;
        for (i, row) in rows.iter().enumerate() {
            if row.len() != rows.len() {
                return Err(NbsError::InvalidTopology(
                    ErrorInfo::new("matrix-not-square", "adjacency rows must match the dimension")
                        .with_context("row", i)
                        .with_context("len", row.len())
                        .with_context("dim", rows.len()),
                ));
            }
            for (j, value) in row.iter().enumerate() {
                match value {
                    0 => {}
                    1 => matrix.set_edge(i, j)?,
                    other => {
                        return Err(NbsError::InvalidTopology(
                            ErrorInfo::new("matrix-not-binary", "adjacency entries must be 0 or 1")
                                .with_context("row", i)
                                .with_context("col", j)
                                .with_context("value", other),
                        ))
                    }
                }
            }
        }
        Ok(matrix)
    }

    /// Returns the oracle's nested 0/1 representation.
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        (0..self.dim)
            .map(|i| (0..self.dim).map(|j| self.has_edge(i, j) as u8).collect())
            .collect()
    }

    /// Number of nodes covered by the matrix.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Whether the edge `from -> to` is present. Out-of-range indices read as absent.
    pub fn has_edge(&self, from: usize, to: usize) -> bool {
        from < self.dim && to < self.dim && self.rows[from] & (1 << to) != 0
    }

    /// Sets the edge `from -> to`.
    pub fn set_edge(&mut self, from: usize, to: usize) -> Result<(), NbsError> {
        if to >= self.dim {
            return Err(NbsError::InvalidTopology(
                ErrorInfo::new("node-out-of-range", "edge endpoint outside the matrix")
                    .with_context("from", from)
                    .with_context("to", to)
                    .with_context("dim", self.dim),
            ));
        }
        if from >= to {
            return Err(NbsError::InvalidTopology(
                ErrorInfo::new("not-upper-triangular", "edges must point to a higher node index")
                    .with_context("from", from)
                    .with_context("to", to)
                    .with_hint("parents must be strictly lower-indexed"),
            ));
        }
        self.rows[from] |= 1 << to;
        Ok(())
    }

    /// Total number of edges.
    pub fn edge_count(&self) -> usize {
        self.rows[..self.dim]
            .iter()
            .map(|row| row.count_ones() as usize)
            .sum()
    }

    /// Number of parents of `node`.
    pub fn in_degree(&self, node: usize) -> usize {
        self.parents(node).count()
    }

    /// Number of children of `node`.
    pub fn out_degree(&self, node: usize) -> usize {
        if node >= self.dim {
            return 0;
        }
        self.rows[node].count_ones() as usize
    }

    /// Parents of `node` in ascending order.
    pub fn parents(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
        (0..self.dim).filter(move |&from| self.has_edge(from, node))
    }

    /// Children of `node` in ascending order.
    pub fn children(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
        (0..self.dim).filter(move |&to| self.has_edge(node, to))
    }

    /// All edges in row-major order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.dim).flat_map(move |from| self.children(from).map(move |to| (from, to)))
    }

    /// Checks the raw storage: no self loops, no backward edges, no bits past `dim`.
    pub fn is_strictly_upper_triangular(&self) -> bool {
        self.rows.iter().enumerate().all(|(i, row)| {
            let allowed: u16 = if i + 1 >= self.dim {
                0
            } else {
                ((1u16 << self.dim) - 1) & !((1u16 << (i + 1)) - 1)
            };
            u16::from(*row) & !allowed == 0
        })
    }

    /// Returns a copy with an isolated node inserted at index `at`.
    ///
    /// Nodes at or above `at` shift up by one; every existing edge is kept.
    pub fn insert_isolated_node(&self, at: usize) -> Result<Self, NbsError> {
        if at > self.dim {
            return Err(NbsError::InvalidTopology(
                ErrorInfo::new("node-out-of-range", "insertion index outside the matrix")
                    .with_context("at", at)
                    .with_context("dim", self.dim),
            ));
        }
        let shift = |node: usize| if node >= at { node + 1 } else { node };
        let mut grown = Self::new(self.dim + 1)?;
        for (from, to) in self.edges() {
            grown.set_edge(shift(from), shift(to))?;
        }
        Ok(grown)
    }

    /// Returns the sub-matrix induced by the nodes whose bit is set in `keep`.
    pub fn retain_nodes(&self, keep: u8) -> Self {
        let kept: Vec<usize> = (0..self.dim).filter(|node| keep & (1 << node) != 0).collect();
        let mut rows = [0u8; MAX_DIM];
        for (new_from, &from) in kept.iter().enumerate() {
            for (new_to, &to) in kept.iter().enumerate() {
                if self.has_edge(from, to) {
                    rows[new_from] |= 1 << new_to;
                }
            }
        }
        Self {
            dim: kept.len(),
            rows,
        }
    }
}

impl Default for AdjacencyMatrix {
    fn default() -> Self {
        Self::empty_cell()
    }
}

impl From<AdjacencyMatrix> for Vec<Vec<u8>> {
    fn from(matrix: AdjacencyMatrix) -> Self {
        matrix.to_rows()
    }
}

impl TryFrom<Vec<Vec<u8>>> for AdjacencyMatrix {
    type Error = NbsError;

    fn try_from(rows: Vec<Vec<u8>>) -> Result<Self, Self::Error> {
        Self::from_rows(&rows)
    }
}

impl fmt::Display for AdjacencyMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, row) in self.to_rows().iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            for (col, value) in row.iter().enumerate() {
                if col > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{value}")?;
            }
        }
        Ok(())
    }
}
