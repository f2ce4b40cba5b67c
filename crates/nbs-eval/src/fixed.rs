use nbs_core::errors::{ErrorInfo, NbsError};
use nbs_core::{AdjacencyMatrix, Op, MAX_EDGES, ORACLE_NUM_NODES};
use nbs_space::validity::{reachable_from_input, reaches_output};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// A cell in the oracle's fixed-size format: matrix plus one op label per node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FixedSpec {
    /// Oracle-format adjacency matrix.
    pub matrix: AdjacencyMatrix,
    /// Operation label of every node, input first and output last.
    pub ops: Vec<Op>,
}

impl FixedSpec {
    /// Pairs a matrix with its labels without checking them.
    pub fn new(matrix: AdjacencyMatrix, ops: Vec<Op>) -> Self {
        Self { matrix, ops }
    }

    /// Checks the format rules the oracle enforces.
    pub fn validate(&self) -> Result<(), NbsError> {
        let dim = self.matrix.dim();
        if dim != self.ops.len() {
            return Err(NbsError::InvalidTopology(
                ErrorInfo::new("ops-length-mismatch", "one op label per node is required")
                    .with_context("dim", dim)
                    .with_context("ops", self.ops.len()),
            ));
        }
        if !(2..=ORACLE_NUM_NODES).contains(&dim) {
            return Err(NbsError::InvalidTopology(
                ErrorInfo::new("format-size-mismatch", "node count outside the oracle format")
                    .with_context("dim", dim)
                    .with_context("max", ORACLE_NUM_NODES),
            ));
        }
        if !self.matrix.is_strictly_upper_triangular() {
            return Err(NbsError::InvalidTopology(ErrorInfo::new(
                "not-upper-triangular",
                "matrix is not a DAG in node order",
            )));
        }
        let edges = self.matrix.edge_count();
        if edges > MAX_EDGES {
            return Err(NbsError::InvalidTopology(
                ErrorInfo::new("too-many-edges", "cell exceeds the oracle's edge budget")
                    .with_context("edges", edges)
                    .with_context("max", MAX_EDGES),
            ));
        }
        if self.ops.first() != Some(&Op::Input) || self.ops.last() != Some(&Op::Output) {
            return Err(NbsError::InvalidTopology(ErrorInfo::new(
                "misplaced-io-op",
                "first op must be input and last op output",
            )));
        }
        if let Some(position) = self.ops[1..dim - 1]
            .iter()
            .position(|op| !op.is_intermediate())
        {
            return Err(NbsError::InvalidTopology(
                ErrorInfo::new("invalid-op", "inner nodes must carry an intermediate op")
                    .with_context("node", position + 1),
            ));
        }
        Ok(())
    }

    /// Drops every node that is not on an input to output path.
    ///
    /// The spec must pass [`FixedSpec::validate`] first. Fails when the
    /// output cannot be reached from the input at all.
    pub fn prune(&self) -> Result<FixedSpec, NbsError> {
        self.validate()?;
        let keep = reachable_from_input(&self.matrix) & reaches_output(&self.matrix);
        let output = self.matrix.dim().saturating_sub(1);
        if keep & (1 << output) == 0 || keep & 1 == 0 {
            return Err(NbsError::InvalidTopology(ErrorInfo::new(
                "disconnected-cell",
                "output is not reachable from the input",
            )));
        }
        let ops = self
            .ops
            .iter()
            .enumerate()
            .filter(|(node, _)| keep & (1 << node) != 0)
            .map(|(_, op)| *op)
            .collect();
        Ok(FixedSpec {
            matrix: self.matrix.retain_nodes(keep),
            ops,
        })
    }

    /// Isomorphism-invariant hash of the pruned cell; invalid specs are rejected.
    ///
    /// Node labels start from `(in-degree, out-degree, op)` and are refined
    /// once per node by hashing the sorted labels of parents and children.
    pub fn fingerprint(&self) -> Result<String, NbsError> {
        let pruned = self.prune()?;
        let matrix = &pruned.matrix;
        let mut labels: Vec<String> = pruned
            .ops
            .iter()
            .enumerate()
            .map(|(node, op)| {
                digest(&[
                    matrix.in_degree(node).to_string().as_bytes(),
                    matrix.out_degree(node).to_string().as_bytes(),
                    op.label().as_bytes(),
                ])
            })
            .collect();

        for _ in 0..matrix.dim() {
            let refined: Vec<String> = (0..matrix.dim())
                .map(|node| {
                    let mut incoming: Vec<&str> =
                        matrix.parents(node).map(|p| labels[p].as_str()).collect();
                    let mut outgoing: Vec<&str> =
                        matrix.children(node).map(|c| labels[c].as_str()).collect();
                    incoming.sort_unstable();
                    outgoing.sort_unstable();
                    digest(&[
                        incoming.concat().as_bytes(),
                        outgoing.concat().as_bytes(),
                        labels[node].as_bytes(),
                    ])
                })
                .collect();
            labels = refined;
        }

        labels.sort_unstable();
        Ok(digest(&[labels.concat().as_bytes()]))
    }
}

fn digest(parts: &[&[u8]]) -> String {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update((part.len() as u64).to_le_bytes());
        hasher.update(part);
    }
    format!("{:x}", hasher.finalize())
}
