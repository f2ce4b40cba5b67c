use nbs_core::errors::{ErrorInfo, NbsError};
use nbs_core::{AdjacencyMatrix, Op, FIXED_BRIDGE_OP, ORACLE_NUM_NODES};

use crate::fixed::FixedSpec;
use crate::oracle::Canonicalizer;

/// Label given to padding nodes; they stay isolated and are pruned by the oracle.
pub const PADDING_OP: Op = Op::MaxPool3x3;

/// Brings a cell into the oracle format by inserting one isolated bridge node
/// immediately before the output, preceded by isolated padding nodes when
/// the cell is smaller than the format.
///
/// Accepts either one label per cell node, in which case the bridge op is
/// inserted, or labels that already carry the bridge op in the
/// second-to-last slot.
#[derive(Debug, Clone, Copy, Default)]
pub struct UpscaleToFixedFormat;

impl Canonicalizer for UpscaleToFixedFormat {
    fn canonicalize(&self, matrix: &AdjacencyMatrix, ops: &[Op]) -> Result<FixedSpec, NbsError> {
        let dim = matrix.dim();
        if !(2..ORACLE_NUM_NODES).contains(&dim) {
            return Err(NbsError::InvalidTopology(
                ErrorInfo::new("format-size-mismatch", "cell does not fit the oracle format")
                    .with_context("dim", dim)
                    .with_context("max", ORACLE_NUM_NODES - 1),
            ));
        }
        let output = dim - 1;
        let mut fixed_ops = if ops.len() == dim {
            let mut padded = ops.to_vec();
            padded.insert(output, FIXED_BRIDGE_OP);
            padded
        } else if ops.len() == dim + 1 && ops[output] == FIXED_BRIDGE_OP {
            ops.to_vec()
        } else {
            return Err(NbsError::InvalidTopology(
                ErrorInfo::new("ops-length-mismatch", "op labels do not match the cell")
                    .with_context("dim", dim)
                    .with_context("ops", ops.len()),
            ));
        };

        let mut fixed_matrix = matrix.insert_isolated_node(output)?;
        while fixed_matrix.dim() < ORACLE_NUM_NODES {
            fixed_matrix = fixed_matrix.insert_isolated_node(output)?;
            fixed_ops.insert(output, PADDING_OP);
        }
        Ok(FixedSpec::new(fixed_matrix, fixed_ops))
    }
}
