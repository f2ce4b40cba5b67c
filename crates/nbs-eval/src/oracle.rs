//! Contracts of the collaborators the evaluator drives.

use nbs_core::errors::NbsError;
use nbs_core::{AdjacencyMatrix, Op};
use serde::{Deserialize, Serialize};

use crate::fixed::FixedSpec;

/// A cell decoded from an external configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedCell {
    /// Cell wiring, sized to the cell's node count.
    pub matrix: AdjacencyMatrix,
    /// Operations of the intermediate nodes, in node order.
    pub ops: Vec<Op>,
}

/// Metrics returned by the oracle for one query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OracleMetrics {
    /// Accuracy on the validation split.
    pub validation_accuracy: f64,
    /// Accuracy on the test split.
    pub test_accuracy: f64,
    /// Wall-clock training time in seconds.
    pub training_time: f64,
    /// Number of trainable parameters, when reported.
    #[serde(default)]
    pub trainable_parameters: Option<u64>,
}

/// Turns an optimizer-facing configuration into a cell.
pub trait ConfigDecoder {
    /// Configuration type understood by the decoder.
    type Config;

    /// Decodes `config`; malformed input fails with [`NbsError::Decoding`].
    fn decode(&self, config: &Self::Config) -> Result<DecodedCell, NbsError>;
}

/// Brings a cell into the oracle's fixed-size format.
pub trait Canonicalizer {
    /// Converts the cell matrix and its full op label sequence into a [`FixedSpec`].
    fn canonicalize(&self, matrix: &AdjacencyMatrix, ops: &[Op]) -> Result<FixedSpec, NbsError>;
}

/// Benchmark oracle scoring fixed-format cells.
///
/// Treated as a black box: no retry, timeout or caching is assumed.
pub trait Oracle {
    /// Looks up the metrics of `spec` trained for `budget` epochs.
    fn query(&self, spec: &FixedSpec, budget: u32) -> Result<OracleMetrics, NbsError>;
}
