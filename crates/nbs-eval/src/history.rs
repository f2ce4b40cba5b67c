use nbs_core::errors::{ErrorInfo, NbsError};
use nbs_core::{AdjacencyMatrix, Op};
use serde::{Deserialize, Serialize};

use crate::config::ReferenceErrors;
use crate::oracle::OracleMetrics;

/// Outcome of one successful oracle query.
///
/// Holds the cell exactly as the oracle saw it: the padded 7-node matrix
/// with the isolated bridge node before the output, not the decoded
/// 6-node cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchitectureRecord {
    /// Fixed-format (7-node) matrix that was queried, bridge node included.
    pub adjacency_matrix: AdjacencyMatrix,
    /// Fixed-format labels `[input, ops.., conv1x1 bridge, output]`, one per matrix node.
    pub node_ops: Vec<Op>,
    /// Metrics returned by the oracle.
    pub metrics: OracleMetrics,
    /// Training budget in epochs.
    pub budget: u32,
}

/// Distance of a record's errors from the best known errors of the space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Regret {
    /// Validation error minus the best known validation error.
    pub validation: f64,
    /// Test error minus the best known test error.
    pub test: f64,
}

impl ArchitectureRecord {
    /// Regret of this record against `reference`.
    pub fn regret(&self, reference: &ReferenceErrors) -> Regret {
        Regret {
            validation: (1.0 - self.metrics.validation_accuracy) - reference.validation,
            test: (1.0 - self.metrics.test_accuracy) - reference.test,
        }
    }
}

/// Append-only, ordered list of evaluation records.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RunHistory {
    records: Vec<ArchitectureRecord>,
}

impl RunHistory {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, record: ArchitectureRecord) {
        self.records.push(record);
    }

    /// Appends every record of `other`, preserving its order.
    pub fn extend_from(&mut self, other: RunHistory) {
        self.records.extend(other.records);
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in insertion order.
    pub fn records(&self) -> &[ArchitectureRecord] {
        &self.records
    }

    /// Iterates records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &ArchitectureRecord> {
        self.records.iter()
    }

    /// Most recent record.
    pub fn last(&self) -> Option<&ArchitectureRecord> {
        self.records.last()
    }

    /// Record with the highest validation accuracy; the earliest wins ties.
    pub fn best_by_validation(&self) -> Option<&ArchitectureRecord> {
        self.records.iter().reduce(|best, record| {
            if record.metrics.validation_accuracy > best.metrics.validation_accuracy {
                record
            } else {
                best
            }
        })
    }

    /// Serializes the history to pretty JSON.
    pub fn to_json(&self) -> Result<String, NbsError> {
        serde_json::to_string_pretty(self)
            .map_err(|err| NbsError::Serde(ErrorInfo::new("serialize-json", err.to_string())))
    }

    /// Restores a history from JSON.
    pub fn from_json(json: &str) -> Result<Self, NbsError> {
        serde_json::from_str(json)
            .map_err(|err| NbsError::Serde(ErrorInfo::new("deserialize-json", err.to_string())))
    }

    /// Serializes the history to a compact binary representation using `bincode`.
    pub fn to_bytes(&self) -> Result<Vec<u8>, NbsError> {
        bincode::serialize(self)
            .map_err(|err| NbsError::Serde(ErrorInfo::new("serialize-bytes", err.to_string())))
    }

    /// Restores a history from its binary representation.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, NbsError> {
        bincode::deserialize(bytes)
            .map_err(|err| NbsError::Serde(ErrorInfo::new("deserialize-bytes", err.to_string())))
    }
}
