use std::collections::BTreeMap;

use nbs_core::errors::{ErrorInfo, NbsError};

use crate::fixed::FixedSpec;
use crate::oracle::{Oracle, OracleMetrics};

/// In-memory oracle answering from a precomputed table.
///
/// Entries are keyed by the cell fingerprint and the training budget, so
/// isomorphic cells and cells differing only in pruned nodes share a row.
#[derive(Debug, Clone, Default)]
pub struct TabularOracle {
    rows: BTreeMap<(String, u32), OracleMetrics>,
}

impl TabularOracle {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the metrics of `spec` at `budget`, replacing any previous row.
    pub fn insert(
        &mut self,
        spec: &FixedSpec,
        budget: u32,
        metrics: OracleMetrics,
    ) -> Result<(), NbsError> {
        spec.validate()?;
        let key = (spec.fingerprint()?, budget);
        self.rows.insert(key, metrics);
        Ok(())
    }

    /// Number of stored rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table holds no row.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl Oracle for TabularOracle {
    fn query(&self, spec: &FixedSpec, budget: u32) -> Result<OracleMetrics, NbsError> {
        spec.validate()?;
        let fingerprint = spec.fingerprint()?;
        if let Some(metrics) = self.rows.get(&(fingerprint.clone(), budget)) {
            return Ok(metrics.clone());
        }
        let known = self.rows.keys().any(|(hash, _)| *hash == fingerprint);
        let info = if known {
            ErrorInfo::new("budget-unavailable", "no entry for this training budget")
        } else {
            ErrorInfo::new("unknown-architecture", "cell is not in the table")
        };
        Err(NbsError::Oracle(
            info.with_context("fingerprint", fingerprint)
                .with_context("budget", budget),
        ))
    }
}
