use log::{debug, warn};
use nbs_core::errors::NbsError;
use nbs_core::{Op, FIXED_BRIDGE_OP};

use crate::history::{ArchitectureRecord, RunHistory};
use crate::oracle::{Canonicalizer, ConfigDecoder, Oracle};

/// Drives configurations through decoder, canonicalizer and oracle, and
/// keeps the resulting records.
///
/// The evaluator owns its [`RunHistory`]. `evaluate` takes `&mut self`, so
/// only one caller can append at a time; parallel experiments use one
/// evaluator each and merge afterwards with [`RunHistory::extend_from`].
#[derive(Debug)]
pub struct Evaluator<D, C, O> {
    decoder: D,
    canonicalizer: C,
    oracle: O,
    history: RunHistory,
}

impl<D, C, O> Evaluator<D, C, O>
where
    D: ConfigDecoder,
    C: Canonicalizer,
    O: Oracle,
{
    /// Creates an evaluator with an empty history.
    pub fn new(decoder: D, canonicalizer: C, oracle: O) -> Self {
        Self::with_history(decoder, canonicalizer, oracle, RunHistory::new())
    }

    /// Creates an evaluator that keeps appending to `history`.
    pub fn with_history(decoder: D, canonicalizer: C, oracle: O, history: RunHistory) -> Self {
        Self {
            decoder,
            canonicalizer,
            oracle,
            history,
        }
    }

    /// Evaluates `config` at `budget` epochs and returns
    /// `(validation_accuracy, training_time)`.
    ///
    /// Exactly one record is appended on success and none on failure.
    pub fn evaluate(&mut self, config: &D::Config, budget: u32) -> Result<(f64, f64), NbsError> {
        match self.query(config, budget) {
            Ok(record) => {
                let outcome = (
                    record.metrics.validation_accuracy,
                    record.metrics.training_time,
                );
                debug!(
                    "evaluated cell at {budget} epochs: validation accuracy {:.4}",
                    outcome.0
                );
                self.history.push(record);
                Ok(outcome)
            }
            Err(err) => {
                warn!("evaluation at {budget} epochs failed: {}", err.code());
                Err(err)
            }
        }
    }

    fn query(&self, config: &D::Config, budget: u32) -> Result<ArchitectureRecord, NbsError> {
        let decoded = self.decoder.decode(config)?;
        let labels: Vec<Op> = std::iter::once(Op::Input)
            .chain(decoded.ops.iter().copied())
            .chain([FIXED_BRIDGE_OP, Op::Output])
            .collect();
        let spec = self.canonicalizer.canonicalize(&decoded.matrix, &labels)?;
        spec.validate()?;
        let metrics = self.oracle.query(&spec, budget)?;
        Ok(ArchitectureRecord {
            adjacency_matrix: spec.matrix,
            node_ops: spec.ops,
            metrics,
            budget,
        })
    }

    /// Read-only view of everything evaluated so far.
    pub fn history(&self) -> &RunHistory {
        &self.history
    }

    /// The oracle backing this evaluator.
    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Consumes the evaluator and hands back its history.
    pub fn into_history(self) -> RunHistory {
        self.history
    }
}
