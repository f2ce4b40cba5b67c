#![deny(missing_docs)]

//! Oracle-backed evaluation of search-space cells.
//!
//! The [`Evaluator`] decodes a configuration into a cell, brings it into the
//! oracle's fixed format, queries the oracle and appends the outcome to the
//! [`RunHistory`] it owns. Decoder, canonicalizer and oracle are traits so
//! that real benchmarks plug in; [`ParentChoiceDecoder`],
//! [`UpscaleToFixedFormat`] and [`TabularOracle`] are ready-made
//! implementations.

mod canonical;
pub mod config;
mod decoder;
mod evaluator;
mod fixed;
mod history;
pub mod oracle;
mod tabular;

pub use canonical::{UpscaleToFixedFormat, PADDING_OP};
pub use config::{ReferenceErrors, SeedPolicy, SpaceConfig, ORACLE_BUDGETS};
pub use decoder::{CellConfig, ParentChoiceDecoder};
pub use evaluator::Evaluator;
pub use fixed::FixedSpec;
pub use history::{ArchitectureRecord, Regret, RunHistory};
pub use oracle::{Canonicalizer, ConfigDecoder, DecodedCell, Oracle, OracleMetrics};
pub use tabular::TabularOracle;
