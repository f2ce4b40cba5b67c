//! YAML run configuration: fan-in table, budget, seeding and reference errors.

use std::fs;
use std::path::Path;

use nbs_core::errors::{ErrorInfo, NbsError};
use nbs_core::rng::RngHandle;
use nbs_space::{ConstraintTable, SearchSpace};
use serde::{Deserialize, Serialize};

/// Training budgets (epochs) for which the oracle holds results.
pub const ORACLE_BUDGETS: [u32; 4] = [4, 12, 36, 108];

/// YAML-configurable description of a search space and how to evaluate it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpaceConfig {
    /// Fan-in of every node, input first.
    #[serde(default = "default_fan_in")]
    pub fan_in: Vec<usize>,
    /// Training budget in epochs used for oracle queries.
    #[serde(default = "default_budget")]
    pub budget: u32,
    /// Master seed and substream policy.
    #[serde(default)]
    pub seed_policy: SeedPolicy,
    /// Best known errors used for regret.
    #[serde(default)]
    pub reference_errors: ReferenceErrors,
}

fn default_fan_in() -> Vec<usize> {
    ConstraintTable::default().into()
}

fn default_budget() -> u32 {
    108
}

impl Default for SpaceConfig {
    fn default() -> Self {
        Self {
            fan_in: default_fan_in(),
            budget: default_budget(),
            seed_policy: SeedPolicy::default(),
            reference_errors: ReferenceErrors::default(),
        }
    }
}

impl SpaceConfig {
    /// Parses and validates a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, NbsError> {
        let config: SpaceConfig = serde_yaml::from_str(yaml).map_err(|err| {
            NbsError::Configuration(
                ErrorInfo::new("config-parse", "failed to parse YAML configuration")
                    .with_hint(err.to_string()),
            )
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a YAML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, NbsError> {
        let path = path.as_ref();
        let yaml = fs::read_to_string(path).map_err(|err| {
            NbsError::Configuration(
                ErrorInfo::new("config-read", "failed to read configuration file")
                    .with_context("path", path.display())
                    .with_hint(err.to_string()),
            )
        })?;
        Self::from_yaml_str(&yaml)
    }

    /// Checks the fan-in table and the budget.
    pub fn validate(&self) -> Result<(), NbsError> {
        self.constraint_table()?;
        if !ORACLE_BUDGETS.contains(&self.budget) {
            return Err(NbsError::Configuration(
                ErrorInfo::new("unsupported-budget", "the oracle has no results for this budget")
                    .with_context("budget", self.budget)
                    .with_hint("use one of 4, 12, 36 or 108 epochs"),
            ));
        }
        Ok(())
    }

    /// Builds the constraint table described by `fan_in`.
    pub fn constraint_table(&self) -> Result<ConstraintTable, NbsError> {
        ConstraintTable::from_slice(&self.fan_in)
    }

    /// Builds the search space described by `fan_in`.
    pub fn search_space(&self) -> Result<SearchSpace, NbsError> {
        Ok(SearchSpace::new(self.constraint_table()?))
    }

    /// RNG for this run: the master stream, or its labelled child when a label is set.
    pub fn rng(&self) -> RngHandle {
        let master = RngHandle::from_seed(self.seed_policy.master_seed);
        match &self.seed_policy.label {
            Some(label) => master.labelled(label),
            None => master,
        }
    }
}

/// Deterministic seeding configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedPolicy {
    /// Master seed used for all sampling.
    #[serde(default = "default_master_seed")]
    pub master_seed: u64,
    /// Names a labelled child stream of the master seed.
    #[serde(default)]
    pub label: Option<String>,
}

fn default_master_seed() -> u64 {
    0x05EE_D5EE_DD15_5EED_u64
}

impl Default for SeedPolicy {
    fn default() -> Self {
        Self {
            master_seed: default_master_seed(),
            label: None,
        }
    }
}

/// Lowest errors reached by any cell of the standard space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceErrors {
    /// Best test error.
    #[serde(default = "default_test_error")]
    pub test: f64,
    /// Best validation error.
    #[serde(default = "default_validation_error")]
    pub validation: f64,
}

fn default_test_error() -> f64 {
    0.057592153549194336
}

fn default_validation_error() -> f64 {
    0.051582515239715576
}

impl Default for ReferenceErrors {
    fn default() -> Self {
        Self {
            test: default_test_error(),
            validation: default_validation_error(),
        }
    }
}
