//! Error taxonomy for the search space, its decoder and the oracle bridge.
//!
//! Every failure carries an [`ErrorInfo`]: a stable kebab-case `code`, a
//! message, key/value context (node indices, counts, limits) and an
//! optional remediation hint. The enclosing [`NbsError`] variant names the
//! stage that failed.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Payload shared by all [`NbsError`] families.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable code, e.g. `fan-in-mismatch`.
    pub code: String,
    /// Human readable description.
    pub message: String,
    /// Offending values keyed by name.
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// How the caller might fix the input.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Payload with no context and no hint.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Records `value` under `key`.
    pub fn with_context(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.context.insert(key.into(), value.to_string());
        self
    }

    /// Attaches a remediation hint.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        let mut entries = self.context.iter();
        if let Some((key, value)) = entries.next() {
            write!(f, " | context: [{key}={value}")?;
            for (key, value) in entries {
                write!(f, ", {key}={value}")?;
            }
            write!(f, "]")?;
        }
        match &self.hint {
            Some(hint) => write!(f, " | hint: {hint}"),
            None => Ok(()),
        }
    }
}

/// Failure of any search-space or evaluation step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum NbsError {
    /// Constraint table or run configuration rejected.
    #[error("configuration error: {0}")]
    Configuration(ErrorInfo),
    /// An external configuration could not be turned into a cell.
    #[error("decoding error: {0}")]
    Decoding(ErrorInfo),
    /// A matrix or fixed-format cell broke acyclicity, fan-in or format rules.
    #[error("invalid topology: {0}")]
    InvalidTopology(ErrorInfo),
    /// Raised by the benchmark oracle and passed through unchanged.
    #[error("oracle error: {0}")]
    Oracle(ErrorInfo),
    /// Run history could not be encoded or decoded.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl NbsError {
    /// Payload of the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            NbsError::Configuration(info)
            | NbsError::Decoding(info)
            | NbsError::InvalidTopology(info)
            | NbsError::Oracle(info)
            | NbsError::Serde(info) => info,
        }
    }

    /// Stable code of the payload.
    pub fn code(&self) -> &str {
        &self.info().code
    }

    /// Family name, matching the serialized `family` tag.
    pub fn family(&self) -> &'static str {
        match self {
            NbsError::Configuration(_) => "Configuration",
            NbsError::Decoding(_) => "Decoding",
            NbsError::InvalidTopology(_) => "InvalidTopology",
            NbsError::Oracle(_) => "Oracle",
            NbsError::Serde(_) => "Serde",
        }
    }

    /// Context value recorded under `key`, if any.
    pub fn context(&self, key: &str) -> Option<&str> {
        self.info().context.get(key).map(String::as_str)
    }
}
