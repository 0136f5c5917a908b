//! One error type for every kernel, split into families.
//!
//! A family names the crate that raised the error; the [`ErrorInfo`] payload
//! carries a stable kebab-case code that tests and callers match on, plus
//! whatever parameters explain the failure.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Code, message and parameters of a failed contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Kebab-case code, stable across releases.
    pub code: String,
    /// One-line description.
    pub message: String,
    /// Offending parameters by name, e.g. `g`, `modulus`, `len`.
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Suggested fix, if there is an obvious one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
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

    /// Records a parameter; a repeated key keeps the last value.
    pub fn with_context(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.context.insert(key.into(), value.to_string());
        self
    }

    /// Attaches a suggested fix.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Recorded value of parameter `key`.
    pub fn context_value(&self, key: &str) -> Option<&str> {
        self.context.get(key).map(String::as_str)
    }
}

impl fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        let mut params = self.context.iter();
        if let Some((key, value)) = params.next() {
            write!(f, " {{{key}={value}")?;
            for (key, value) in params {
                write!(f, ", {key}={value}")?;
            }
            write!(f, "}}")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, "; hint: {hint}")?;
        }
        Ok(())
    }
}

/// Error returned by every fallible ntk operation.
///
/// Numerical trouble inside certified arithmetic is not an error: it shows up
/// as an indeterminate enclosure. Variants are reserved for broken shape or
/// parameter contracts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum NtkError {
    /// Ball construction.
    #[error("ball: {0}")]
    Ball(ErrorInfo),
    /// Matrix shapes.
    #[error("matrix: {0}")]
    Matrix(ErrorInfo),
    /// Theta characteristics and lattice distances.
    #[error("theta: {0}")]
    Theta(ErrorInfo),
    /// Word-size moduli and their polynomials.
    #[error("nmod: {0}")]
    Nmod(ErrorInfo),
    /// Finite field construction.
    #[error("field: {0}")]
    Field(ErrorInfo),
    /// p-adic contexts and conversions.
    #[error("padic: {0}")]
    Padic(ErrorInfo),
    /// Exact numbers.
    #[error("ca: {0}")]
    Ca(ErrorInfo),
    /// Random sampling.
    #[error("rng: {0}")]
    Rng(ErrorInfo),
    /// Option files and JSON artefacts.
    #[error("serde: {0}")]
    Serde(ErrorInfo),
}

impl NtkError {
    /// The payload.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            NtkError::Ball(info)
            | NtkError::Matrix(info)
            | NtkError::Theta(info)
            | NtkError::Nmod(info)
            | NtkError::Field(info)
            | NtkError::Padic(info)
            | NtkError::Ca(info)
            | NtkError::Rng(info)
            | NtkError::Serde(info) => info,
        }
    }

    /// Stable code of the payload.
    pub fn code(&self) -> &str {
        &self.info().code
    }

    /// Lowercase family name, as used in the rendered message.
    pub fn family(&self) -> &'static str {
        match self {
            NtkError::Ball(_) => "ball",
            NtkError::Matrix(_) => "matrix",
            NtkError::Theta(_) => "theta",
            NtkError::Nmod(_) => "nmod",
            NtkError::Field(_) => "field",
            NtkError::Padic(_) => "padic",
            NtkError::Ca(_) => "ca",
            NtkError::Rng(_) => "rng",
            NtkError::Serde(_) => "serde",
        }
    }
}
