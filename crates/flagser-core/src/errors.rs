//! Structured error types shared across flagser crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`FlagserError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (parameter names, values, sizes, etc.).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Records the offending parameter name and its value.
    pub fn with_parameter(self, name: &str, value: impl ToString) -> Self {
        self.with_context("parameter", name)
            .with_context("value", value.to_string())
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for the flagser engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum FlagserError {
    /// Malformed matrix shape, value or edge list.
    #[error("invalid input: {0}")]
    InvalidInput(ErrorInfo),
    /// Bad dimension bounds, non-prime coefficient or other parameter errors.
    #[error("invalid parameter: {0}")]
    InvalidParameter(ErrorInfo),
    /// A filtration name that is not implemented.
    #[error("unrecognized filtration: {0}")]
    UnrecognizedFiltration(ErrorInfo),
    /// Enumeration or reduction exceeded the configured memory bounds.
    #[error("resource exhausted: {0}")]
    ResourceExhausted(ErrorInfo),
    /// Filtration aggregation produced a non-finite value.
    #[error("arithmetic overflow: {0}")]
    ArithmeticOverflow(ErrorInfo),
    /// Malformed flag file contents.
    #[error("format error: {0}")]
    Format(ErrorInfo),
    /// Filesystem failures while reading or writing artefacts.
    #[error("io error: {0}")]
    Io(ErrorInfo),
    /// Serialization and schema errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl FlagserError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            FlagserError::InvalidInput(info)
            | FlagserError::InvalidParameter(info)
            | FlagserError::UnrecognizedFiltration(info)
            | FlagserError::ResourceExhausted(info)
            | FlagserError::ArithmeticOverflow(info)
            | FlagserError::Format(info)
            | FlagserError::Io(info)
            | FlagserError::Serde(info) => info,
        }
    }

    /// Returns the stable error code of the payload.
    pub fn code(&self) -> &str {
        &self.info().code
    }

    /// Wraps a filesystem error with the path that triggered it.
    pub fn io(code: &str, path: impl Display, err: impl ToString) -> Self {
        FlagserError::Io(ErrorInfo::new(code, err.to_string()).with_context("path", path.to_string()))
    }
}
