//! Named filtration algorithms and their tuning options.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::{ErrorInfo, FlagserError};

/// Filtration algorithm used to assign values to simplices of dimension one and above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FiltrationKind {
    /// Every simplex appears at its dimension.
    Dimension,
    /// Every simplex appears at zero.
    Zero,
    /// Maximum of the boundary values (the default).
    #[default]
    Max,
    /// Maximum read directly from the contained edges for low dimensions.
    Max3,
    /// Maximum of the boundary values plus one.
    MaxPlusOne,
    /// Product of the boundary values.
    Product,
    /// Sum of the boundary values.
    Sum,
    /// Power mean of the boundary values.
    Pmean,
    /// Power moment of the boundary values.
    Pmoment,
    /// Maximum filtration after dropping edges above a threshold.
    RemoveEdges,
    /// Largest degree among the vertices of the simplex.
    VertexDegree,
}

/// Every implemented filtration in the order they are advertised.
pub const IMPLEMENTED_FILTRATIONS: [FiltrationKind; 11] = [
    FiltrationKind::Dimension,
    FiltrationKind::Zero,
    FiltrationKind::Max,
    FiltrationKind::Max3,
    FiltrationKind::MaxPlusOne,
    FiltrationKind::Product,
    FiltrationKind::Sum,
    FiltrationKind::Pmean,
    FiltrationKind::Pmoment,
    FiltrationKind::RemoveEdges,
    FiltrationKind::VertexDegree,
];

impl FiltrationKind {
    /// Returns the canonical name of the filtration.
    pub fn name(&self) -> &'static str {
        match self {
            FiltrationKind::Dimension => "dimension",
            FiltrationKind::Zero => "zero",
            FiltrationKind::Max => "max",
            FiltrationKind::Max3 => "max3",
            FiltrationKind::MaxPlusOne => "max_plus_one",
            FiltrationKind::Product => "product",
            FiltrationKind::Sum => "sum",
            FiltrationKind::Pmean => "pmean",
            FiltrationKind::Pmoment => "pmoment",
            FiltrationKind::RemoveEdges => "remove_edges",
            FiltrationKind::VertexDegree => "vertex_degree",
        }
    }

    /// Returns the names of all implemented filtrations.
    pub fn implemented_names() -> Vec<&'static str> {
        IMPLEMENTED_FILTRATIONS.iter().map(|kind| kind.name()).collect()
    }

    /// Resolves a filtration name, optionally falling back to `max` with a warning.
    pub fn resolve(name: &str, allow_fallback: bool) -> Result<Self, FlagserError> {
        match name.parse::<FiltrationKind>() {
            Ok(kind) => Ok(kind),
            Err(_) if allow_fallback => {
                warn!(
                    filtration = name,
                    available = ?FiltrationKind::implemented_names(),
                    "unrecognized filtration, using max"
                );
                Ok(FiltrationKind::Max)
            }
            Err(err) => Err(err),
        }
    }

    /// Returns whether the filtration removes edges before enumeration.
    pub fn prunes_edges(&self) -> bool {
        matches!(self, FiltrationKind::RemoveEdges)
    }
}

impl fmt::Display for FiltrationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FiltrationKind {
    type Err = FlagserError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IMPLEMENTED_FILTRATIONS
            .iter()
            .copied()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| {
                FlagserError::UnrecognizedFiltration(
                    ErrorInfo::new("unknown-filtration", format!("no filtration named `{s}`"))
                        .with_parameter("filtration", s)
                        .with_hint(format!(
                            "available algorithms: {}",
                            FiltrationKind::implemented_names().join(", ")
                        )),
                )
            })
    }
}

/// Tuning knobs consumed by the parametrised filtrations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FiltrationOptions {
    /// Exponent `p` used by `pmean` and `pmoment`.
    pub exponent: f64,
    /// Edges strictly above this weight are dropped by `remove_edges`.
    pub edge_threshold: f64,
}

impl Default for FiltrationOptions {
    fn default() -> Self {
        Self {
            exponent: 2.0,
            edge_threshold: f64::INFINITY,
        }
    }
}

impl FiltrationOptions {
    /// Checks that the options can be used by every filtration.
    pub fn validate(&self) -> Result<(), FlagserError> {
        if !(self.exponent.is_finite() && self.exponent > 0.0) {
            return Err(FlagserError::InvalidParameter(
                ErrorInfo::new("invalid-exponent", "power exponent must be finite and positive")
                    .with_parameter("exponent", self.exponent),
            ));
        }
        if self.edge_threshold.is_nan() {
            return Err(FlagserError::InvalidParameter(
                ErrorInfo::new("invalid-threshold", "edge threshold must not be NaN")
                    .with_parameter("edge_threshold", self.edge_threshold),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_parse_back() {
        for kind in IMPLEMENTED_FILTRATIONS {
            assert_eq!(kind.name().parse::<FiltrationKind>().unwrap(), kind);
        }
    }

    #[test]
    fn unknown_name_is_rejected_without_fallback() {
        let err = FiltrationKind::resolve("maximum", false).unwrap_err();
        assert_eq!(err.code(), "unknown-filtration");
        assert_eq!(err.info().context.get("value").map(String::as_str), Some("maximum"));
    }

    #[test]
    fn fallback_resolves_to_max() {
        assert_eq!(FiltrationKind::resolve("maximum", true).unwrap(), FiltrationKind::Max);
    }
}
