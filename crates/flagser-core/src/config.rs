//! YAML run configuration with loosely typed keyword parameters and their defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, FlagserError};
use crate::filtration::{FiltrationKind, FiltrationOptions};
use crate::params::{Approximation, DimensionBound, FlagserParams, ResourceLimits};

/// Loosely typed run configuration, validated into [`FlagserParams`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    /// Lowest reported dimension.
    #[serde(default)]
    pub min_dimension: i64,
    /// Highest reported dimension; `inf` or absent for unbounded.
    #[serde(default)]
    pub max_dimension: MaxDimension,
    /// Directed flag complex when true.
    #[serde(default = "default_directed")]
    pub directed: bool,
    /// Filtration name.
    #[serde(default = "default_filtration")]
    pub filtration: String,
    /// Fall back to `max` with a warning instead of failing on unknown names.
    #[serde(default)]
    pub allow_filtration_fallback: bool,
    /// Coefficient field order.
    #[serde(default = "default_coeff")]
    pub coeff: i64,
    /// Column size limit; zero or negative means exact.
    #[serde(default = "default_approximation")]
    pub approximation: i64,
    /// Exponent for `pmean` and `pmoment`.
    #[serde(default = "default_exponent")]
    pub exponent: f64,
    /// Threshold for `remove_edges`.
    #[serde(default)]
    pub edge_threshold: Option<f64>,
    /// Optional cap on stored simplices.
    #[serde(default)]
    pub max_cells: Option<usize>,
}

/// Upper dimension as written in a configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum MaxDimension {
    /// A concrete bound.
    Finite(i64),
    /// A float, accepted only as `.inf`.
    Float(f64),
    /// The literal `inf`.
    Named(String),
    /// No bound given.
    #[default]
    Unset,
}

fn default_directed() -> bool {
    true
}

fn default_filtration() -> String {
    FiltrationKind::Max.name().to_string()
}

fn default_coeff() -> i64 {
    2
}

fn default_approximation() -> i64 {
    -1
}

fn default_exponent() -> f64 {
    FiltrationOptions::default().exponent
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            min_dimension: 0,
            max_dimension: MaxDimension::Unset,
            directed: default_directed(),
            filtration: default_filtration(),
            allow_filtration_fallback: false,
            coeff: default_coeff(),
            approximation: default_approximation(),
            exponent: default_exponent(),
            edge_threshold: None,
            max_cells: None,
        }
    }
}

impl RunConfig {
    /// Reads a configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self, FlagserError> {
        let text =
            fs::read_to_string(path).map_err(|err| FlagserError::io("read-config", path.display(), err))?;
        Self::from_yaml(&text)
    }

    /// Parses a configuration from YAML text.
    pub fn from_yaml(text: &str) -> Result<Self, FlagserError> {
        serde_yaml::from_str(text)
            .map_err(|err| FlagserError::Serde(ErrorInfo::new("parse-config", err.to_string())))
    }

    /// Validates the configuration into typed parameters.
    pub fn into_params(self) -> Result<FlagserParams, FlagserError> {
        let min_dimension = usize::try_from(self.min_dimension).map_err(|_| {
            FlagserError::InvalidParameter(
                ErrorInfo::new("negative-dimension", "min_dimension must be non-negative")
                    .with_parameter("min_dimension", self.min_dimension),
            )
        })?;
        let max_dimension = match &self.max_dimension {
            MaxDimension::Unset => DimensionBound::Unbounded,
            MaxDimension::Named(name) if is_infinity(name) => DimensionBound::Unbounded,
            MaxDimension::Float(value) if *value == f64::INFINITY => DimensionBound::Unbounded,
            MaxDimension::Float(value) => {
                return Err(FlagserError::InvalidParameter(
                    ErrorInfo::new("invalid-dimension", "max_dimension must be an integer or inf")
                        .with_parameter("max_dimension", value),
                ))
            }
            MaxDimension::Named(name) => {
                return Err(FlagserError::InvalidParameter(
                    ErrorInfo::new("invalid-dimension", "max_dimension must be an integer or inf")
                        .with_parameter("max_dimension", name),
                ))
            }
            MaxDimension::Finite(value) => {
                DimensionBound::AtMost(usize::try_from(*value).map_err(|_| {
                    FlagserError::InvalidParameter(
                        ErrorInfo::new("negative-dimension", "max_dimension must be non-negative")
                            .with_parameter("max_dimension", value),
                    )
                })?)
            }
        };
        let coeff = u32::try_from(self.coeff).map_err(|_| {
            FlagserError::InvalidParameter(
                ErrorInfo::new("non-prime-coefficient", "coefficient must be a prime that fits in 32 bits")
                    .with_parameter("coeff", self.coeff),
            )
        })?;
        let filtration = FiltrationKind::resolve(&self.filtration, self.allow_filtration_fallback)?;
        let params = FlagserParams {
            min_dimension,
            max_dimension,
            directed: self.directed,
            filtration,
            filtration_options: FiltrationOptions {
                exponent: self.exponent,
                edge_threshold: self.edge_threshold.unwrap_or(f64::INFINITY),
            },
            coeff,
            approximation: Approximation::from_raw(self.approximation),
            limits: ResourceLimits {
                max_cells: self.max_cells,
            },
        };
        params.validate()?;
        Ok(params)
    }
}

fn is_infinity(name: &str) -> bool {
    matches!(name.to_ascii_lowercase().as_str(), "inf" | ".inf" | "infinity")
}
