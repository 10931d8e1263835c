//! Strongly typed parameters accepted by the homology pipeline.

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, FlagserError};
use crate::filtration::{FiltrationKind, FiltrationOptions};

/// Upper bound on the dimensions that are enumerated and reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DimensionBound {
    /// Enumerate the whole complex.
    #[default]
    Unbounded,
    /// Report dimensions up to and including the given value.
    AtMost(usize),
}

impl DimensionBound {
    /// Returns the bound as an optional dimension.
    pub fn limit(&self) -> Option<usize> {
        match self {
            DimensionBound::Unbounded => None,
            DimensionBound::AtMost(dim) => Some(*dim),
        }
    }
}

/// Column size policy applied during boundary-matrix reduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Approximation {
    /// Every column is fully reduced.
    #[default]
    Exact,
    /// Columns holding more entries than the limit are skipped.
    Bounded(usize),
}

impl Approximation {
    /// Normalizes the signed knob used by keyword configurations.
    ///
    /// Zero and negative values mean exact computation.
    pub fn from_raw(raw: i64) -> Self {
        if raw <= 0 {
            Approximation::Exact
        } else {
            Approximation::Bounded(raw as usize)
        }
    }

    /// Returns the column size limit, if any.
    pub fn limit(&self) -> Option<usize> {
        match self {
            Approximation::Exact => None,
            Approximation::Bounded(limit) => Some(*limit),
        }
    }
}

/// Explicit memory bounds for enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ResourceLimits {
    /// Maximum number of simplices stored across all dimensions.
    pub max_cells: Option<usize>,
}

/// Full parameter set for a homology computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlagserParams {
    /// Lowest reported homology dimension.
    pub min_dimension: usize,
    /// Highest reported homology dimension.
    pub max_dimension: DimensionBound,
    /// Whether the directed flag complex is computed.
    pub directed: bool,
    /// Filtration algorithm.
    pub filtration: FiltrationKind,
    /// Options for the parametrised filtrations.
    pub filtration_options: FiltrationOptions,
    /// Prime characteristic of the coefficient field.
    pub coeff: u32,
    /// Column skipping policy.
    pub approximation: Approximation,
    /// Memory bounds.
    pub limits: ResourceLimits,
}

impl Default for FlagserParams {
    fn default() -> Self {
        Self {
            min_dimension: 0,
            max_dimension: DimensionBound::Unbounded,
            directed: true,
            filtration: FiltrationKind::Max,
            filtration_options: FiltrationOptions::default(),
            coeff: 2,
            approximation: Approximation::Exact,
            limits: ResourceLimits::default(),
        }
    }
}

impl FlagserParams {
    /// Checks every parameter before any computation starts.
    pub fn validate(&self) -> Result<(), FlagserError> {
        if let DimensionBound::AtMost(max) = self.max_dimension {
            if max < self.min_dimension {
                return Err(FlagserError::InvalidParameter(
                    ErrorInfo::new(
                        "dimension-bounds",
                        "max_dimension must be at least min_dimension",
                    )
                    .with_parameter("max_dimension", max)
                    .with_context("min_dimension", self.min_dimension.to_string()),
                ));
            }
        }
        if !is_prime(self.coeff) {
            return Err(FlagserError::InvalidParameter(
                ErrorInfo::new("non-prime-coefficient", "coefficient field order must be prime")
                    .with_parameter("coeff", self.coeff)
                    .with_hint("use a prime such as 2, 3 or 5"),
            ));
        }
        if self.limits.max_cells == Some(0) {
            return Err(FlagserError::InvalidParameter(
                ErrorInfo::new("empty-cell-budget", "max_cells must be positive when set")
                    .with_parameter("max_cells", 0),
            ));
        }
        self.filtration_options.validate()
    }

    /// Highest dimension that has to be enumerated to report every requested dimension.
    ///
    /// One dimension above the reported window is needed so deaths are known.
    pub fn enumeration_limit(&self) -> Option<usize> {
        self.max_dimension.limit().map(|max| max.saturating_add(1))
    }
}

/// Deterministic trial-division primality test.
pub fn is_prime(value: u32) -> bool {
    if value < 2 {
        return false;
    }
    if value < 4 {
        return true;
    }
    if value % 2 == 0 {
        return false;
    }
    let value = u64::from(value);
    let mut divisor = 3u64;
    while divisor * divisor <= value {
        if value % divisor == 0 {
            return false;
        }
        divisor += 2;
    }
    true
}
