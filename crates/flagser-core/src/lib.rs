#![deny(missing_docs)]
#![doc = "Error taxonomy, parameters, named filtrations and result types shared by the flagser crates."]

pub mod config;
pub mod errors;
pub mod filtration;
pub mod params;
pub mod result;

pub use config::{MaxDimension, RunConfig};
pub use errors::{ErrorInfo, FlagserError};
pub use filtration::{FiltrationKind, FiltrationOptions, IMPLEMENTED_FILTRATIONS};
pub use params::{is_prime, Approximation, DimensionBound, FlagserParams, ResourceLimits};
pub use result::{DimensionSummary, HomologyResult, PersistenceDiagram, PersistencePair};
