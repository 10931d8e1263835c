#![deny(missing_docs)]
#![doc = "Boundary matrices over prime fields, column reduction and the persistent homology pipeline of the flagser engine."]

pub mod boundary;
pub mod column;
pub mod field;
pub mod pipeline;
pub mod reduction;

pub use boundary::BoundaryMatrix;
pub use column::SparseColumn;
pub use field::PrimeField;
pub use pipeline::{compute_homology, compute_homology_from_matrix, count_cells};
pub use reduction::{reduce, ColumnOutcome, Reduction};
