#![deny(missing_docs)]
#![doc = "Flag-complex enumeration, cell counting and filtration assignment for the flagser engine."]

mod arena;
pub mod enumerate;
pub mod filtration;

pub use arena::SimplexArena;
pub use enumerate::{
    count_simplices, enumerate_complex, euler_characteristic, for_each_simplex, FlagComplex,
};
pub use filtration::assign_filtration;
