pub mod atom;
pub mod duplicates;
pub mod geometry;
pub mod lookup;
