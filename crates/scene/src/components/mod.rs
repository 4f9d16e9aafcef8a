pub mod material;
pub mod shape;
pub mod transform;

pub use material::*;
pub use shape::*;
pub use transform::*;
