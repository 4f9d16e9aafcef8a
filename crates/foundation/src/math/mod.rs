pub mod mat3;
pub mod precision;
pub mod vec;

pub use mat3::*;
pub use precision::*;
pub use vec::*;
