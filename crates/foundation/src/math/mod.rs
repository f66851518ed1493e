pub mod matrix;
pub mod vec;

pub use matrix::*;
pub use vec::*;
