pub mod context;
pub mod frame;
pub mod updates;

pub use context::*;
pub use frame::*;
pub use updates::*;
