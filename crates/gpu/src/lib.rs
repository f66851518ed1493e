pub mod driver;
pub mod renderer;

pub use driver::*;
pub use renderer::*;
