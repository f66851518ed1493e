pub mod compositor;
pub mod domain;
pub mod interactable;
pub mod layer;
pub mod ui;

pub use compositor::*;
pub use domain::*;
pub use interactable::*;
pub use layer::*;
pub use ui::*;
