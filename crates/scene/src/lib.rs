pub mod pan;
pub mod picking;
pub mod projection;
pub mod view;

pub use pan::{InputError, PanController, PanDelta};
pub use picking::{HitRegion, InteractionSurface, PickHit, Ray};
pub use projection::{Projection, ProjectionError};
pub use view::{ViewError, ViewState};
