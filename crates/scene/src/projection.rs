use foundation::Viewport;
use foundation::math::{Mat4, Vec3};
use thiserror::Error;

use crate::view::ViewState;

pub const NEAR: f64 = 0.1;
pub const FAR: f64 = 50_000.0;
pub const WORLD_UP: Vec3 = Vec3::Z;

/// Up vector used when the camera looks straight along `WORLD_UP`.
const FALLBACK_UP: Vec3 = Vec3::Y;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ProjectionError {
    #[error("viewport {width}x{height} has no area")]
    EmptyViewport { width: f64, height: f64 },
    #[error("eye and target coincide or are not finite")]
    DegenerateView,
}

/// Camera matrices for one frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Projection {
    pub view: Mat4,
    pub perspective: Mat4,
    pub aspect: f64,
}

impl Projection {
    /// Derives the view and perspective matrices for `view` on `viewport`.
    ///
    /// An empty viewport (common during initial layout) is an error and the
    /// caller skips the frame. A camera looking straight down still renders:
    /// its up vector falls back to +y.
    pub fn build(view: &ViewState, viewport: Viewport) -> Result<Self, ProjectionError> {
        let aspect = viewport.aspect().ok_or(ProjectionError::EmptyViewport {
            width: viewport.width,
            height: viewport.height,
        })?;

        if !view.eye.is_finite() || !view.target.is_finite() {
            return Err(ProjectionError::DegenerateView);
        }

        let view_matrix = Mat4::look_at_rh(view.eye, view.target, WORLD_UP)
            .or_else(|| Mat4::look_at_rh(view.eye, view.target, FALLBACK_UP))
            .ok_or(ProjectionError::DegenerateView)?;

        Ok(Self {
            view: view_matrix,
            perspective: Mat4::perspective_rh_gl(view.vertical_fov, aspect, NEAR, FAR),
            aspect,
        })
    }

    pub fn view_projection(&self) -> Mat4 {
        self.perspective.mul(&self.view)
    }
}
