//! Wheel/drag panning in the ground plane.
//!
//! A pan moves eye and target by the same horizontal offset, so the camera
//! keeps its pitch, heading and distance. The offset is expressed in
//! view-aligned axes: `dy` moves along the camera's horizontal heading and
//! `dx` moves across it. Both are negated so that scrolling down pulls the
//! view backward (natural scrolling).

use std::f64::consts::FRAC_PI_2;

use foundation::math::Vec3;
use thiserror::Error;
use tracing::debug;

use crate::view::ViewState;

/// Heading used when the camera looks straight up or down.
pub const FALLBACK_FORWARD: Vec3 = Vec3::Y;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum InputError {
    #[error("pan delta ({dx}, {dy}) is not finite")]
    NonFiniteDelta { dx: f64, dy: f64 },
    #[error("pan delta ({dx}, {dy}) moves the view out of range")]
    ViewOverflow { dx: f64, dy: f64 },
}

/// Validated 2D pointer delta in screen units.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PanDelta {
    dx: f64,
    dy: f64,
}

impl PanDelta {
    pub fn new(dx: f64, dy: f64) -> Result<Self, InputError> {
        if !dx.is_finite() || !dy.is_finite() {
            return Err(InputError::NonFiniteDelta { dx, dy });
        }
        Ok(Self { dx, dy })
    }

    pub fn dx(&self) -> f64 {
        self.dx
    }

    pub fn dy(&self) -> f64 {
        self.dy
    }
}

/// Horizontal camera basis used for panning.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PanAxes {
    /// Unit heading in the ground plane (z = 0).
    pub forward: Vec3,
    /// `forward` turned a quarter turn counter-clockwise about +z.
    pub sideways: Vec3,
}

impl PanAxes {
    pub fn for_view(view: &ViewState) -> Self {
        let forward = (view.target - view.eye)
            .with_z(0.0)
            .normalize()
            .unwrap_or_else(|| {
                debug!(
                    eye = ?view.eye,
                    target = ?view.target,
                    "view has no horizontal heading; panning along +y"
                );
                FALLBACK_FORWARD
            });

        Self {
            forward,
            sideways: forward.rotate_z(FRAC_PI_2),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PanController {
    /// World units moved per unit of pointer delta.
    pub speed: f64,
}

impl PanController {
    pub fn new(speed: f64) -> Self {
        Self { speed }
    }

    /// World-space offset applied to both eye and target. Always has z = 0.
    pub fn translation(&self, view: &ViewState, delta: PanDelta) -> Vec3 {
        let axes = PanAxes::for_view(view);
        axes.forward * (-delta.dy * self.speed) + axes.sideways * (-delta.dx * self.speed)
    }

    /// Returns the panned view. The field of view is carried over unchanged.
    ///
    /// Fails instead of returning a view with infinite coordinates when the
    /// scaled delta overflows.
    pub fn pan(&self, view: &ViewState, delta: PanDelta) -> Result<ViewState, InputError> {
        let panned = view.translated(self.translation(view, delta));
        if !(panned.eye.is_finite() && panned.target.is_finite()) {
            return Err(InputError::ViewOverflow {
                dx: delta.dx,
                dy: delta.dy,
            });
        }
        Ok(panned)
    }
}

impl Default for PanController {
    fn default() -> Self {
        Self { speed: 1.0 }
    }
}
