use std::f64::consts::PI;

use foundation::math::Vec3;
use thiserror::Error;

pub const DEFAULT_EYE: Vec3 = Vec3::new(-150.0, -150.0, 150.0);
pub const DEFAULT_TARGET: Vec3 = Vec3::new(0.0, 0.0, 0.0);
pub const DEFAULT_VERTICAL_FOV: f64 = 0.3 * PI;

/// Camera parameters defining the current viewpoint.
///
/// A `ViewState` is a plain value. It has no mutators: every change (panning,
/// config reload) produces a new value that replaces the old one wholesale.
/// `eye != target` is expected; the projection and pan code guard the
/// degenerate case instead of producing NaNs.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ViewState {
    pub eye: Vec3,
    pub target: Vec3,
    /// Vertical field of view in radians, expected in `(0, π)`.
    pub vertical_fov: f64,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ViewError {
    #[error("eye and target coincide at {0:?}")]
    EyeAtTarget(Vec3),
    #[error("view contains non-finite coordinates")]
    NonFinite,
    #[error("vertical field of view {0} is outside (0, pi)")]
    FovOutOfRange(f64),
}

impl ViewState {
    pub fn new(eye: Vec3, target: Vec3, vertical_fov: f64) -> Self {
        Self {
            eye,
            target,
            vertical_fov,
        }
    }

    /// Checked constructor for values coming from outside the process
    /// (configuration files, command line).
    pub fn try_new(eye: Vec3, target: Vec3, vertical_fov: f64) -> Result<Self, ViewError> {
        if !eye.is_finite() || !target.is_finite() || !vertical_fov.is_finite() {
            return Err(ViewError::NonFinite);
        }
        if eye == target {
            return Err(ViewError::EyeAtTarget(eye));
        }
        if !(vertical_fov > 0.0 && vertical_fov < PI) {
            return Err(ViewError::FovOutOfRange(vertical_fov));
        }
        Ok(Self::new(eye, target, vertical_fov))
    }

    pub fn distance(&self) -> f64 {
        (self.target - self.eye).length()
    }

    /// Unit view direction, `None` when eye and target coincide.
    pub fn forward(&self) -> Option<Vec3> {
        (self.target - self.eye).normalize()
    }

    /// Eye and target moved by the same offset; direction and distance kept.
    pub fn translated(&self, delta: Vec3) -> Self {
        Self {
            eye: self.eye + delta,
            target: self.target + delta,
            vertical_fov: self.vertical_fov,
        }
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(DEFAULT_EYE, DEFAULT_TARGET, DEFAULT_VERTICAL_FOV)
    }
}
