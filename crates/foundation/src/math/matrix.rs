use super::Vec3;

/// Column-major 4x4 matrix (`cols[c][r]`), OpenGL conventions.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Mat4 {
    pub cols: [[f64; 4]; 4],
}

impl Mat4 {
    pub const IDENTITY: Self = Self {
        cols: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    /// Right-handed view matrix looking from `eye` toward `target`.
    ///
    /// Returns `None` when `eye == target` or the view direction is parallel
    /// to `up`.
    pub fn look_at_rh(eye: Vec3, target: Vec3, up: Vec3) -> Option<Self> {
        let f = (target - eye).normalize()?;
        let s = f.cross(up).normalize()?;
        let u = s.cross(f);

        Some(Self {
            cols: [
                [s.x, u.x, -f.x, 0.0],
                [s.y, u.y, -f.y, 0.0],
                [s.z, u.z, -f.z, 0.0],
                [-s.dot(eye), -u.dot(eye), f.dot(eye), 1.0],
            ],
        })
    }

    /// Perspective projection with clip-space depth in [-1, 1].
    pub fn perspective_rh_gl(fov_y_rad: f64, aspect: f64, near: f64, far: f64) -> Self {
        let f = 1.0 / (0.5 * fov_y_rad).tan();
        let nf = 1.0 / (near - far);

        Self {
            cols: [
                [f / aspect, 0.0, 0.0, 0.0],
                [0.0, f, 0.0, 0.0],
                [0.0, 0.0, (far + near) * nf, -1.0],
                [0.0, 0.0, 2.0 * far * near * nf, 0.0],
            ],
        }
    }

    pub fn mul(&self, other: &Self) -> Self {
        let mut cols = [[0.0f64; 4]; 4];
        for (c, col) in cols.iter_mut().enumerate() {
            for (r, v) in col.iter_mut().enumerate() {
                *v = (0..4).map(|k| self.cols[k][r] * other.cols[c][k]).sum();
            }
        }
        Self { cols }
    }

    /// Transforms a point (w = 1) and returns the homogeneous result.
    pub fn transform_point(&self, p: Vec3) -> [f64; 4] {
        let v = [p.x, p.y, p.z, 1.0];
        let mut out = [0.0f64; 4];
        for (r, o) in out.iter_mut().enumerate() {
            *o = (0..4).map(|c| self.cols[c][r] * v[c]).sum();
        }
        out
    }

    pub fn to_cols_f32(&self) -> [[f32; 4]; 4] {
        self.cols.map(|col| col.map(|v| v as f32))
    }

    pub fn is_finite(&self) -> bool {
        self.cols.iter().flatten().all(|v| v.is_finite())
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}
