/// Drawable surface size in device-independent pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True when either side is zero, negative or not a number.
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// `width / height`, or `None` for an empty viewport.
    pub fn aspect(&self) -> Option<f64> {
        if self.is_empty() || !self.width.is_finite() || !self.height.is_finite() {
            return None;
        }
        Some(self.width / self.height)
    }
}
