/// Frame metadata handed to the renderer on every drawn frame.
///
/// Ticks come from an external scheduler (display refresh, timer), so the
/// delta between frames is supplied by the caller rather than fixed.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame {
    /// 0-based index of drawn frames.
    pub index: u64,
    /// Time since the previous drawn frame (seconds).
    pub dt_s: f64,
    /// Accumulated time over all drawn frames (seconds).
    pub elapsed_s: f64,
}

impl Frame {
    pub fn first() -> Self {
        Self {
            index: 0,
            dt_s: 0.0,
            elapsed_s: 0.0,
        }
    }

    /// Successor frame. Negative or non-finite deltas count as zero.
    pub fn next(self, dt_s: f64) -> Self {
        let dt_s = if dt_s.is_finite() { dt_s.max(0.0) } else { 0.0 };
        Self {
            index: self.index + 1,
            dt_s,
            elapsed_s: self.elapsed_s + dt_s,
        }
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::first()
    }
}
