use runtime::{Frame, RenderSwitch};
use scene::ProjectionError;
use tracing::{debug, trace};

use crate::renderer::{FrameInputs, RenderBackend};

#[derive(Debug, Clone, PartialEq)]
pub enum FrameOutcome {
    Rendered(Frame),
    /// Rendering is switched off; the backend was not called.
    Disabled,
    /// Frame inputs could not be built; the backend was not called.
    Skipped(ProjectionError),
}

/// Per-tick entry point invoked by the external frame scheduler.
///
/// Frame indices count drawn frames only. Time from disabled or skipped
/// ticks is carried into the next drawn frame's delta.
#[derive(Debug, Default)]
pub struct FrameDriver {
    last: Option<Frame>,
    pending_dt_s: f64,
    skipped: u64,
}

impl FrameDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames_rendered(&self) -> u64 {
        self.last.map_or(0, |f| f.index + 1)
    }

    pub fn frames_skipped(&self) -> u64 {
        self.skipped
    }

    pub fn last_frame(&self) -> Option<Frame> {
        self.last
    }

    /// Advances one tick: if `ctx` has rendering enabled, builds the frame
    /// inputs and hands them to `backend`; otherwise does nothing.
    pub fn advance<C, B, F>(
        &mut self,
        ctx: &C,
        backend: &mut B,
        dt_s: f64,
        build: F,
    ) -> FrameOutcome
    where
        C: RenderSwitch + ?Sized,
        B: RenderBackend + ?Sized,
        F: FnOnce(Frame) -> Result<FrameInputs, ProjectionError>,
    {
        if dt_s.is_finite() && dt_s > 0.0 {
            self.pending_dt_s += dt_s;
        }

        if !ctx.rendering_enabled() {
            trace!("rendering disabled; tick dropped");
            return FrameOutcome::Disabled;
        }

        let frame = match self.last {
            None => Frame::first(),
            Some(prev) => prev.next(self.pending_dt_s),
        };

        match build(frame) {
            Ok(inputs) => {
                backend.render_frame(&inputs);
                self.last = Some(frame);
                self.pending_dt_s = 0.0;
                FrameOutcome::Rendered(frame)
            }
            Err(err) => {
                self.skipped += 1;
                debug!(%err, "frame skipped");
                FrameOutcome::Skipped(err)
            }
        }
    }
}
