/// Read access to the process-wide rendering switch.
///
/// The shell passes its application state to the frame driver through this
/// trait instead of publishing it as an ambient global.
pub trait RenderSwitch {
    fn rendering_enabled(&self) -> bool;
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RenderingState {
    pub enabled: bool,
}

impl RenderingState {
    pub fn toggled(self) -> Self {
        Self {
            enabled: !self.enabled,
        }
    }
}

impl Default for RenderingState {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl RenderSwitch for RenderingState {
    fn rendering_enabled(&self) -> bool {
        self.enabled
    }
}

impl RenderSwitch for bool {
    fn rendering_enabled(&self) -> bool {
        *self
    }
}

#[cfg(test)]
mod tests {
    use super::{RenderSwitch, RenderingState};

    #[test]
    fn rendering_is_on_by_default() {
        assert!(RenderingState::default().rendering_enabled());
    }

    #[test]
    fn toggled_flips_without_touching_original() {
        let on = RenderingState::default();
        let off = on.toggled();
        assert!(on.enabled);
        assert!(!off.rendering_enabled());
    }
}
