use runtime::{RenderSwitch, RenderingState};
use scene::ViewState;

use crate::domains::debug::DebugState;
use crate::domains::land_use::LandUseState;
use crate::domains::planning::PlanningState;
use crate::domains::transport::TransportState;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum UiMode {
    #[default]
    Main,
    /// Planning tools are shown (proposal actions, control points).
    Planning,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SystemState {
    /// Last networking turn summary reported by the engine.
    pub networking_turns: String,
}

/// Whole client state. Replaced wholesale on every change.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    pub planning: PlanningState,
    pub transport: TransportState,
    pub land_use: LandUseState,
    pub debug: DebugState,
    pub ui_mode: UiMode,
    pub system: SystemState,
    pub rendering: RenderingState,
    pub view: ViewState,
}

impl AppState {
    /// Every domain at its initial state, looking through `view`.
    pub fn new(view: ViewState, rendering: RenderingState) -> Self {
        Self {
            view,
            rendering,
            ..Self::default()
        }
    }

    pub fn with_view(&self, view: ViewState) -> Self {
        Self {
            view,
            ..self.clone()
        }
    }

    pub fn with_rendering(&self, rendering: RenderingState) -> Self {
        Self {
            rendering,
            ..self.clone()
        }
    }

    pub fn with_ui_mode(&self, ui_mode: UiMode) -> Self {
        Self {
            ui_mode,
            ..self.clone()
        }
    }
}

impl RenderSwitch for AppState {
    fn rendering_enabled(&self) -> bool {
        self.rendering.enabled
    }
}
