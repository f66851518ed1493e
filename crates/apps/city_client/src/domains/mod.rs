//! Domain adapters shipped with the client, one per subsystem.

pub mod debug;
pub mod land_use;
pub mod planning;
pub mod transport;

use layers::SceneCompositor;

use crate::state::AppState;

/// Compositor with all four domain adapters registered.
pub fn standard_compositor() -> SceneCompositor<AppState> {
    SceneCompositor::new()
        .with_adapter(transport::TransportAdapter)
        .with_adapter(planning::PlanningAdapter)
        .with_adapter(land_use::LandUseAdapter)
        .with_adapter(debug::DebugAdapter)
}
