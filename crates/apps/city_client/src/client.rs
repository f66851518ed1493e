use foundation::Viewport;
use gpu::{FrameDriver, FrameInputs, FrameOutcome, RenderBackend};
use layers::{ComposedScene, Domain, Interactable, InteractableId, SceneCompositor, UiElement};
use runtime::{RenderingState, Updates};
use scene::{InteractionSurface, PanController, PanDelta, Projection, ViewState};
use tracing::{debug, info, warn};

use crate::config::{ConfigError, ViewerConfig};
use crate::domains;
use crate::state::AppState;

/// Result of handing a wheel event to the client.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct WheelOutcome {
    /// The host should suppress its default scroll behavior.
    pub consumed: bool,
    /// The view actually moved.
    pub panned: bool,
}

/// Top-level viewer shell.
///
/// Owns the application state and wires the domain adapters, the pan
/// controller, the interaction surface and the frame driver together. All
/// state changes go through the update queue and are applied at the end of
/// each handler.
pub struct CityClient {
    state: AppState,
    updates: Updates<AppState>,
    compositor: SceneCompositor<AppState>,
    scene: ComposedScene,
    surface: InteractionSurface<Interactable>,
    pan: PanController,
    driver: FrameDriver,
    viewport: Viewport,
    clear_color: [f32; 4],
    retina_factor: f64,
}

impl CityClient {
    pub fn new(
        state: AppState,
        compositor: SceneCompositor<AppState>,
        viewport: Viewport,
    ) -> Self {
        let defaults = ViewerConfig::default();
        let surface = InteractionSurface::new(viewport, state.view);
        Self {
            state,
            updates: Updates::new(),
            compositor,
            scene: ComposedScene::default(),
            surface,
            pan: PanController::new(defaults.pan_speed),
            driver: FrameDriver::new(),
            viewport,
            clear_color: defaults.clear_color,
            retina_factor: defaults.retina_factor,
        }
    }

    /// Client with the standard domain adapters and every domain at its
    /// initial state.
    pub fn from_config(config: &ViewerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let state = AppState::new(
            config.view_state()?,
            RenderingState {
                enabled: config.rendering_enabled,
            },
        );
        let mut client = Self::new(state, domains::standard_compositor(), config.viewport());
        client.pan = PanController::new(config.pan_speed);
        client.clear_color = config.clear_color;
        client.retina_factor = config.retina_factor;
        info!(
            width = client.viewport.width,
            height = client.viewport.height,
            rendering = config.rendering_enabled,
            "client ready"
        );
        Ok(client)
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn view(&self) -> ViewState {
        self.state.view
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Scene from the most recent `on_frame` or `refresh`.
    pub fn scene(&self) -> &ComposedScene {
        &self.scene
    }

    /// UI elements the host should draw over the frame.
    pub fn overlay(&self) -> &[UiElement] {
        &self.scene.ui_elements
    }

    pub fn frames_rendered(&self) -> u64 {
        self.driver.frames_rendered()
    }

    pub fn frames_skipped(&self) -> u64 {
        self.driver.frames_skipped()
    }

    /// Merges every adapter's contribution for the current state.
    pub fn compose(&self) -> ComposedScene {
        self.compositor.compose(&self.state, &self.updates)
    }

    /// Recomposes the scene and hands the new interactables to the
    /// interaction surface.
    pub fn refresh(&mut self) -> &ComposedScene {
        self.scene = self.compose();
        self.surface.refresh(
            self.scene.interactables.clone(),
            self.viewport,
            self.state.view,
        );
        &self.scene
    }

    /// Pans the view. Always consumed so the host page does not scroll;
    /// non-finite deltas and pans that would overflow the view are dropped.
    pub fn on_wheel(&mut self, dx: f64, dy: f64) -> WheelOutcome {
        let panned =
            PanDelta::new(dx, dy).and_then(|delta| self.pan.pan(&self.state.view, delta));
        let view = match panned {
            Ok(view) => view,
            Err(err) => {
                warn!(%err, "wheel event dropped");
                return WheelOutcome {
                    consumed: true,
                    panned: false,
                };
            }
        };
        self.updates.schedule(move |s: &AppState| s.with_view(view));
        self.apply_updates();
        WheelOutcome {
            consumed: true,
            panned: true,
        }
    }

    pub fn on_resize(&mut self, width: f64, height: f64) {
        let clamp = |v: f64| if v.is_finite() { v.max(0.0) } else { 0.0 };
        self.viewport = Viewport::new(clamp(width), clamp(height));
        self.surface.set_camera(self.viewport, self.state.view);
        debug!(
            width = self.viewport.width,
            height = self.viewport.height,
            "viewport resized"
        );
    }

    /// Routes a pointer press to the domain owning the first interactable
    /// under `(x_px, y_px)`.
    pub fn on_pointer_down(&mut self, x_px: f64, y_px: f64) -> Option<(Domain, InteractableId)> {
        if !(x_px.is_finite() && y_px.is_finite()) {
            warn!(x_px, y_px, "pointer event dropped");
            return None;
        }
        let (domain, id) = {
            let hit = self.surface.pick(x_px, y_px)?;
            debug!(
                domain = %hit.region.domain,
                id = hit.region.id.0,
                distance = hit.distance,
                "pointer hit"
            );
            (hit.region.domain, hit.region.id)
        };
        self.compositor.route(domain, id, &self.state, &self.updates);
        self.apply_updates();
        Some((domain, id))
    }

    /// One tick of the external frame scheduler.
    ///
    /// The scene is recomposed every tick; the backend is only called when
    /// rendering is enabled and the projection can be built.
    pub fn on_frame<B>(&mut self, backend: &mut B, dt_s: f64) -> FrameOutcome
    where
        B: RenderBackend + ?Sized,
    {
        self.refresh();

        let view = self.state.view;
        let viewport = self.viewport;
        let clear_color = self.clear_color;
        let retina_factor = self.retina_factor;
        let layers = &self.scene.layers;
        let outcome = self.driver.advance(&self.state, backend, dt_s, |frame| {
            let projection = Projection::build(&view, viewport)?;
            Ok(FrameInputs::new(
                frame,
                layers.clone(),
                viewport,
                &projection,
                clear_color,
                retina_factor,
            ))
        });

        self.apply_updates();
        outcome
    }

    /// Drains the update queue into a new state. Returns how many updates
    /// were applied.
    ///
    /// The interaction surface follows the new camera right away; its
    /// regions are only replaced on the next `refresh`.
    pub fn apply_updates(&mut self) -> usize {
        let pending = self.updates.len();
        if pending > 0 {
            let current = std::mem::take(&mut self.state);
            self.state = self.updates.apply(current);
            self.surface.set_camera(self.viewport, self.state.view);
        }
        pending
    }

    /// Schedules an arbitrary state transition, e.g. one pushed by the
    /// simulation, and applies it.
    pub fn update(&mut self, f: impl FnOnce(&AppState) -> AppState + 'static) {
        self.updates.schedule(f);
        self.apply_updates();
    }

    pub fn set_rendering_enabled(&mut self, enabled: bool) {
        self.update(move |s| s.with_rendering(RenderingState { enabled }));
    }

    pub fn toggle_rendering(&mut self) -> bool {
        self.update(|s| s.with_rendering(s.rendering.toggled()));
        self.state.rendering.enabled
    }
}

impl std::fmt::Debug for CityClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CityClient")
            .field("view", &self.state.view)
            .field("viewport", &self.viewport)
            .field("compositor", &self.compositor)
            .field("frames_rendered", &self.driver.frames_rendered())
            .finish_non_exhaustive()
    }
}
