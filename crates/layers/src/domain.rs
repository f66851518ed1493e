use std::fmt;

use runtime::Updates;

use crate::interactable::{Interactable, InteractableId};
use crate::layer::Layer;
use crate::ui::UiElement;

/// The four subsystems that contribute to a frame.
///
/// Declaration order is the compositing precedence: later domains draw on
/// top of earlier ones, so debug output always ends up above everything.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Domain {
    Transport,
    Planning,
    LandUse,
    Debug,
}

impl Domain {
    pub const PRECEDENCE: [Domain; 4] = [
        Domain::Transport,
        Domain::Planning,
        Domain::LandUse,
        Domain::Debug,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Domain::Transport => "transport",
            Domain::Planning => "planning",
            Domain::LandUse => "land-use",
            Domain::Debug => "debug",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Everything one adapter contributes to a frame, each part in draw order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DomainOutput {
    layers: Vec<Layer>,
    interactables: Vec<Interactable>,
    ui_elements: Vec<UiElement>,
}

impl DomainOutput {
    pub fn new(
        layers: Vec<Layer>,
        interactables: Vec<Interactable>,
        ui_elements: Vec<UiElement>,
    ) -> Self {
        Self {
            layers,
            interactables,
            ui_elements,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn interactables(&self) -> &[Interactable] {
        &self.interactables
    }

    pub fn ui_elements(&self) -> &[UiElement] {
        &self.ui_elements
    }

    pub fn push_layer(&mut self, layer: Layer) {
        self.layers.push(layer);
    }

    pub fn push_interactable(&mut self, interactable: Interactable) {
        self.interactables.push(interactable);
    }

    pub fn push_ui_element(&mut self, element: UiElement) {
        self.ui_elements.push(element);
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty() && self.interactables.is_empty() && self.ui_elements.is_empty()
    }

    pub fn into_parts(self) -> (Vec<Layer>, Vec<Interactable>, Vec<UiElement>) {
        (self.layers, self.interactables, self.ui_elements)
    }
}

/// Per-domain translation of application state into frame contributions.
///
/// Contract for implementors:
/// - `render` reads `state` only for the duration of the call.
/// - State changes are requested exclusively through `updates`, as
///   functions from the old state to a new one; `state` is never mutated.
/// - Adapters share no mutable scratch space, so the compositor may call
///   them in any order.
pub trait DomainAdapter<S> {
    fn domain(&self) -> Domain;

    fn render(&self, state: &S, updates: &Updates<S>) -> DomainOutput;

    /// Called when the pointer lands on one of this adapter's interactables.
    fn interact(&self, id: InteractableId, state: &S, updates: &Updates<S>) {
        let _ = (id, state, updates);
    }
}
