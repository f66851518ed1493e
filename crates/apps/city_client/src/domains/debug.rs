use foundation::math::Vec3;
use layers::{Domain, DomainAdapter, DomainOutput, Instance, Layer, UiElement};
use runtime::Updates;

use crate::colors;
use crate::state::AppState;

pub const AXES_LAYER: u64 = 400;
pub const AXIS_LENGTH: f64 = 10.0;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DebugState {
    pub show_axes: bool,
    pub show_view: bool,
    pub messages: Vec<String>,
}

pub struct DebugAdapter;

impl DomainAdapter<AppState> for DebugAdapter {
    fn domain(&self) -> Domain {
        Domain::Debug
    }

    fn render(&self, state: &AppState, _updates: &Updates<AppState>) -> DomainOutput {
        let debug = &state.debug;
        let mut out = DomainOutput::empty();

        if debug.show_axes {
            out.push_layer(Layer::new(AXES_LAYER, Domain::Debug, "DebugAxes").with_instances([
                Instance::new(Vec3::X * AXIS_LENGTH, [1.0, 0.0], colors::AXIS_X),
                Instance::new(Vec3::Y * AXIS_LENGTH, [0.0, 1.0], colors::AXIS_Y),
                Instance::at(Vec3::Z * AXIS_LENGTH, colors::AXIS_Z),
            ]));
        }

        if debug.show_view {
            let view = state.view;
            out.push_ui_element(UiElement::label(
                "debug.view",
                Domain::Debug,
                format!(
                    "eye ({:.1}, {:.1}, {:.1}) target ({:.1}, {:.1}, {:.1})",
                    view.eye.x, view.eye.y, view.eye.z, view.target.x, view.target.y, view.target.z
                ),
            ));
        }
        if !state.system.networking_turns.is_empty() {
            out.push_ui_element(UiElement::label(
                "debug.networking",
                Domain::Debug,
                state.system.networking_turns.clone(),
            ));
        }
        for (i, message) in debug.messages.iter().enumerate() {
            out.push_ui_element(UiElement::label(
                format!("debug.message.{i}"),
                Domain::Debug,
                message.clone(),
            ));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::{AXES_LAYER, DebugAdapter, DebugState};
    use crate::state::AppState;
    use layers::{DomainAdapter, LayerId, UiElementKind};
    use pretty_assertions::assert_eq;
    use runtime::Updates;

    #[test]
    fn initial_state_contributes_nothing() {
        let out = DebugAdapter.render(&AppState::default(), &Updates::new());
        assert!(out.is_empty());
    }

    #[test]
    fn axes_and_messages() {
        let state = AppState {
            debug: DebugState {
                show_axes: true,
                show_view: true,
                messages: vec!["hello".to_string()],
            },
            ..AppState::default()
        };
        let out = DebugAdapter.render(&state, &Updates::new());

        assert_eq!(out.layers()[0].id, LayerId(AXES_LAYER));
        assert_eq!(out.layers()[0].instances.len(), 3);
        assert!(out.interactables().is_empty());

        let keys: Vec<&str> = out.ui_elements().iter().map(|u| u.key.as_str()).collect();
        assert_eq!(keys, vec!["debug.view", "debug.message.0"]);
        assert_eq!(
            out.ui_elements()[0].kind,
            UiElementKind::Label {
                text: "eye (-150.0, -150.0, 150.0) target (0.0, 0.0, 0.0)".to_string()
            }
        );
    }
}
