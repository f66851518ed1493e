use foundation::Aabb3;
use foundation::math::Vec3;
use layers::{
    Domain, DomainAdapter, DomainOutput, Instance, Interactable, InteractableId, Layer, UiElement,
};
use runtime::Updates;
use tracing::debug;

use crate::colors;
use crate::state::{AppState, UiMode};

pub const GESTURE_DOTS_LAYER: u64 = 200;
pub const GESTURE_LINES_LAYER: u64 = 201;

/// Pick radius around a gesture control point, in meters.
pub const CONTROL_POINT_RADIUS: f64 = 3.0;
const POINT_INDEX_BITS: u32 = 16;

/// A planned road or zone outline, drawn through its control points.
#[derive(Debug, Clone, PartialEq)]
pub struct Gesture {
    pub id: u64,
    pub points: Vec<Vec3>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ControlPointRef {
    pub gesture: u64,
    pub index: usize,
}

impl ControlPointRef {
    /// Packs the reference into an interactable id. `None` when the index
    /// needs more than 16 bits or the gesture id more than 48.
    pub fn to_id(self) -> Option<u64> {
        let index = u64::try_from(self.index).ok()?;
        let gesture_bits = u64::BITS - POINT_INDEX_BITS;
        if index >> POINT_INDEX_BITS != 0 || self.gesture >> gesture_bits != 0 {
            return None;
        }
        Some((self.gesture << POINT_INDEX_BITS) | index)
    }

    pub fn from_id(id: InteractableId) -> Self {
        Self {
            gesture: id.0 >> POINT_INDEX_BITS,
            index: (id.0 & ((1 << POINT_INDEX_BITS) - 1)) as usize,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlanningState {
    pub gestures: Vec<Gesture>,
    pub current_proposal: u64,
    pub selected_point: Option<ControlPointRef>,
}

impl PlanningState {
    pub fn point(&self, at: ControlPointRef) -> Option<Vec3> {
        self.gestures
            .iter()
            .find(|g| g.id == at.gesture)
            .and_then(|g| g.points.get(at.index).copied())
    }
}

pub struct PlanningAdapter;

impl PlanningAdapter {
    fn dots(planning: &PlanningState) -> Layer {
        let dots = planning.gestures.iter().flat_map(|gesture| {
            gesture.points.iter().enumerate().map(move |(index, point)| {
                let this = ControlPointRef {
                    gesture: gesture.id,
                    index,
                };
                let color = if planning.selected_point == Some(this) {
                    colors::CONTROL_POINT_SELECTED
                } else {
                    colors::GESTURE_DOTS
                };
                Instance::at(*point, color)
            })
        });
        Layer::new(GESTURE_DOTS_LAYER, Domain::Planning, "PlanningGestureDots")
            .with_instances(dots)
    }

    /// One instance per segment, centered on it and facing along it.
    fn lines(planning: &PlanningState) -> Layer {
        let segments = planning.gestures.iter().flat_map(|gesture| {
            gesture.points.windows(2).map(|pair| {
                let direction = (pair[1] - pair[0])
                    .with_z(0.0)
                    .normalize()
                    .map_or([1.0, 0.0], |d| [d.x as f32, d.y as f32]);
                Instance::new((pair[0] + pair[1]) * 0.5, direction, colors::GESTURE_LINES)
            })
        });
        Layer::new(GESTURE_LINES_LAYER, Domain::Planning, "PlanningGestureLines")
            .decal()
            .with_instances(segments)
    }
}

impl DomainAdapter<AppState> for PlanningAdapter {
    fn domain(&self) -> Domain {
        Domain::Planning
    }

    fn render(&self, state: &AppState, _updates: &Updates<AppState>) -> DomainOutput {
        let planning = &state.planning;
        let mut out = DomainOutput::empty();
        out.push_layer(Self::dots(planning));
        out.push_layer(Self::lines(planning));

        let half = Vec3::new(CONTROL_POINT_RADIUS, CONTROL_POINT_RADIUS, 0.5);
        for gesture in &planning.gestures {
            for (index, point) in gesture.points.iter().enumerate() {
                let at = ControlPointRef {
                    gesture: gesture.id,
                    index,
                };
                let Some(id) = at.to_id() else {
                    debug!(
                        gesture = at.gesture,
                        index = at.index,
                        "control point id out of range; not pickable"
                    );
                    continue;
                };
                out.push_interactable(Interactable::new(
                    id,
                    Domain::Planning,
                    Aabb3::around(*point, half),
                ));
            }
        }

        out.push_ui_element(UiElement::label(
            "planning.proposal",
            Domain::Planning,
            format!("Proposal #{}", planning.current_proposal),
        ));
        if state.ui_mode == UiMode::Planning {
            out.push_ui_element(UiElement::button(
                "planning.implement",
                Domain::Planning,
                "Implement proposal",
                !planning.gestures.is_empty(),
            ));
        }
        out
    }

    fn interact(&self, id: InteractableId, state: &AppState, updates: &Updates<AppState>) {
        let at = ControlPointRef::from_id(id);
        if state.planning.point(at).is_none() {
            debug!(
                gesture = at.gesture,
                index = at.index,
                "pointer on unknown control point"
            );
            return;
        }
        updates.schedule(move |s: &AppState| AppState {
            planning: PlanningState {
                selected_point: Some(at),
                ..s.planning.clone()
            },
            ..s.clone()
        });
    }
}

#[cfg(test)]
mod tests {
    use super::{
        ControlPointRef, GESTURE_DOTS_LAYER, GESTURE_LINES_LAYER, Gesture, PlanningAdapter,
        PlanningState,
    };
    use crate::state::{AppState, UiMode};
    use foundation::math::Vec3;
    use layers::{DomainAdapter, InteractableId, LayerId, UiElementKind};
    use pretty_assertions::assert_eq;
    use runtime::Updates;

    fn state() -> AppState {
        AppState {
            planning: PlanningState {
                gestures: vec![Gesture {
                    id: 3,
                    points: vec![
                        Vec3::new(0.0, 0.0, 0.0),
                        Vec3::new(10.0, 0.0, 0.0),
                        Vec3::new(10.0, 10.0, 0.0),
                    ],
                }],
                current_proposal: 12,
                selected_point: None,
            },
            ..AppState::default()
        }
    }

    #[test]
    fn control_point_ids_survive_packing() {
        let at = ControlPointRef {
            gesture: 3,
            index: 2,
        };
        let id = at.to_id().expect("encodable");
        assert_eq!(ControlPointRef::from_id(InteractableId(id)), at);
    }

    #[test]
    fn oversized_control_point_refs_do_not_alias() {
        let wide_index = ControlPointRef {
            gesture: 3,
            index: 1 << 16,
        };
        assert_eq!(wide_index.to_id(), None);
        let wide_gesture = ControlPointRef {
            gesture: 1 << 48,
            index: 0,
        };
        assert_eq!(wide_gesture.to_id(), None);

        let mut s = state();
        s.planning.gestures[0].id = 1 << 48;
        let out = PlanningAdapter.render(&s, &Updates::new());
        assert_eq!(out.layers()[0].instances.len(), 3);
        assert!(out.interactables().is_empty());
    }

    #[test]
    fn dots_and_segments() {
        let out = PlanningAdapter.render(&state(), &Updates::new());
        let ids: Vec<LayerId> = out.layers().iter().map(|l| l.id).collect();
        assert_eq!(
            ids,
            vec![LayerId(GESTURE_DOTS_LAYER), LayerId(GESTURE_LINES_LAYER)]
        );
        assert_eq!(out.layers()[0].instances.len(), 3);

        let segments = &out.layers()[1].instances;
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].position, [5.0, 0.0, 0.0]);
        assert_eq!(segments[1].direction, [0.0, 1.0]);
        assert_eq!(out.interactables().len(), 3);
    }

    #[test]
    fn implement_button_only_in_planning_mode() {
        let main = PlanningAdapter.render(&state(), &Updates::new());
        assert_eq!(main.ui_elements().len(), 1);
        assert_eq!(
            main.ui_elements()[0].kind,
            UiElementKind::Label {
                text: "Proposal #12".to_string()
            }
        );

        let planning = state().with_ui_mode(UiMode::Planning);
        let out = PlanningAdapter.render(&planning, &Updates::new());
        assert_eq!(
            out.ui_elements()[1].kind,
            UiElementKind::Button {
                caption: "Implement proposal".to_string(),
                active: true,
            }
        );
    }

    #[test]
    fn clicking_control_point_selects_it() {
        let s = state();
        let updates = Updates::new();
        let at = ControlPointRef {
            gesture: 3,
            index: 1,
        };
        PlanningAdapter.interact(InteractableId(at.to_id().expect("id")), &s, &updates);
        let s = updates.apply(s);
        assert_eq!(s.planning.selected_point, Some(at));
        assert_eq!(s.planning.point(at), Some(Vec3::new(10.0, 0.0, 0.0)));
    }

    #[test]
    fn stale_control_point_is_ignored() {
        let updates = Updates::new();
        let stale = ControlPointRef {
            gesture: 3,
            index: 9,
        };
        let id = stale.to_id().expect("id");
        PlanningAdapter.interact(InteractableId(id), &state(), &updates);
        assert!(updates.is_empty());
    }
}
