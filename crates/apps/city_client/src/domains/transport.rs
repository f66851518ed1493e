use foundation::Aabb3;
use foundation::math::Vec3;
use layers::{
    Domain, DomainAdapter, DomainOutput, Instance, Interactable, InteractableId, Layer, UiElement,
};
use runtime::Updates;
use tracing::debug;

use crate::colors;
use crate::state::AppState;

pub const LANES_LAYER: u64 = 100;
pub const CARS_LAYER: u64 = 101;

/// Half the drivable width of a lane, in meters.
pub const LANE_HALF_WIDTH: f64 = 1.5;
const HIT_HALF_HEIGHT: f64 = 0.5;

#[derive(Debug, Clone, PartialEq)]
pub struct Lane {
    pub id: u64,
    pub start: Vec3,
    pub end: Vec3,
}

impl Lane {
    pub fn new(id: u64, start: Vec3, end: Vec3) -> Self {
        Self { id, start, end }
    }

    pub fn midpoint(&self) -> Vec3 {
        (self.start + self.end) * 0.5
    }

    /// Unit ground-plane direction from start to end.
    pub fn direction(&self) -> [f32; 2] {
        (self.end - self.start)
            .with_z(0.0)
            .normalize()
            .map_or([1.0, 0.0], |d| [d.x as f32, d.y as f32])
    }

    pub fn bounds(&self) -> Aabb3 {
        let pad = Vec3::new(LANE_HALF_WIDTH, LANE_HALF_WIDTH, HIT_HALF_HEIGHT);
        let min = Vec3::new(
            self.start.x.min(self.end.x),
            self.start.y.min(self.end.y),
            self.start.z.min(self.end.z),
        );
        let max = Vec3::new(
            self.start.x.max(self.end.x),
            self.start.y.max(self.end.y),
            self.start.z.max(self.end.z),
        );
        Aabb3::new(min - pad, max + pad)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Car {
    pub position: Vec3,
    /// Radians, counter-clockwise from +X.
    pub heading: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransportState {
    pub lanes: Vec<Lane>,
    pub cars: Vec<Car>,
    pub selected_lane: Option<u64>,
}

impl TransportState {
    /// Selects `lane`, or clears the selection if it is already selected.
    pub fn toggle_lane(&self, lane: u64) -> Self {
        let selected_lane = if self.selected_lane == Some(lane) {
            None
        } else {
            Some(lane)
        };
        Self {
            selected_lane,
            ..self.clone()
        }
    }
}

pub struct TransportAdapter;

impl DomainAdapter<AppState> for TransportAdapter {
    fn domain(&self) -> Domain {
        Domain::Transport
    }

    fn render(&self, state: &AppState, _updates: &Updates<AppState>) -> DomainOutput {
        let transport = &state.transport;
        let mut out = DomainOutput::empty();

        let lanes = transport.lanes.iter().map(|lane| {
            let color = if transport.selected_lane == Some(lane.id) {
                colors::LANE_SELECTED
            } else {
                colors::ASPHALT
            };
            Instance::new(lane.midpoint(), lane.direction(), color)
        });
        out.push_layer(
            Layer::new(LANES_LAYER, Domain::Transport, "TransportLanes")
                .decal()
                .with_instances(lanes),
        );

        let cars = transport.cars.iter().map(|car| {
            let direction = [car.heading.cos() as f32, car.heading.sin() as f32];
            Instance::new(car.position, direction, colors::CAR)
        });
        out.push_layer(
            Layer::new(CARS_LAYER, Domain::Transport, "TransportCars").with_instances(cars),
        );

        for lane in &transport.lanes {
            out.push_interactable(Interactable::new(
                lane.id,
                Domain::Transport,
                lane.bounds(),
            ));
        }

        if let Some(id) = transport.selected_lane {
            out.push_ui_element(UiElement::label(
                "transport.selected-lane",
                Domain::Transport,
                format!("Lane {id}"),
            ));
        }
        out
    }

    fn interact(&self, id: InteractableId, state: &AppState, updates: &Updates<AppState>) {
        if !state.transport.lanes.iter().any(|l| l.id == id.0) {
            debug!(lane = id.0, "pointer on unknown lane");
            return;
        }
        updates.schedule(move |s: &AppState| AppState {
            transport: s.transport.toggle_lane(id.0),
            ..s.clone()
        });
    }
}
