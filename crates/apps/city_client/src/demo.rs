//! Small hand-built city used by the headless binary when no simulation is
//! attached.

use foundation::math::Vec3;

use crate::domains::land_use::{LandUseState, Lot, Zone};
use crate::domains::planning::{Gesture, PlanningState};
use crate::domains::transport::{Car, Lane, TransportState};
use crate::state::AppState;

const BLOCK: f64 = 40.0;

/// Grid of two-way streets with a lot in every block, a few cars and one
/// planning gesture. Leaves camera and rendering untouched.
pub fn seed(state: &AppState) -> AppState {
    let mut lanes = Vec::new();
    let mut next_id = 1;
    for i in -1..=1 {
        let offset = f64::from(i) * BLOCK;
        for (start, end) in [
            (Vec3::new(-BLOCK, offset, 0.0), Vec3::new(BLOCK, offset, 0.0)),
            (Vec3::new(offset, -BLOCK, 0.0), Vec3::new(offset, BLOCK, 0.0)),
        ] {
            lanes.push(Lane::new(next_id, start, end));
            lanes.push(Lane::new(next_id + 1, end, start));
            next_id += 2;
        }
    }

    let cars = lanes
        .iter()
        .step_by(3)
        .map(|lane| {
            let d = lane.end - lane.start;
            Car {
                position: lane.start + d * 0.25,
                heading: d.y.atan2(d.x),
            }
        })
        .collect();

    let zones = [
        Zone::Residential,
        Zone::Commercial,
        Zone::Industrial,
        Zone::Agricultural,
    ];
    let half = BLOCK * 0.5;
    let lots = [(-1.0, -1.0), (1.0, -1.0), (-1.0, 1.0), (1.0, 1.0)]
        .into_iter()
        .zip(zones)
        .enumerate()
        .map(|(i, ((sx, sy), zone))| Lot {
            id: i as u64 + 1,
            center: Vec3::new(sx * half, sy * half, 0.0),
            half_size: half * 0.6,
            zone,
        })
        .collect();

    AppState {
        transport: TransportState {
            lanes,
            cars,
            selected_lane: None,
        },
        land_use: LandUseState {
            lots,
            selected_lot: None,
        },
        planning: PlanningState {
            gestures: vec![Gesture {
                id: 1,
                points: vec![
                    Vec3::new(BLOCK, -BLOCK, 0.0),
                    Vec3::new(2.0 * BLOCK, -BLOCK, 0.0),
                    Vec3::new(2.0 * BLOCK, 0.0, 0.0),
                ],
            }],
            current_proposal: 1,
            selected_point: None,
        },
        ..state.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::seed;
    use crate::domains;
    use crate::state::AppState;
    use layers::Domain;
    use runtime::Updates;

    #[test]
    fn seeded_city_fills_every_content_domain() {
        let before = AppState::default();
        let state = seed(&before);
        assert_eq!(state.view, before.view);
        assert_eq!(state.transport.lanes.len(), 12);
        assert_eq!(state.land_use.lots.len(), 4);

        let scene = domains::standard_compositor().compose(&state, &Updates::new());
        for domain in [Domain::Transport, Domain::Planning, Domain::LandUse] {
            assert!(
                scene
                    .layers
                    .iter()
                    .any(|l| l.domain == domain && !l.instances.is_empty()),
                "{domain} drew nothing"
            );
        }
    }
}
