use std::fmt;

use foundation::Aabb3;
use foundation::math::Vec3;
use layers::{
    Domain, DomainAdapter, DomainOutput, Instance, Interactable, InteractableId, Layer, UiElement,
};
use runtime::Updates;
use tracing::debug;

use crate::colors;
use crate::state::AppState;

pub const LOTS_LAYER: u64 = 300;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Zone {
    Residential,
    Commercial,
    Industrial,
    Agricultural,
}

impl Zone {
    pub fn color(self) -> [f32; 3] {
        match self {
            Zone::Residential => colors::RESIDENTIAL,
            Zone::Commercial => colors::COMMERCIAL,
            Zone::Industrial => colors::INDUSTRIAL,
            Zone::Agricultural => colors::AGRICULTURAL,
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Zone::Residential => "residential",
            Zone::Commercial => "commercial",
            Zone::Industrial => "industrial",
            Zone::Agricultural => "agricultural",
        })
    }
}

/// Square building lot on the ground plane.
#[derive(Debug, Clone, PartialEq)]
pub struct Lot {
    pub id: u64,
    pub center: Vec3,
    pub half_size: f64,
    pub zone: Zone,
}

impl Lot {
    pub fn bounds(&self) -> Aabb3 {
        Aabb3::around(self.center, Vec3::new(self.half_size, self.half_size, 0.5))
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LandUseState {
    pub lots: Vec<Lot>,
    pub selected_lot: Option<u64>,
}

impl LandUseState {
    pub fn selected(&self) -> Option<&Lot> {
        let id = self.selected_lot?;
        self.lots.iter().find(|lot| lot.id == id)
    }
}

pub struct LandUseAdapter;

impl DomainAdapter<AppState> for LandUseAdapter {
    fn domain(&self) -> Domain {
        Domain::LandUse
    }

    fn render(&self, state: &AppState, _updates: &Updates<AppState>) -> DomainOutput {
        let land_use = &state.land_use;
        let mut out = DomainOutput::empty();

        let lots = land_use.lots.iter().map(|lot| {
            let color = if land_use.selected_lot == Some(lot.id) {
                colors::LOT_SELECTED
            } else {
                lot.zone.color()
            };
            Instance::at(lot.center, color)
        });
        out.push_layer(
            Layer::new(LOTS_LAYER, Domain::LandUse, "LandUseLots")
                .decal()
                .with_instances(lots),
        );

        for lot in &land_use.lots {
            out.push_interactable(Interactable::new(lot.id, Domain::LandUse, lot.bounds()));
        }

        if let Some(lot) = land_use.selected() {
            out.push_ui_element(UiElement::label(
                "land-use.selected-lot",
                Domain::LandUse,
                format!("Lot {}: {}", lot.id, lot.zone),
            ));
        }
        out
    }

    fn interact(&self, id: InteractableId, state: &AppState, updates: &Updates<AppState>) {
        if !state.land_use.lots.iter().any(|lot| lot.id == id.0) {
            debug!(lot = id.0, "pointer on unknown lot");
            return;
        }
        updates.schedule(move |s: &AppState| AppState {
            land_use: LandUseState {
                selected_lot: Some(id.0),
                ..s.land_use.clone()
            },
            ..s.clone()
        });
    }
}
