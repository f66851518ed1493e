use foundation::Aabb3;
use scene::HitRegion;

use crate::domain::Domain;

/// Adapter-chosen identifier, meaningful only to the owning domain.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InteractableId(pub u64);

/// Hit region contributed by a domain adapter.
///
/// Carries its owning domain so the shell can route a pointer hit back to
/// the adapter that produced it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Interactable {
    pub id: InteractableId,
    pub domain: Domain,
    pub bounds: Aabb3,
}

impl Interactable {
    pub fn new(id: u64, domain: Domain, bounds: Aabb3) -> Self {
        Self {
            id: InteractableId(id),
            domain,
            bounds,
        }
    }
}

impl HitRegion for Interactable {
    fn bounds(&self) -> Aabb3 {
        self.bounds
    }
}
