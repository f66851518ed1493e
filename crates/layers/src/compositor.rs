use runtime::Updates;
use tracing::debug;

use crate::domain::{Domain, DomainAdapter, DomainOutput};
use crate::interactable::{Interactable, InteractableId};
use crate::layer::Layer;
use crate::ui::UiElement;

/// One frame's worth of merged domain output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComposedScene {
    pub layers: Vec<Layer>,
    pub interactables: Vec<Interactable>,
    pub ui_elements: Vec<UiElement>,
}

/// Concatenates per-domain outputs in domain precedence order.
///
/// Ordering contract:
/// - Outputs are ordered by `Domain` (transport, planning, land-use, debug)
///   regardless of the order they are supplied in.
/// - Outputs of the same domain keep their relative order, and every output
///   keeps its own internal order.
/// - Empty outputs contribute nothing and do not disturb the others.
pub fn merge(outputs: impl IntoIterator<Item = (Domain, DomainOutput)>) -> ComposedScene {
    let mut outputs: Vec<(Domain, DomainOutput)> = outputs.into_iter().collect();
    // Stable sort: ties keep registration order.
    outputs.sort_by_key(|(domain, _)| *domain);

    let mut scene = ComposedScene::default();
    for (_, output) in outputs {
        let (layers, interactables, ui_elements) = output.into_parts();
        scene.layers.extend(layers);
        scene.interactables.extend(interactables);
        scene.ui_elements.extend(ui_elements);
    }
    scene
}

/// Registry of domain adapters and the per-frame merge over them.
///
/// Holds no per-frame state: every `compose` call rebuilds the scene from
/// the state it is given.
pub struct SceneCompositor<S> {
    adapters: Vec<Box<dyn DomainAdapter<S>>>,
}

impl<S> SceneCompositor<S> {
    pub fn new() -> Self {
        Self {
            adapters: Vec::new(),
        }
    }

    pub fn register(&mut self, adapter: impl DomainAdapter<S> + 'static) {
        self.adapters.push(Box::new(adapter));
    }

    pub fn with_adapter(mut self, adapter: impl DomainAdapter<S> + 'static) -> Self {
        self.register(adapter);
        self
    }

    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }

    /// Renders every adapter against the same state and update queue and
    /// merges the results.
    pub fn compose(&self, state: &S, updates: &Updates<S>) -> ComposedScene {
        let scene = merge(
            self.adapters
                .iter()
                .map(|adapter| (adapter.domain(), adapter.render(state, updates))),
        );
        debug!(
            layers = scene.layers.len(),
            interactables = scene.interactables.len(),
            ui_elements = scene.ui_elements.len(),
            "composed scene"
        );
        scene
    }

    /// Hands a pointer hit to the adapters of `domain`.
    ///
    /// Returns `false` when no registered adapter owns that domain.
    pub fn route(
        &self,
        domain: Domain,
        id: InteractableId,
        state: &S,
        updates: &Updates<S>,
    ) -> bool {
        let mut handled = false;
        for adapter in self.adapters.iter().filter(|a| a.domain() == domain) {
            adapter.interact(id, state, updates);
            handled = true;
        }
        if !handled {
            debug!(%domain, id = id.0, "no adapter for interactable");
        }
        handled
    }
}

impl<S> Default for SceneCompositor<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> std::fmt::Debug for SceneCompositor<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let domains: Vec<Domain> = self.adapters.iter().map(|a| a.domain()).collect();
        f.debug_struct("SceneCompositor")
            .field("domains", &domains)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{ComposedScene, SceneCompositor, merge};
    use crate::domain::{Domain, DomainAdapter, DomainOutput};
    use crate::interactable::{Interactable, InteractableId};
    use crate::layer::{Layer, LayerId};
    use crate::ui::UiElement;
    use foundation::math::Vec3;
    use foundation::Aabb3;
    use pretty_assertions::assert_eq;
    use runtime::Updates;

    #[derive(Debug, Clone, Default, PartialEq)]
    struct TestState {
        clicks: Vec<(Domain, u64)>,
        renders: u32,
    }

    /// Contributes `count` of each output kind, ids tagged by domain.
    struct Fixed {
        domain: Domain,
        count: u64,
    }

    fn tag(domain: Domain, i: u64) -> u64 {
        (domain as u64 + 1) * 100 + i
    }

    impl DomainAdapter<TestState> for Fixed {
        fn domain(&self) -> Domain {
            self.domain
        }

        fn render(&self, _state: &TestState, _updates: &Updates<TestState>) -> DomainOutput {
            let mut out = DomainOutput::empty();
            for i in 0..self.count {
                let id = tag(self.domain, i);
                out.push_layer(Layer::new(id, self.domain, "fixed"));
                out.push_interactable(Interactable::new(
                    id,
                    self.domain,
                    Aabb3::around(Vec3::ZERO, Vec3::new(1.0, 1.0, 1.0)),
                ));
                out.push_ui_element(UiElement::label(id.to_string(), self.domain, "x"));
            }
            out
        }

        fn interact(&self, id: InteractableId, _state: &TestState, updates: &Updates<TestState>) {
            let domain = self.domain;
            updates.schedule(move |s: &TestState| {
                let mut next = s.clone();
                next.clicks.push((domain, id.0));
                next
            });
        }
    }

    fn permutations(items: &[Domain]) -> Vec<Vec<Domain>> {
        if items.len() <= 1 {
            return vec![items.to_vec()];
        }
        let mut out = Vec::new();
        for (i, first) in items.iter().enumerate() {
            let mut rest = items.to_vec();
            rest.remove(i);
            for mut tail in permutations(&rest) {
                tail.insert(0, *first);
                out.push(tail);
            }
        }
        out
    }

    fn expected_ids(counts: &[(Domain, u64)]) -> Vec<u64> {
        Domain::PRECEDENCE
            .iter()
            .flat_map(|d| {
                let n = counts.iter().find(|(cd, _)| cd == d).map_or(0, |(_, n)| *n);
                (0..n).map(move |i| tag(*d, i))
            })
            .collect()
    }

    #[test]
    fn one_layer_each_merges_in_precedence_order() {
        let compositor = SceneCompositor::new()
            .with_adapter(Fixed { domain: Domain::Debug, count: 1 })
            .with_adapter(Fixed { domain: Domain::LandUse, count: 1 })
            .with_adapter(Fixed { domain: Domain::Planning, count: 1 })
            .with_adapter(Fixed { domain: Domain::Transport, count: 1 });

        let scene = compositor.compose(&TestState::default(), &Updates::new());
        let domains: Vec<Domain> = scene.layers.iter().map(|l| l.domain).collect();
        assert_eq!(domains, Domain::PRECEDENCE.to_vec());
    }

    #[test]
    fn order_holds_for_every_empty_subset_and_registration_order() {
        for mask in 0u8..16 {
            for order in permutations(&Domain::PRECEDENCE) {
                let counts: Vec<(Domain, u64)> = order
                    .iter()
                    .enumerate()
                    .map(|(i, d)| {
                        let empty = mask & (1 << (*d as u8)) != 0;
                        (*d, if empty { 0 } else { i as u64 + 1 })
                    })
                    .collect();

                let mut compositor = SceneCompositor::new();
                for (domain, count) in &counts {
                    compositor.register(Fixed {
                        domain: *domain,
                        count: *count,
                    });
                }

                let scene = compositor.compose(&TestState::default(), &Updates::new());
                let expected = expected_ids(&counts);

                let layer_ids: Vec<u64> = scene.layers.iter().map(|l| l.id.0).collect();
                let hit_ids: Vec<u64> = scene.interactables.iter().map(|i| i.id.0).collect();
                let ui_keys: Vec<String> = scene.ui_elements.iter().map(|u| u.key.clone()).collect();

                assert_eq!(layer_ids, expected, "mask {mask:04b} order {order:?}");
                assert_eq!(hit_ids, expected, "mask {mask:04b} order {order:?}");
                assert_eq!(
                    ui_keys,
                    expected.iter().map(u64::to_string).collect::<Vec<_>>(),
                    "mask {mask:04b} order {order:?}"
                );
            }
        }
    }

    #[test]
    fn same_domain_outputs_keep_supply_order() {
        let first = DomainOutput::new(vec![Layer::new(1, Domain::Planning, "a")], vec![], vec![]);
        let second = DomainOutput::new(vec![Layer::new(2, Domain::Planning, "b")], vec![], vec![]);
        let debug = DomainOutput::new(vec![Layer::new(3, Domain::Debug, "c")], vec![], vec![]);

        let scene = merge([
            (Domain::Debug, debug),
            (Domain::Planning, first),
            (Domain::Planning, second),
        ]);
        let ids: Vec<LayerId> = scene.layers.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![LayerId(1), LayerId(2), LayerId(3)]);
    }

    #[test]
    fn compose_is_idempotent() {
        let compositor = SceneCompositor::new()
            .with_adapter(Fixed { domain: Domain::LandUse, count: 3 })
            .with_adapter(Fixed { domain: Domain::Transport, count: 2 });
        let state = TestState::default();
        let updates = Updates::new();

        let a = compositor.compose(&state, &updates);
        let b = compositor.compose(&state, &updates);
        assert_eq!(a, b);
        assert_eq!(a.layers.len(), 5);
    }

    #[test]
    fn no_adapters_compose_to_empty_scene() {
        let compositor: SceneCompositor<TestState> = SceneCompositor::default();
        assert!(compositor.is_empty());
        assert_eq!(
            compositor.compose(&TestState::default(), &Updates::new()),
            ComposedScene::default()
        );
    }

    #[test]
    fn route_schedules_update_on_owning_domain_only() {
        let compositor = SceneCompositor::new()
            .with_adapter(Fixed { domain: Domain::Transport, count: 1 })
            .with_adapter(Fixed { domain: Domain::Planning, count: 1 });
        let state = TestState::default();
        let updates = Updates::new();

        assert!(compositor.route(Domain::Planning, InteractableId(201), &state, &updates));
        assert!(!compositor.route(Domain::Debug, InteractableId(1), &state, &updates));

        let next = updates.apply(state.clone());
        assert_eq!(next.clicks, vec![(Domain::Planning, 201)]);
        assert!(state.clicks.is_empty());
    }

    #[test]
    fn adapters_see_the_same_state() {
        struct CountingAdapter(Domain);

        impl DomainAdapter<TestState> for CountingAdapter {
            fn domain(&self) -> Domain {
                self.0
            }

            fn render(&self, state: &TestState, updates: &Updates<TestState>) -> DomainOutput {
                let seen = state.renders;
                updates.schedule(move |s: &TestState| TestState {
                    renders: s.renders.max(seen) + 1,
                    ..s.clone()
                });
                DomainOutput::empty()
            }
        }

        let compositor = SceneCompositor::new()
            .with_adapter(CountingAdapter(Domain::Transport))
            .with_adapter(CountingAdapter(Domain::Debug));
        let updates = Updates::new();
        let state = TestState::default();
        let scene = compositor.compose(&state, &updates);

        assert!(scene.layers.is_empty());
        assert_eq!(updates.len(), 2);
        assert_eq!(updates.apply(state).renders, 2);
    }
}
