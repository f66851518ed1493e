use std::cell::RefCell;

use tracing::trace;

/// An immutable state update: reads the current state, returns its replacement.
pub type StateUpdate<S> = Box<dyn FnOnce(&S) -> S>;

/// Queue of pending state replacements.
///
/// Render adapters and interaction handlers only ever *schedule* updates;
/// the owner of the state applies them later, in scheduling order, each one
/// replacing the whole state value. Nothing mutates a borrowed state in place,
/// so references held by an in-flight render pass stay valid.
///
/// Single-threaded by construction (`RefCell`), matching the event loop.
pub struct Updates<S> {
    queue: RefCell<Vec<StateUpdate<S>>>,
}

impl<S> Updates<S> {
    pub fn new() -> Self {
        Self {
            queue: RefCell::new(Vec::new()),
        }
    }

    pub fn schedule(&self, update: impl FnOnce(&S) -> S + 'static) {
        self.queue.borrow_mut().push(Box::new(update));
    }

    pub fn len(&self) -> usize {
        self.queue.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.borrow().is_empty()
    }

    /// Applies every update queued so far to `state` and returns the result.
    ///
    /// Updates scheduled while applying are kept for the next call.
    pub fn apply(&self, state: S) -> S {
        let pending = self.queue.take();
        if !pending.is_empty() {
            trace!(count = pending.len(), "applying state updates");
        }
        pending.into_iter().fold(state, |state, update| update(&state))
    }

    pub fn clear(&self) {
        self.queue.borrow_mut().clear();
    }
}

impl<S> Default for Updates<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> std::fmt::Debug for Updates<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Updates")
            .field("pending", &self.len())
            .finish()
    }
}
