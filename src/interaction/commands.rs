//! Named input actions and the dispatcher that fans them out.
//!
//! Key bindings live outside the core; whatever maps keys to actions calls
//! [`InputDispatcher::emit`].

use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TransformMode {
    #[default]
    Translate,
    Rotate,
    Scale,
}

impl fmt::Display for TransformMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformMode::Translate => write!(f, "translate"),
            TransformMode::Rotate => write!(f, "rotate"),
            TransformMode::Scale => write!(f, "scale"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    Delete,
    Glue,
    Deglue,
    Duplicate,
    SetTransformMode(TransformMode),
}

/// Handle returned by [`InputDispatcher::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&InputAction)>;

/// Explicitly constructed action bus. Listeners run in subscription order.
#[derive(Default)]
pub struct InputDispatcher {
    listeners: BTreeMap<SubscriptionId, Listener>,
    next_id: u64,
}

impl InputDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&InputAction) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.insert(id, Box::new(listener));
        id
    }

    /// Returns `false` when `id` was not subscribed
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.remove(&id).is_some()
    }

    pub fn emit(&mut self, action: InputAction) {
        log::trace!("Dispatching {:?} to {} listeners", action, self.listeners.len());
        for listener in self.listeners.values_mut() {
            listener(&action);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl fmt::Debug for InputDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputDispatcher")
            .field("listeners", &self.listeners.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}
