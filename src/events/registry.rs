//! Listener registry.
//!
//! Listeners are stored in registration order and invoked in that order.

use serde::{Deserialize, Serialize};

use super::event::RoundEvent;
use crate::core::RoundSnapshot;

/// Identifier returned when subscribing, used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListenerId(pub u32);

impl ListenerId {
    /// Create a listener ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ListenerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Listener({})", self.0)
    }
}

/// Callback invoked after each mutation.
pub type Listener = Box<dyn FnMut(&RoundEvent, &RoundSnapshot) + Send>;

/// Registry of round listeners.
#[derive(Default)]
pub struct ListenerRegistry {
    listeners: Vec<(ListenerId, Listener)>,
    next_id: u32,
}

impl ListenerRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener.
    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&RoundEvent, &RoundSnapshot) + Send + 'static,
    {
        let id = ListenerId::new(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener.
    ///
    /// Returns true if the listener was found and removed.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        if let Some(pos) = self.listeners.iter().position(|(l, _)| *l == id) {
            self.listeners.remove(pos);
            true
        } else {
            false
        }
    }

    /// Invoke every listener with the event and snapshot.
    pub fn notify(&mut self, event: &RoundEvent, snapshot: &RoundSnapshot) {
        for (_, listener) in &mut self.listeners {
            listener(event, snapshot);
        }
    }

    /// Get the number of registered listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl std::fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("listeners", &self.listeners.iter().map(|(id, _)| *id).collect::<Vec<_>>())
            .finish()
    }
}
