//! Round events and observer registration.
//!
//! The game notifies listeners synchronously after every mutation,
//! including mutations made by deferred tasks. Each notification carries
//! the [`RoundEvent`] that happened and a [`RoundSnapshot`] of the state
//! right after it.
//!
//! [`RoundSnapshot`]: crate::core::RoundSnapshot

mod event;
mod registry;

pub use event::RoundEvent;
pub use registry::{Listener, ListenerId, ListenerRegistry};
