//! Lifecycle events and their subscriber lists.

use crate::document::SignatureData;
use crate::stroke::SignaturePoint;
use std::collections::HashMap;
use std::fmt;

/// Kind of lifecycle event a handler subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Start,
    Draw,
    End,
    Clear,
}

/// Event delivered to subscribers.
#[derive(Debug, Clone, PartialEq)]
pub enum SignatureEvent {
    /// A stroke began at this point.
    Start(SignaturePoint),
    /// A point was appended to the stroke in progress.
    Draw(SignaturePoint),
    /// A stroke was committed; carries a snapshot of the whole document.
    End(SignatureData),
    /// The document was cleared.
    Clear,
}

impl SignatureEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            SignatureEvent::Start(_) => EventKind::Start,
            SignatureEvent::Draw(_) => EventKind::Draw,
            SignatureEvent::End(_) => EventKind::End,
            SignatureEvent::Clear => EventKind::Clear,
        }
    }
}

/// Callback invoked with each event of its kind.
pub type EventHandler = Box<dyn FnMut(&SignatureEvent)>;

/// Handle returned by [`EventBus::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription {
    kind: EventKind,
    id: u64,
}

impl Subscription {
    pub fn kind(&self) -> EventKind {
        self.kind
    }
}

/// Ordered subscriber lists keyed by event kind.
///
/// Handlers of one kind run in subscription order.
#[derive(Default)]
pub struct EventBus {
    handlers: HashMap<EventKind, Vec<(u64, EventHandler)>>,
    next_id: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for one event kind.
    pub fn subscribe<F>(&mut self, kind: EventKind, handler: F) -> Subscription
    where
        F: FnMut(&SignatureEvent) + 'static,
    {
        let id = self.next_id;
        self.next_id += 1;
        self.handlers.entry(kind).or_default().push((id, Box::new(handler)));
        Subscription { kind, id }
    }

    /// Remove a handler. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        let Some(list) = self.handlers.get_mut(&subscription.kind) else {
            return false;
        };
        let before = list.len();
        list.retain(|(id, _)| *id != subscription.id);
        list.len() != before
    }

    /// Deliver an event to every handler of its kind.
    pub fn emit(&mut self, event: &SignatureEvent) {
        if let Some(list) = self.handlers.get_mut(&event.kind()) {
            for (_, handler) in list.iter_mut() {
                handler(event);
            }
        }
    }

    /// Whether anything listens for `kind`.
    pub fn has_subscribers(&self, kind: EventKind) -> bool {
        self.handlers.get(&kind).is_some_and(|list| !list.is_empty())
    }

    /// Total number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every handler.
    pub fn clear(&mut self) {
        self.handlers.clear();
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}
