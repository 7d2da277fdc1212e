//! Handler registry: one named handler per inbound event category.

use std::sync::Arc;

use dashmap::DashMap;

use crate::message::types::{InboundEvent, InboundEventKind};

/// Callback invoked for every inbound event of one category.
pub type EventHandler = Arc<dyn Fn(InboundEvent) + Send + Sync>;

/// Registry of the handlers attached to a live channel.
#[derive(Default)]
pub struct HandlerRegistry {
    /// Event category → handler.
    handlers: DashMap<InboundEventKind, EventHandler>,
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("kinds", &self.registered())
            .finish()
    }
}

impl HandlerRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a handler, replacing any previous one for the same category.
    pub fn on<F>(&self, kind: InboundEventKind, handler: F)
    where
        F: Fn(InboundEvent) + Send + Sync + 'static,
    {
        self.handlers.insert(kind, Arc::new(handler));
    }

    /// Detaches the handler for a category. Returns whether one was attached.
    pub fn off(&self, kind: InboundEventKind) -> bool {
        self.handlers.remove(&kind).is_some()
    }

    /// Detaches every handler.
    pub fn off_all(&self) {
        for kind in InboundEventKind::ALL {
            self.off(kind);
        }
    }

    /// Invokes the handler for the event's category.
    ///
    /// Returns `false` when no handler is attached.
    pub fn dispatch(&self, event: InboundEvent) -> bool {
        // Clone out of the map so the handler runs without holding a shard lock.
        let handler = self
            .handlers
            .get(&event.kind())
            .map(|entry| Arc::clone(entry.value()));
        match handler {
            Some(handler) => {
                handler(event);
                true
            }
            None => false,
        }
    }

    /// Categories with an attached handler, in subscription order.
    pub fn registered(&self) -> Vec<InboundEventKind> {
        InboundEventKind::ALL
            .into_iter()
            .filter(|k| self.handlers.contains_key(k))
            .collect()
    }

    /// Number of attached handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether no handler is attached.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
