//! Bounded, newest-first buffer of live events.

use std::collections::VecDeque;

use bookit_entity::live::LiveEvent;

/// Ring buffer of live events, newest at the front.
#[derive(Debug, Clone)]
pub struct LiveEventBuffer {
    capacity: usize,
    events: VecDeque<LiveEvent>,
}

impl LiveEventBuffer {
    /// Create an empty buffer holding at most `capacity` events.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            events: VecDeque::with_capacity(capacity),
        }
    }

    /// Insert `event` at the front.
    ///
    /// An event with the same id is replaced. Returns the events pushed out
    /// of the back to stay within capacity.
    pub fn push(&mut self, event: LiveEvent) -> Vec<LiveEvent> {
        self.remove(&event.id);
        self.events.push_front(event);
        let mut evicted = Vec::new();
        while self.events.len() > self.capacity {
            if let Some(oldest) = self.events.pop_back() {
                evicted.push(oldest);
            }
        }
        evicted
    }

    /// Remove the event with `id`, if present.
    pub fn remove(&mut self, id: &str) -> Option<LiveEvent> {
        let index = self.events.iter().position(|e| e.id == id)?;
        self.events.remove(index)
    }

    /// Whether an event with `id` is present.
    pub fn contains(&self, id: &str) -> bool {
        self.events.iter().any(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Events newest-first.
    pub fn iter(&self) -> impl Iterator<Item = &LiveEvent> {
        self.events.iter()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
