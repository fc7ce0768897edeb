// src/events/bus.rs
//
// Synchronous event dispatch.
//
// Handlers execute immediately on the emitting thread, in subscription
// order. A panicking handler is isolated so the remaining handlers still
// run; the panic is reported through the log facade.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::RwLock;

use crate::events::types::DomainEvent;

/// Type-erased handler; the concrete event type is recovered by downcast.
type Handler = Box<dyn Fn(&dyn Any) + Send + Sync>;

pub struct EventBus {
    handlers: RwLock<HashMap<TypeId, Vec<Handler>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            handlers: RwLock::new(HashMap::new()),
        }
    }

    /// Subscribe to one event type. Handlers run in subscription order.
    pub fn subscribe<E, F>(&self, handler: F)
    where
        E: DomainEvent + 'static,
        F: Fn(&E) + Send + Sync + 'static,
    {
        let erased: Handler = Box::new(move |any: &dyn Any| {
            if let Some(event) = any.downcast_ref::<E>() {
                handler(event);
            }
        });
        self.handlers
            .write()
            .unwrap()
            .entry(TypeId::of::<E>())
            .or_default()
            .push(erased);
    }

    /// Dispatch an event to every subscriber and return.
    pub fn emit<E>(&self, event: E)
    where
        E: DomainEvent + 'static,
    {
        let handlers = self.handlers.read().unwrap();
        let Some(registered) = handlers.get(&TypeId::of::<E>()) else {
            log::debug!("{} emitted with no subscribers", event.event_type());
            return;
        };
        log::debug!(
            "{} -> {} handler(s)",
            event.event_type(),
            registered.len()
        );
        for (index, handler) in registered.iter().enumerate() {
            let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                handler(&event as &dyn Any)
            }));
            if outcome.is_err() {
                log::error!(
                    "handler {} for {} panicked; continuing with the rest",
                    index,
                    event.event_type()
                );
            }
        }
    }

    pub fn subscriber_count<E: 'static>(&self) -> usize {
        self.handlers
            .read()
            .unwrap()
            .get(&TypeId::of::<E>())
            .map(|h| h.len())
            .unwrap_or(0)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
