//! Process-wide "ledger changed" signal.
//!
//! Delivery is synchronous and best effort: listeners run on the publishing thread,
//! in registration order, after the publisher's lock has been released. There is no
//! payload beyond the ledger kind, so listeners reload from storage on receipt.
//! Dropping a [`Subscription`] unregisters its listener.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use crate::ledger::LedgerKind;

type Listener = Arc<dyn Fn(LedgerKind) + Send + Sync>;

struct Registration {
    id: u64,
    kind: LedgerKind,
    listener: Listener,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    registrations: Vec<Registration>,
}

#[derive(Clone, Default)]
pub struct ChangeNotifier {
    registry: Arc<Mutex<Registry>>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, kind: LedgerKind, listener: F) -> Subscription
    where
        F: Fn(LedgerKind) + Send + Sync + 'static,
    {
        let mut registry = lock(&self.registry);
        let id = registry.next_id;
        registry.next_id += 1;
        registry.registrations.push(Registration {
            id,
            kind,
            listener: Arc::new(listener),
        });
        tracing::debug!(%kind, id, "listener subscribed");
        Subscription {
            id,
            registry: Arc::downgrade(&self.registry),
        }
    }

    /// Notifies every listener of `kind`; returns how many were called.
    pub fn publish(&self, kind: LedgerKind) -> usize {
        let listeners: Vec<Listener> = lock(&self.registry)
            .registrations
            .iter()
            .filter(|registration| registration.kind == kind)
            .map(|registration| Arc::clone(&registration.listener))
            .collect();
        tracing::debug!(%kind, listeners = listeners.len(), "publishing change");
        for listener in &listeners {
            listener(kind);
        }
        listeners.len()
    }

    pub fn listener_count(&self, kind: LedgerKind) -> usize {
        lock(&self.registry)
            .registrations
            .iter()
            .filter(|registration| registration.kind == kind)
            .count()
    }
}

// A panicking listener never runs under the lock, so a poisoned registry is still consistent.
fn lock(registry: &Mutex<Registry>) -> MutexGuard<'_, Registry> {
    registry.lock().unwrap_or_else(PoisonError::into_inner)
}

/// RAII guard for a listener registered with [`ChangeNotifier::subscribe`].
#[must_use = "dropping the subscription unregisters the listener"]
pub struct Subscription {
    id: u64,
    registry: Weak<Mutex<Registry>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        lock(&registry)
            .registrations
            .retain(|registration| registration.id != self.id);
    }
}
