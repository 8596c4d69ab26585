//! In-process change notifications.
//!
//! Writers emit a [`ChangeEvent`] after every successful mutation and any
//! interested component (currently the submission store) subscribes with a
//! callback. Subscriptions are tied to a [`SubscriptionHandle`] and removed
//! when the handle is dropped.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Kind of mutation that occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Insert,
    Update,
    Delete,
}

/// A single table-level change notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeEvent {
    /// Name of the table that changed.
    pub table: &'static str,
    pub kind: ChangeKind,
}

type Callback = Box<dyn Fn(&ChangeEvent) + Send + Sync>;

#[derive(Default)]
struct BusState {
    next_id: u64,
    subscribers: HashMap<u64, Callback>,
}

/// Broadcast bus connecting repository writers to live listeners.
#[derive(Clone, Default)]
pub struct ChangeBus {
    state: Arc<Mutex<BusState>>,
}

impl ChangeBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback invoked on every emitted event.
    ///
    /// The subscription stays active until the returned handle is dropped.
    pub fn subscribe(
        &self,
        callback: impl Fn(&ChangeEvent) + Send + Sync + 'static,
    ) -> SubscriptionHandle {
        let mut state = self.lock_state();
        let id = state.next_id;
        state.next_id += 1;
        state.subscribers.insert(id, Box::new(callback));
        SubscriptionHandle {
            id,
            bus: self.clone(),
        }
    }

    /// Deliver an event to every active subscriber.
    pub fn emit(&self, event: ChangeEvent) {
        let state = self.lock_state();
        for callback in state.subscribers.values() {
            callback(&event);
        }
    }

    fn unsubscribe(&self, id: u64) {
        let mut state = self.lock_state();
        state.subscribers.remove(&id);
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, BusState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Keeps a subscription alive; dropping it unsubscribes.
pub struct SubscriptionHandle {
    id: u64,
    bus: ChangeBus,
}

impl Drop for SubscriptionHandle {
    fn drop(&mut self) {
        self.bus.unsubscribe(self.id);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    const EVENT: ChangeEvent = ChangeEvent {
        table: "passport_applications",
        kind: ChangeKind::Insert,
    };

    #[test]
    fn subscriber_receives_emitted_events() {
        let bus = ChangeBus::new();
        let seen = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&seen);
        let _handle = bus.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        bus.emit(EVENT);
        bus.emit(EVENT);

        assert_eq!(seen.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn dropping_handle_unsubscribes() {
        let bus = ChangeBus::new();
        let seen = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&seen);
        let handle = bus.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        bus.emit(EVENT);
        drop(handle);
        bus.emit(EVENT);

        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn independent_subscribers_each_receive_events() {
        let bus = ChangeBus::new();
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&first);
        let _a = bus.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let counter = Arc::clone(&second);
        let _b = bus.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        bus.emit(EVENT);

        assert_eq!(first.load(Ordering::SeqCst), 1);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }
}
