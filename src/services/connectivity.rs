//! Connectivity subscription registry
//!
//! Each network status provider owns one `ConnectivityRegistry`. The registry
//! keeps the last known `NetworkState` and the ordered list of listeners, and
//! fans every update out to all of them.
//!
//! Guarantees:
//! - a new listener receives the current state before `register` returns, and
//!   before any later update
//! - listeners are called in subscription order for each update
//! - once `Subscription::unsubscribe` returns, the listener is never called
//!   again, even if an update is being dispatched at that moment
//!
//! Deliveries (initial pushes and update fan-outs) are serialized per registry.
//! A listener may subscribe, unsubscribe or dispatch on the same registry from
//! inside its callback. It must not block on another thread that does so.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::thread::{self, ThreadId};

use crate::domain::{ConnectivityListener, NetworkState};

struct Entry {
    id: u64,
    active: Arc<AtomicBool>,
    listener: ConnectivityListener,
}

struct RegistryInner {
    next_id: u64,
    revision: u64,
    current: NetworkState,
    entries: Vec<Entry>,
}

pub struct ConnectivityRegistry {
    inner: Mutex<RegistryInner>,
    delivery: Mutex<()>,
    // Thread currently holding `delivery`, so callbacks can re-enter
    deliverer: Mutex<Option<ThreadId>>,
}

// Marks the current thread as the deliverer until dropped
struct DeliveryOwner<'a>(&'a Mutex<Option<ThreadId>>);

impl<'a> DeliveryOwner<'a> {
    fn claim(slot: &'a Mutex<Option<ThreadId>>) -> Self {
        *slot.lock().unwrap_or_else(|e| e.into_inner()) = Some(thread::current().id());
        Self(slot)
    }
}

impl Drop for DeliveryOwner<'_> {
    fn drop(&mut self) {
        *self.0.lock().unwrap_or_else(|e| e.into_inner()) = None;
    }
}

impl ConnectivityRegistry {
    /// Create a registry seeded with the state new subscribers receive first
    pub fn new(initial: NetworkState) -> Arc<Self> {
        Arc::new(Self {
            inner: Mutex::new(RegistryInner {
                next_id: 0,
                revision: 0,
                current: initial,
                entries: Vec::new(),
            }),
            delivery: Mutex::new(()),
            deliverer: Mutex::new(None),
        })
    }

    // Listeners run outside this lock, so a poisoned mutex only means a panic
    // between two plain field updates.
    fn lock(&self) -> MutexGuard<'_, RegistryInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn delivering_here(&self) -> bool {
        *self.deliverer.lock().unwrap_or_else(|e| e.into_inner()) == Some(thread::current().id())
    }

    /// Run `f` with exclusive delivery rights. Re-entrant on the delivering thread.
    fn deliver<R>(&self, f: impl FnOnce() -> R) -> R {
        if self.delivering_here() {
            return f();
        }
        let _slot = self.delivery.lock().unwrap_or_else(|e| e.into_inner());
        let _owner = DeliveryOwner::claim(&self.deliverer);
        f()
    }

    /// Last state dispatched (or the seed state)
    pub fn current(&self) -> NetworkState {
        self.lock().current
    }

    /// Add a listener and push the current state to it
    pub fn register(self: &Arc<Self>, listener: ConnectivityListener) -> Subscription {
        let active = Arc::new(AtomicBool::new(true));
        let id = self.deliver(|| {
            let (id, snapshot) = {
                let mut inner = self.lock();
                let id = inner.next_id;
                inner.next_id += 1;
                inner.entries.push(Entry {
                    id,
                    active: Arc::clone(&active),
                    listener: Arc::clone(&listener),
                });
                (id, inner.current)
            };
            tracing::debug!("connectivity: listener {} subscribed", id);
            listener(&snapshot);
            id
        });

        Subscription {
            id,
            active,
            registry: Arc::downgrade(self),
        }
    }

    /// Record `state` and deliver it to every active listener
    pub fn dispatch(&self, state: NetworkState) {
        self.deliver(|| {
            let (revision, targets) = {
                let mut inner = self.lock();
                inner.current = state;
                inner.revision += 1;
                let targets: Vec<(Arc<AtomicBool>, ConnectivityListener)> = inner
                    .entries
                    .iter()
                    .map(|e| (Arc::clone(&e.active), Arc::clone(&e.listener)))
                    .collect();
                (inner.revision, targets)
            };

            tracing::debug!(
                "connectivity: dispatching connected={} to {} listener(s)",
                state.is_connected,
                targets.len()
            );

            for (active, listener) in targets {
                // A listener dispatched a newer state, which already reached everyone
                if self.lock().revision != revision {
                    break;
                }
                if active.load(Ordering::SeqCst) {
                    listener(&state);
                }
            }
        });
    }

    pub fn listener_count(&self) -> usize {
        self.lock().entries.len()
    }

    fn remove(&self, id: u64) {
        self.lock().entries.retain(|e| e.id != id);
    }
}

/// Handle returned by `subscribe`; the only way to stop a listener
#[must_use = "dropping a Subscription keeps the listener registered forever"]
pub struct Subscription {
    id: u64,
    active: Arc<AtomicBool>,
    registry: Weak<ConnectivityRegistry>,
}

impl Subscription {
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Stop delivery to this listener. Other listeners are unaffected.
    ///
    /// Waits for an in-flight delivery on another thread to finish first.
    pub fn unsubscribe(self) {
        match self.registry.upgrade() {
            Some(registry) => registry.deliver(|| {
                self.active.store(false, Ordering::SeqCst);
                registry.remove(self.id);
            }),
            None => self.active.store(false, Ordering::SeqCst),
        }
        tracing::debug!("connectivity: listener {} unsubscribed", self.id);
    }
}
