//! Application-wide key listeners.
//!
//! Listeners see every key press before it is routed to the active screen or
//! dialog. Registration hands out a [`ListenerHandle`]; dropping the handle
//! removes the listener, so a listener can never outlive its owner.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use crossterm::event::KeyEvent;
use tracing::trace;

type Listener = Arc<dyn Fn(&KeyEvent) -> bool + Send + Sync>;
type Registry = Mutex<Vec<(u64, Listener)>>;

#[derive(Default)]
pub struct KeyListeners {
    registry: Arc<Registry>,
    next_id: AtomicU64,
}

impl KeyListeners {
    pub fn new() -> Self {
        Self::default()
    }

    fn registry(&self) -> MutexGuard<'_, Vec<(u64, Listener)>> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Adds a listener. It returns `true` when it handled the key.
    pub fn register<F>(&self, listener: F) -> ListenerHandle
    where
        F: Fn(&KeyEvent) -> bool + Send + Sync + 'static,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.registry().push((id, Arc::new(listener)));
        trace!(id, "Key listener registered");
        ListenerHandle {
            id,
            registry: Arc::downgrade(&self.registry),
        }
    }

    /// Offers the key to every listener in registration order.
    ///
    /// Returns whether any of them handled it.
    pub fn dispatch(&self, key: &KeyEvent) -> bool {
        // Listeners may unregister others, so call them outside the lock.
        let listeners: Vec<Listener> = self
            .registry()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        listeners
            .iter()
            .fold(false, |handled, listener| listener(key) || handled)
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.registry().len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.registry().is_empty()
    }
}

/// Unregisters its listener when dropped.
pub struct ListenerHandle {
    id: u64,
    registry: Weak<Registry>,
}

impl Drop for ListenerHandle {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .retain(|(id, _)| *id != self.id);
            trace!(id = self.id, "Key listener released");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use crossterm::event::{KeyCode, KeyModifiers};

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_handle_drop_unregisters() {
        let listeners = KeyListeners::new();
        let hits = Arc::new(AtomicUsize::new(0));

        let handle = listeners.register({
            let hits = Arc::clone(&hits);
            move |_| {
                hits.fetch_add(1, Ordering::SeqCst);
                true
            }
        });
        assert_eq!(listeners.len(), 1);
        assert!(listeners.dispatch(&key(KeyCode::Esc)));

        drop(handle);
        assert!(listeners.is_empty());
        assert!(!listeners.dispatch(&key(KeyCode::Esc)));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_every_listener_sees_the_key() {
        let listeners = KeyListeners::new();
        let hits = Arc::new(AtomicUsize::new(0));

        let _handles: Vec<_> = [true, false]
            .into_iter()
            .map(|result| {
                let hits = Arc::clone(&hits);
                listeners.register(move |_| {
                    hits.fetch_add(1, Ordering::SeqCst);
                    result
                })
            })
            .collect();

        assert!(listeners.dispatch(&key(KeyCode::Enter)));
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_handle_outliving_registry() {
        let listeners = KeyListeners::new();
        let handle = listeners.register(|_| false);
        drop(listeners);
        drop(handle);
    }
}
