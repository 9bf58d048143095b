/// The single remembered host, shared by every widget on the origin

use crate::error::WidgetError;
use crate::storage::KeyValueStore;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Storage key holding the canonical host
pub const PREFERENCE_KEY: &str = "mastoPreferredInstance";

type Listener = Rc<dyn Fn(Option<&str>)>;

/// Get/set/clear the preferred host and notify listeners on every change
///
/// Callers normalize and validate hosts before calling [`PreferenceStore::set`].
pub struct PreferenceStore<S> {
    backend: S,
    listeners: RefCell<Vec<Listener>>,
}

impl<S: KeyValueStore> PreferenceStore<S> {
    pub fn new(backend: S) -> Self {
        PreferenceStore {
            backend,
            listeners: RefCell::new(Vec::new()),
        }
    }

    /// Current preference; an empty stored value or a failed read counts as absent
    pub fn get(&self) -> Option<String> {
        match self.backend.get_item(PREFERENCE_KEY) {
            Ok(value) => value.filter(|host| !host.is_empty()),
            Err(e) => {
                log::warn!("Could not read saved instance: {}", e);
                None
            }
        }
    }

    pub fn set(&self, host: &str) -> Result<(), WidgetError> {
        let result = self.backend.set_item(PREFERENCE_KEY, host);
        if result.is_ok() {
            log::info!("Saved instance set to {}", host);
        }
        self.notify();
        result
    }

    pub fn clear(&self) -> Result<(), WidgetError> {
        let result = self.backend.remove_item(PREFERENCE_KEY);
        if result.is_ok() {
            log::info!("Saved instance cleared");
        }
        self.notify();
        result
    }

    /// Register a listener called synchronously after every `set`/`clear`
    pub fn subscribe(&self, listener: impl Fn(Option<&str>) + 'static) {
        self.listeners.borrow_mut().push(Rc::new(listener));
    }

    /// Listeners receive what the backend holds now, so a failed write never shows a stale value
    fn notify(&self) {
        let current = self.get();
        // Snapshot so a listener may subscribe or mutate without a double borrow
        let listeners: Vec<Listener> = self.listeners.borrow().clone();
        for listener in listeners {
            listener(current.as_deref());
        }
    }
}

impl<S> fmt::Debug for PreferenceStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreferenceStore")
            .field("listeners", &self.listeners.borrow().len())
            .finish_non_exhaustive()
    }
}
