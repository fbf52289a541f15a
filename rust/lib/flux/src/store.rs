use std::any::Any;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use crate::topic::Topics;
use crate::value::{State, StateValue, SubscriptionId};

/// Callback type for state change notifications.
pub type ChangeHandler = Arc<dyn Fn(&str, &StateValue) + Send + Sync>;

/// Per-path state store with pattern-routed change notifications.
///
/// Untyped access goes through `set` / `get` with an explicit path. Types
/// implementing [`State`] can use `put` / `read` / `clear`, which take the
/// path from the type.
pub struct StateStore {
    values: RwLock<BTreeMap<String, StateValue>>,
    handlers: Topics<HandlerEntry>,
    next_id: AtomicU64,
}

#[derive(Clone)]
struct HandlerEntry {
    id: SubscriptionId,
    handler: ChangeHandler,
}

impl StateStore {
    pub fn new() -> Self {
        Self {
            values: RwLock::new(BTreeMap::new()),
            handlers: Topics::new(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Set a value at `path` and notify matching subscribers.
    pub fn set<T: Any + Send + Sync>(&self, path: &str, value: T) {
        self.set_value(path, StateValue::new(value));
    }

    pub fn set_value(&self, path: &str, value: StateValue) {
        self.values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path.to_string(), value.clone());
        // Lock is released before callbacks so subscribers may read the store.
        for entry in self.handlers.matching(path) {
            (entry.handler)(path, &value);
        }
    }

    pub fn get(&self, path: &str) -> Option<StateValue> {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(path)
            .cloned()
    }

    /// Remove the value at `path`. Does not notify subscribers.
    pub fn remove(&self, path: &str) -> Option<StateValue> {
        self.values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(path)
    }

    /// Store a typed state at its own path.
    pub fn put<S: State>(&self, state: S) {
        self.set(S::PATH, state);
    }

    /// Read a typed state from its own path.
    ///
    /// Returns `None` when nothing is stored or the stored value has a
    /// different type.
    pub fn read<S: State>(&self) -> Option<S> {
        self.get(S::PATH)
            .and_then(|v| v.downcast_ref::<S>().cloned())
    }

    /// Read-modify-write a typed state, starting from `init` if absent.
    pub fn update<S, F>(&self, init: impl FnOnce() -> S, f: F) -> S
    where
        S: State,
        F: FnOnce(&mut S),
    {
        let mut state = self.read::<S>().unwrap_or_else(init);
        f(&mut state);
        self.put(state.clone());
        state
    }

    pub fn clear<S: State>(&self) -> Option<StateValue> {
        self.remove(S::PATH)
    }

    /// Entries whose path starts with `{prefix}/`, ordered by path.
    pub fn scan(&self, prefix: &str) -> Vec<(String, StateValue)> {
        let scan_prefix = format!("{prefix}/");
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .range(scan_prefix.clone()..)
            .take_while(|(k, _)| k.starts_with(&scan_prefix))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.values.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Subscribe to changes on paths matching `pattern`.
    ///
    /// The handler runs synchronously on the thread that calls `set`.
    pub fn subscribe<F>(&self, pattern: &str, handler: F) -> SubscriptionId
    where
        F: Fn(&str, &StateValue) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.handlers.insert(
            pattern,
            HandlerEntry {
                id,
                handler: Arc::new(handler),
            },
        );
        id
    }

    pub fn unsubscribe(&self, pattern: &str, id: SubscriptionId) {
        self.handlers.remove(pattern, |entry| entry.id == id);
    }

    /// All paths and values, ordered by path.
    pub fn snapshot(&self) -> Vec<(String, StateValue)> {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new()
    }
}
