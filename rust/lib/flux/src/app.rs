use std::any::Any;
use std::future::Future;
use std::sync::Arc;

use crate::router::{Payload, Router};
use crate::store::StateStore;
use crate::value::{Request, State, StateValue, SubscriptionId};

/// Flux: the state engine the platform UI drives.
///
/// Three primitives, all path-based:
/// - `get(path)` / `read::<S>()`: read state
/// - `emit(path, payload)` / `request(req)`: send a request to handler(s)
/// - `subscribe(pattern)`: observe state changes
///
/// ```ignore
/// let flux = Flux::new();
/// flux.on_request::<LoginReq, _, _>(|req, store| async move { ... });
/// flux.subscribe("auth/#", |path, _| println!("{path} changed"));
/// flux.request(LoginReq { identifier, secret }).await;
/// let session = flux.read::<AuthState>();
/// ```
pub struct Flux {
    store: Arc<StateStore>,
    router: Router,
}

impl Flux {
    pub fn new() -> Self {
        Self {
            store: Arc::new(StateStore::new()),
            router: Router::new(),
        }
    }

    // ====================================================================
    // State: read
    // ====================================================================

    pub fn get(&self, path: &str) -> Option<StateValue> {
        self.store.get(path)
    }

    /// Read a typed state from its own path.
    pub fn read<S: State>(&self) -> Option<S> {
        self.store.read::<S>()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn snapshot(&self) -> Vec<(String, StateValue)> {
        self.store.snapshot()
    }

    // ====================================================================
    // Requests: emit
    // ====================================================================

    /// Emit a request and wait for the matching handler(s) to finish.
    pub async fn emit<T: Any + Send + Sync>(&self, path: &str, payload: T) {
        let payload: Payload = Arc::new(payload);
        self.router.dispatch(path, payload, Arc::clone(&self.store)).await;
    }

    /// Emit a typed request at its own path.
    pub async fn request<R: Request>(&self, req: R) {
        self.emit(R::PATH, req).await;
    }

    // ====================================================================
    // Requests: register handlers
    // ====================================================================

    pub fn on<F, Fut>(&self, pattern: &str, handler: F)
    where
        F: Fn(String, Payload, Arc<StateStore>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.router.on(pattern, handler);
    }

    pub fn on_request<R, F, Fut>(&self, handler: F)
    where
        R: Request,
        F: Fn(Arc<R>, Arc<StateStore>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.router.on_request::<R, F, Fut>(handler);
    }

    pub fn has_handler(&self, path: &str) -> bool {
        self.router.matches(path)
    }

    // ====================================================================
    // Subscriptions
    // ====================================================================

    pub fn subscribe<F>(&self, pattern: &str, handler: F) -> SubscriptionId
    where
        F: Fn(&str, &StateValue) + Send + Sync + 'static,
    {
        self.store.subscribe(pattern, handler)
    }

    pub fn unsubscribe(&self, pattern: &str, id: SubscriptionId) {
        self.store.unsubscribe(pattern, id);
    }

    pub fn store(&self) -> &Arc<StateStore> {
        &self.store
    }
}

impl Default for Flux {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU64, Ordering};

    #[derive(Debug, Clone, PartialEq)]
    struct Route(String);

    impl State for Route {
        const PATH: &'static str = "app/route";
    }

    struct NavigateReq {
        to: String,
    }

    impl Request for NavigateReq {
        const PATH: &'static str = "app/navigate";
    }

    #[test]
    fn new_creates_empty_flux() {
        let flux = Flux::default();
        assert!(flux.is_empty());
        assert!(flux.get("anything").is_none());
        assert!(flux.read::<Route>().is_none());
    }

    #[tokio::test]
    async fn typed_request_updates_typed_state() {
        let flux = Flux::new();
        flux.on_request::<NavigateReq, _, _>(|req, store| async move {
            store.put(Route(req.to.clone()));
        });

        flux.request(NavigateReq { to: "/home".into() }).await;
        assert_eq!(flux.read::<Route>(), Some(Route("/home".into())));
        assert!(flux.has_handler("app/navigate"));
    }

    #[tokio::test]
    async fn emit_without_handler_is_silent() {
        let flux = Flux::new();
        flux.emit("nonexistent", ()).await;
        assert!(flux.is_empty());
    }

    #[tokio::test]
    async fn subscriber_sees_handler_writes() {
        let flux = Flux::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let s = seen.clone();
        flux.subscribe("app/#", move |path, _| {
            s.lock().unwrap().push(path.to_string());
        });
        flux.on("app/initialize", |_, _, store: Arc<StateStore>| async move {
            store.put(Route("/login".into()));
        });

        flux.emit("app/initialize", ()).await;
        assert_eq!(*seen.lock().unwrap(), vec!["app/route"]);
    }

    #[tokio::test]
    async fn repeated_emits_run_handler_each_time() {
        let flux = Flux::new();
        let count = Arc::new(AtomicU64::new(0));
        let c = count.clone();
        flux.on("ping", move |_, _, _| {
            let c = c.clone();
            async move {
                c.fetch_add(1, Ordering::Relaxed);
            }
        });

        flux.emit("ping", ()).await;
        flux.emit("ping", ()).await;
        assert_eq!(count.load(Ordering::Relaxed), 2);
    }
}
