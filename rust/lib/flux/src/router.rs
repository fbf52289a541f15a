use std::any::Any;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::store::StateStore;
use crate::topic::Topics;
use crate::value::Request;

/// A boxed, `Send`-able future returned by request handlers.
pub type BoxFuture = Pin<Box<dyn Future<Output = ()> + Send>>;

/// Type-erased request payload.
pub type Payload = Arc<dyn Any + Send + Sync>;

type ErasedHandler = Arc<dyn Fn(String, Payload, Arc<StateStore>) -> BoxFuture + Send + Sync>;

/// Request router: maps path patterns to async handlers.
///
/// Several handlers may match one path (through wildcards); they run
/// sequentially in registration order.
pub struct Router {
    handlers: Topics<ErasedHandler>,
}

impl Router {
    pub fn new() -> Self {
        Self {
            handlers: Topics::new(),
        }
    }

    /// Register an untyped handler for a path pattern.
    pub fn on<F, Fut>(&self, pattern: &str, handler: F)
    where
        F: Fn(String, Payload, Arc<StateStore>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let handler: ErasedHandler = Arc::new(
            move |path: String, payload: Payload, store: Arc<StateStore>| -> BoxFuture {
                Box::pin(handler(path, payload, store))
            },
        );
        self.handlers.insert(pattern, handler);
    }

    /// Register a handler for a typed request at `R::PATH`.
    ///
    /// The payload is downcast before the handler runs. A payload of the
    /// wrong type is logged and dropped.
    pub fn on_request<R, F, Fut>(&self, handler: F)
    where
        R: Request,
        F: Fn(Arc<R>, Arc<StateStore>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let handler = Arc::new(handler);
        self.on(R::PATH, move |path, payload, store| {
            let handler = Arc::clone(&handler);
            async move {
                match payload.downcast::<R>() {
                    Ok(req) => handler(req, store).await,
                    Err(_) => {
                        tracing::error!(
                            path = %path,
                            expected = std::any::type_name::<R>(),
                            "request payload has unexpected type"
                        );
                    }
                }
            }
        });
    }

    /// Dispatch a request to every matching handler.
    ///
    /// No matching handler is a silent no-op.
    pub async fn dispatch(&self, path: &str, payload: Payload, store: Arc<StateStore>) {
        let handlers = self.handlers.matching(path);
        if handlers.is_empty() {
            tracing::debug!(path, "no handler for request");
        }
        for handler in handlers {
            handler(path.to_string(), Arc::clone(&payload), Arc::clone(&store)).await;
        }
    }

    /// Whether a handler is registered under exactly `pattern`.
    pub fn has_handler(&self, pattern: &str) -> bool {
        self.handlers.has_pattern(pattern)
    }

    /// Whether any handler would match `path`.
    pub fn matches(&self, path: &str) -> bool {
        !self.handlers.matching(path).is_empty()
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Mutex;

    struct LoginReq {
        identifier: String,
    }

    impl Request for LoginReq {
        const PATH: &'static str = "auth/login";
    }

    fn test_store() -> Arc<StateStore> {
        Arc::new(StateStore::new())
    }

    // ========================================================================
    // Dispatch
    // ========================================================================

    #[tokio::test]
    async fn dispatch_exact_match() {
        let router = Router::new();
        let called = Arc::new(AtomicU64::new(0));
        let c = called.clone();
        router.on("auth/login", move |_, _, _| {
            let c = c.clone();
            async move {
                c.fetch_add(1, Ordering::Relaxed);
            }
        });

        router.dispatch("auth/login", Arc::new(()), test_store()).await;
        router.dispatch("auth/logout", Arc::new(()), test_store()).await;

        assert_eq!(called.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn wildcard_handlers_run_in_registration_order() {
        let router = Router::new();
        let order = Arc::new(Mutex::new(Vec::new()));
        for (pattern, tag) in [("auth/#", "multi"), ("auth/login", "exact"), ("+/login", "single")] {
            let o = order.clone();
            router.on(pattern, move |_, _, _| {
                let o = o.clone();
                async move {
                    o.lock().unwrap().push(tag);
                }
            });
        }

        router.dispatch("auth/login", Arc::new(()), test_store()).await;
        assert_eq!(*order.lock().unwrap(), vec!["multi", "exact", "single"]);
    }

    // ========================================================================
    // Typed requests
    // ========================================================================

    #[tokio::test]
    async fn on_request_receives_typed_payload() {
        let router = Router::new();
        router.on_request::<LoginReq, _, _>(|req, store| async move {
            store.set("auth/last", req.identifier.clone());
        });

        let store = test_store();
        router
            .dispatch(
                LoginReq::PATH,
                Arc::new(LoginReq {
                    identifier: "user@example.com".into(),
                }),
                Arc::clone(&store),
            )
            .await;

        let last = store.get("auth/last").unwrap();
        assert_eq!(last.downcast_ref::<String>().map(String::as_str), Some("user@example.com"));
    }

    #[tokio::test]
    async fn on_request_drops_mistyped_payload() {
        let router = Router::new();
        let called = Arc::new(AtomicU64::new(0));
        let c = called.clone();
        router.on_request::<LoginReq, _, _>(move |_, _| {
            let c = c.clone();
            async move {
                c.fetch_add(1, Ordering::Relaxed);
            }
        });

        router.dispatch(LoginReq::PATH, Arc::new(42u32), test_store()).await;
        assert_eq!(called.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn has_handler_and_matches() {
        let router = Router::new();
        router.on("profile/+", |_, _, _| async {});
        assert!(router.has_handler("profile/+"));
        assert!(!router.has_handler("profile/save"));
        assert!(router.matches("profile/save"));
        assert!(!router.matches("map/search"));
    }
}
