//! Flux: state engine for the SafeSpot app.
//!
//! Rust owns all state and logic; the platform UI only renders it.
//!
//! # Primitives
//!
//! - `get(path)` / `read::<S>()`: read state, Arc zero-copy
//! - `emit(path, payload)` / `request(req)`: send a request, pattern-routed
//!   to handler(s)
//! - `subscribe(pattern)`: observe state changes
//!
//! # Paths
//!
//! State and requests share one flat namespace with `/` separators:
//! `auth/state`, `auth/validation`, `map/state`, `app/route`.
//! Patterns use MQTT-style wildcards: `auth/+` (one level), `map/#`
//! (any levels), `#` (everything).
//!
//! # Transitions
//!
//! Work that completes asynchronously posts messages to a
//! [`reducer::Mailbox`], whose single task applies them in order.

pub mod app;
pub mod i18n;
pub mod reducer;
pub mod router;
pub mod store;
pub mod topic;
pub mod value;

pub use app::Flux;
pub use i18n::{Catalog, I18nHandler, I18nStore, QueryParams};
pub use reducer::{Mailbox, Reducer};
pub use router::{BoxFuture, Payload, Router};
pub use store::{ChangeHandler, StateStore};
pub use value::{Request, State, StateValue, SubscriptionId};
