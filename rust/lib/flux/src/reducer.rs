//! Single-threaded reducer mailbox.
//!
//! Asynchronous work (provider calls, timers) never writes shared state
//! directly. It posts a message to a [`Mailbox`]; one tokio task owns the
//! [`Reducer`] and applies messages strictly one at a time, so each state
//! transition is atomic with respect to every other.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};

use crate::store::StateStore;

/// Owns transition state and applies messages to the store.
pub trait Reducer: Send + 'static {
    type Msg: Send + 'static;

    fn reduce(&mut self, msg: Self::Msg, store: &StateStore);
}

type Envelope<M> = (M, oneshot::Sender<()>);

/// Sending half of a running reducer.
///
/// Cloning is cheap; all clones feed the same reducer task.
pub struct Mailbox<M> {
    tx: mpsc::UnboundedSender<Envelope<M>>,
}

impl<M> Clone for Mailbox<M> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<M: Send + 'static> Mailbox<M> {
    /// Start a reducer task on the current tokio runtime.
    ///
    /// The task exits once every `Mailbox` clone has been dropped.
    pub fn spawn<R>(mut reducer: R, store: Arc<StateStore>) -> Self
    where
        R: Reducer<Msg = M>,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<Envelope<M>>();
        tokio::spawn(async move {
            while let Some((msg, ack)) = rx.recv().await {
                reducer.reduce(msg, &store);
                let _ = ack.send(());
            }
            tracing::debug!(reducer = std::any::type_name::<R>(), "reducer stopped");
        });
        Self { tx }
    }

    /// Post a message and wait until the reducer has applied it.
    pub async fn send(&self, msg: M) {
        let (ack_tx, ack_rx) = oneshot::channel();
        if self.tx.send((msg, ack_tx)).is_err() {
            tracing::warn!("reducer is gone, message dropped");
            return;
        }
        if ack_rx.await.is_err() {
            tracing::warn!("reducer stopped before applying message");
        }
    }
}
