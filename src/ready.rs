//! Document readiness.
//!
//! A render subscribes once and runs once: immediately when the document is
//! already complete, otherwise as soon as [`DocumentReady::fire`] is called.

use gallery_model::Fault;
use tokio::sync::watch;

#[derive(Debug)]
pub struct DocumentReady {
    tx: watch::Sender<bool>,
}

/// A single pending wait on a [`DocumentReady`]; consumed by [`ReadySubscription::wait`].
#[derive(Debug)]
pub struct ReadySubscription {
    rx: watch::Receiver<bool>,
}

impl DocumentReady {
    pub fn loading() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx }
    }

    pub fn complete() -> Self {
        let (tx, _rx) = watch::channel(true);
        Self { tx }
    }

    pub fn is_ready(&self) -> bool {
        *self.tx.borrow()
    }

    /// Mark the document ready. Returns `true` only for the call that changed it.
    pub fn fire(&self) -> bool {
        self.tx.send_if_modified(|ready| {
            if *ready {
                false
            } else {
                *ready = true;
                true
            }
        })
    }

    pub fn subscribe(&self) -> ReadySubscription {
        ReadySubscription {
            rx: self.tx.subscribe(),
        }
    }
}

impl ReadySubscription {
    /// Resolve once the document is ready.
    ///
    /// # Errors
    /// Faults at `wait_ready:30` when the signal is dropped without firing.
    pub async fn wait(mut self) -> Result<(), Fault> {
        self.rx
            .wait_for(|ready| *ready)
            .await
            .map(|_| ())
            .map_err(|_| {
                Fault::new(
                    "wait_ready",
                    30,
                    "document was discarded before it became ready",
                )
            })
    }
}
