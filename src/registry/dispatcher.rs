//! Event dispatch processor bridging an external transport to the registry.
//!
//! Transport producers push [`WatchCommand`]s into an mpsc channel; a single
//! background task drains it and drives the [`WatcherRegistry`]. The task
//! holds only a weak back-reference, so dropping the dispatcher tears the
//! loop down.

use std::fmt::Debug;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use tracing::trace;
use tracing::warn;

use super::WatcherRegistry;
use crate::DispatchConfig;
use crate::DispatchError;
use crate::Result;

/// Commands for the dispatch processor
pub enum WatchCommand<E> {
    /// Deliver an incoming event to the watchers at a path
    Deliver { path: String, mark: String, event: E },
    /// Reject every watcher at a path (subscription died)
    Fail { path: String, reason: String },
    /// Shutdown command processor
    Shutdown,
}

impl<E> Debug for WatchCommand<E> {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            Self::Deliver { path, mark, .. } => f
                .debug_struct("Deliver")
                .field("path", path)
                .field("mark", mark)
                .finish(),
            Self::Fail { path, reason } => f
                .debug_struct("Fail")
                .field("path", path)
                .field("reason", reason)
                .finish(),
            Self::Shutdown => f.debug_struct("Shutdown").finish(),
        }
    }
}

pub struct EventDispatcher<E> {
    registry: Arc<WatcherRegistry<E>>,
    command_sender: mpsc::Sender<WatchCommand<E>>,
    cancel_token: CancellationToken,
    processor_handle: Mutex<Option<JoinHandle<()>>>,
}

impl<E> Debug for EventDispatcher<E> {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("EventDispatcher").finish()
    }
}

impl<E> EventDispatcher<E>
where
    E: Send + 'static,
{
    pub fn new(
        registry: Arc<WatcherRegistry<E>>,
        config: &DispatchConfig,
    ) -> (Self, mpsc::Receiver<WatchCommand<E>>) {
        let (command_sender, command_receiver) = mpsc::channel(config.command_buffer_capacity);

        (
            Self {
                registry,
                command_sender,
                cancel_token: CancellationToken::new(),
                processor_handle: Mutex::new(None),
            },
            command_receiver,
        )
    }

    /// Start the command processor and return an Arc-wrapped instance
    pub fn start(
        self,
        receiver: mpsc::Receiver<WatchCommand<E>>,
    ) -> Arc<Self> {
        let arc_self = Arc::new(self);
        let weak_self = Arc::downgrade(&arc_self);
        let token = arc_self.cancel_token.clone();

        let handle = tokio::spawn(Self::command_processor(weak_self, receiver, token));
        *arc_self.processor_handle.lock() = Some(handle);

        arc_self
    }

    /// Queue an incoming `(path, event, mark)` triple for delivery
    pub async fn deliver(
        &self,
        path: impl Into<String>,
        mark: impl Into<String>,
        event: E,
    ) -> Result<()> {
        self.command_sender
            .send(WatchCommand::Deliver {
                path: path.into(),
                mark: mark.into(),
                event,
            })
            .await
            .map_err(|e| DispatchError::CommandSend(format!("Failed to send deliver command: {:?}", e)).into())
    }

    /// Queue a subscription failure; every watcher at the path gets rejected
    pub async fn fail(
        &self,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Result<()> {
        self.command_sender
            .send(WatchCommand::Fail {
                path: path.into(),
                reason: reason.into(),
            })
            .await
            .map_err(|e| DispatchError::CommandSend(format!("Failed to send fail command: {:?}", e)).into())
    }

    /// Stop the command processor
    pub async fn stop(&self) -> Result<()> {
        let _ = self.command_sender.send(WatchCommand::Shutdown).await;

        let handle = { self.processor_handle.lock().take() };
        if let Some(handle) = handle {
            handle.await.map_err(DispatchError::TaskFailed)?;
        }
        Ok(())
    }

    async fn command_processor(
        this: std::sync::Weak<Self>,
        mut receiver: mpsc::Receiver<WatchCommand<E>>,
        token: CancellationToken,
    ) {
        trace!("Starting watch command processor");
        loop {
            tokio::select! {
                _ = token.cancelled() => {
                    warn!("Watch command processor cancelled - dispatcher dropped");
                    break;
                }
                cmd = receiver.recv() => {
                    let Some(cmd) = cmd else {
                        break;
                    };
                    trace!("Received command: {:?}", cmd);
                    let Some(this) = this.upgrade() else {
                        warn!("Watch command processor shutting down - instance dropped");
                        break;
                    };

                    match cmd {
                        WatchCommand::Deliver { path, mark, event } => {
                            if this.registry.dispatch(&path, &event, &mark).is_none() {
                                trace!(%path, %mark, "delivered event matched no watcher");
                            }
                        }
                        WatchCommand::Fail { path, reason } => {
                            let count = this.registry.reject_all(&path, &reason);
                            debug!(%path, count, "rejected watchers on failed subscription");
                        }
                        WatchCommand::Shutdown => {
                            break;
                        }
                    }
                }
            }
        }
        trace!("Watch command processor shutting down");
    }
}

impl<E> Drop for EventDispatcher<E> {
    fn drop(&mut self) {
        self.cancel_token.cancel();
    }
}
