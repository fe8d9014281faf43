use std::fmt::Debug;

use nanoid::nanoid;
use tokio::sync::oneshot;

use crate::Result;
use crate::SubscriptionError;

/// Predicate deciding whether an incoming `(event, mark)` satisfies a watcher.
pub type WatchHook<E> = Box<dyn Fn(&E, &str) -> bool + Send + Sync>;

/// Unique watcher identifier, assigned at registration and used only for
/// removal and rejection.
pub type WatcherId = String;

/// A pending subscription request awaiting exactly one qualifying event.
///
/// Settlement consumes the oneshot sender, so a watcher can settle at most
/// once by construction.
pub(crate) struct Watcher<E> {
    pub(crate) id: WatcherId,
    pub(crate) hook: WatchHook<E>,
    pub(crate) tx: oneshot::Sender<Result<()>>,
}

impl<E> Debug for Watcher<E> {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("Watcher").field("id", &self.id).finish()
    }
}

impl<E> Watcher<E> {
    pub(crate) fn new(hook: WatchHook<E>) -> (Self, oneshot::Receiver<Result<()>>) {
        let (tx, rx) = oneshot::channel();
        (
            Self {
                id: nanoid!(),
                hook,
                tx,
            },
            rx,
        )
    }

    pub(crate) fn matches(
        &self,
        event: &E,
        mark: &str,
    ) -> bool {
        (self.hook)(event, mark)
    }

    pub(crate) fn resolve(self) {
        // The caller may have dropped its PendingWatch already
        let _ = self.tx.send(Ok(()));
    }

    pub(crate) fn reject(
        self,
        err: SubscriptionError,
    ) {
        let _ = self.tx.send(Err(err.into()));
    }
}

/// Caller's half of a tracked subscription.
#[derive(Debug)]
pub struct PendingWatch {
    pub(crate) id: WatcherId,
    pub(crate) path: String,
    pub(crate) rx: oneshot::Receiver<Result<()>>,
}

impl PendingWatch {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Await the settlement of this subscription.
    ///
    /// Resolution yields `Ok(())`; rejection and cancellation surface as
    /// [`SubscriptionError`]. A registry dropped without settling the watcher
    /// yields [`SubscriptionError::ChannelClosed`].
    pub async fn wait(self) -> Result<()> {
        match self.rx.await {
            Ok(result) => result,
            Err(_) => Err(SubscriptionError::ChannelClosed.into()),
        }
    }
}
