//! Path-keyed registry of pending subscription watchers.
//!
//! The registry is an owned, injectable value shared via `Arc`, never ambient
//! process-wide state. An external transport drives it with `(path, event,
//! mark)` triples; the first watcher at the path whose hook matches is
//! settled.

use std::sync::Arc;

use arc_swap::ArcSwap;
use autometrics::autometrics;
use dashmap::DashMap;
use tracing::debug;
use tracing::instrument;
use tracing::trace;
use tracing::warn;

use super::PendingWatch;
use super::Watcher;
use super::WatcherId;
use crate::RegistryConfig;
use crate::RemovePolicy;
use crate::SubscriptionError;
use crate::API_SLO;
use crate::CANCELLED_WATCHERS_METRIC;
use crate::DISPATCH_SCAN_DEPTH_METRIC;
use crate::PENDING_WATCHERS_METRIC;
use crate::REJECTED_WATCHERS_METRIC;
use crate::RESOLVED_WATCHERS_METRIC;
use crate::TRACKED_WATCHERS_METRIC;

pub struct WatcherRegistry<E> {
    // Insertion order preserved per path; a watcher lives under exactly the
    // path it was registered with
    paths: DashMap<String, Vec<Watcher<E>>>,
    config: ArcSwap<RegistryConfig>,
}

impl<E> std::fmt::Debug for WatcherRegistry<E> {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("WatcherRegistry")
            .field("paths", &self.paths.len())
            .finish()
    }
}

impl<E> WatcherRegistry<E> {
    pub fn new(config: RegistryConfig) -> Self {
        Self {
            paths: DashMap::new(),
            config: ArcSwap::from_pointee(config),
        }
    }

    /// Swap the active configuration; in-flight operations keep the snapshot
    /// they loaded.
    pub fn update_config(
        &self,
        config: RegistryConfig,
    ) {
        self.config.store(Arc::new(config));
    }

    /// Register a watcher under `path` and return the pending half.
    ///
    /// The hook runs while the path's entry lock is held, so it must stay a
    /// cheap pure predicate. There is no timeout: with no matching event and
    /// no removal the operation stays pending forever.
    pub fn track(
        &self,
        path: impl Into<String>,
        hook: impl Fn(&E, &str) -> bool + Send + Sync + 'static,
    ) -> PendingWatch {
        let path = path.into();
        let (watcher, rx) = Watcher::new(Box::new(hook));
        let id = watcher.id.clone();

        let pending = {
            let mut entry = self.paths.entry(path.clone()).or_default();
            entry.push(watcher);
            entry.len()
        };

        TRACKED_WATCHERS_METRIC.with_label_values(&[path.as_str()]).inc();
        PENDING_WATCHERS_METRIC
            .with_label_values(&[path.as_str()])
            .set(pending as i64);

        let threshold = self.config.load().pending_warn_threshold;
        if pending >= threshold {
            warn!(
                %path,
                pending,
                threshold,
                "pending watcher count crossed warn threshold; is the transport still delivering?"
            );
        }
        trace!(%path, %id, "tracked watcher");

        PendingWatch { id, path, rx }
    }

    /// Deliver an event to the watchers at `path`, in registration order.
    ///
    /// The first watcher whose hook matches is resolved, pruned from the list
    /// in the same critical section, and its id returned. Later watchers are
    /// untouched; a second event settles the next match, never an
    /// already-settled watcher.
    #[autometrics(objective = API_SLO)]
    pub fn dispatch(
        &self,
        path: &str,
        event: &E,
        mark: &str,
    ) -> Option<WatcherId> {
        let (settled, pending) = {
            let mut entry = self.paths.get_mut(path)?;
            let watchers = entry.value_mut();

            let position = watchers.iter().position(|w| w.matches(event, mark));
            DISPATCH_SCAN_DEPTH_METRIC
                .with_label_values(&[path])
                .observe(position.map_or(watchers.len(), |p| p + 1) as f64);

            match position {
                Some(i) => {
                    let watcher = watchers.remove(i);
                    let id = watcher.id.clone();
                    watcher.resolve();
                    (Some(id), watchers.len())
                }
                None => (None, watchers.len()),
            }
        };

        match settled {
            Some(id) => {
                RESOLVED_WATCHERS_METRIC.with_label_values(&[path]).inc();
                PENDING_WATCHERS_METRIC
                    .with_label_values(&[path])
                    .set(pending as i64);
                self.prune_if_empty(path);
                debug!(%path, %id, %mark, "resolved watcher");
                Some(id)
            }
            None => {
                trace!(%path, %mark, "no watcher matched delivered event");
                None
            }
        }
    }

    /// Remove the watcher with `id` from `path`.
    ///
    /// Under [`RemovePolicy::Cancel`] exactly the targeted watcher is dropped
    /// and settled with a cancellation error; every other watcher at the path
    /// is unaffected. [`RemovePolicy::Legacy`] reproduces the historical
    /// filter, which retains the match and drops everything else unsettled.
    #[instrument(skip(self))]
    pub fn remove(
        &self,
        path: &str,
        id: &str,
    ) -> bool {
        let policy = self.config.load().remove_policy;
        let removed = {
            let Some(mut entry) = self.paths.get_mut(path) else {
                return false;
            };
            let watchers = entry.value_mut();

            match policy {
                RemovePolicy::Cancel => match watchers.iter().position(|w| w.id == id) {
                    Some(i) => {
                        let watcher = watchers.remove(i);
                        watcher.reject(SubscriptionError::Cancelled {
                            path: path.to_string(),
                            id: id.to_string(),
                        });
                        CANCELLED_WATCHERS_METRIC.with_label_values(&[path]).inc();
                        true
                    }
                    None => false,
                },
                RemovePolicy::Legacy => {
                    let had = watchers.iter().any(|w| w.id == id);
                    watchers.retain(|w| w.id == id);
                    had
                }
            }
        };

        PENDING_WATCHERS_METRIC
            .with_label_values(&[path])
            .set(self.pending_count(path) as i64);
        self.prune_if_empty(path);
        debug!(%path, %id, ?policy, removed, "removed watcher");
        removed
    }

    /// Reject one pending watcher with an arbitrary reason.
    pub fn reject(
        &self,
        path: &str,
        id: &str,
        reason: impl Into<String>,
    ) -> bool {
        let rejected = {
            let Some(mut entry) = self.paths.get_mut(path) else {
                return false;
            };
            let watchers = entry.value_mut();
            match watchers.iter().position(|w| w.id == id) {
                Some(i) => {
                    let watcher = watchers.remove(i);
                    watcher.reject(SubscriptionError::Rejected(reason.into()));
                    true
                }
                None => false,
            }
        };

        if rejected {
            REJECTED_WATCHERS_METRIC.with_label_values(&[path]).inc();
            PENDING_WATCHERS_METRIC
                .with_label_values(&[path])
                .set(self.pending_count(path) as i64);
            self.prune_if_empty(path);
            debug!(%path, %id, "rejected watcher");
        }
        rejected
    }

    /// Reject and drain every watcher at `path` (subscription teardown).
    #[instrument(skip(self))]
    pub fn reject_all(
        &self,
        path: &str,
        reason: &str,
    ) -> usize {
        let Some((_, watchers)) = self.paths.remove(path) else {
            return 0;
        };
        let count = watchers.len();
        for watcher in watchers {
            watcher.reject(SubscriptionError::Rejected(reason.to_string()));
        }

        REJECTED_WATCHERS_METRIC
            .with_label_values(&[path])
            .inc_by(count as u64);
        PENDING_WATCHERS_METRIC.with_label_values(&[path]).set(0);
        debug!(%path, count, "rejected all watchers at path");
        count
    }

    pub fn pending_count(
        &self,
        path: &str,
    ) -> usize {
        self.paths.get(path).map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    fn prune_if_empty(
        &self,
        path: &str,
    ) {
        self.paths.remove_if(path, |_, watchers| watchers.is_empty());
    }
}
