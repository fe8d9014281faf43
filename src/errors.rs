//! Subscription Tracking Error Hierarchy
//!
//! Defines error types for the watcher registry and its event dispatch
//! pipeline, categorized by operational concerns.

use config::ConfigError;
use tokio::task::JoinError;

#[doc(hidden)]
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Settlement failures of a tracked subscription
    #[error(transparent)]
    Subscription(#[from] SubscriptionError),

    /// Event dispatch pipeline failures
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    /// Configuration validation failures
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Unrecoverable failures requiring process termination
    #[error("Fatal error: {0}")]
    Fatal(String),
}

#[derive(Debug, thiserror::Error)]
pub enum SubscriptionError {
    /// Pending operation settled by explicit removal
    #[error("Watcher {id} cancelled at path {path}")]
    Cancelled { path: String, id: String },

    /// Caller-requested rejection with an arbitrary reason
    #[error("Subscription rejected: {0}")]
    Rejected(String),

    /// The registry side was dropped without settling the watcher
    #[error("Watcher channel closed before settlement")]
    ChannelClosed,
}

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// Command channel transmission failures
    #[error("Failed to send dispatch command: {0}")]
    CommandSend(String),

    /// Processor task join failures
    #[error("Background task failed: {0}")]
    TaskFailed(#[from] JoinError),
}
