mod dispatcher;
mod watcher;
mod watcher_registry;

pub use dispatcher::*;
pub use watcher::*;
pub use watcher_registry::*;
