//! End-to-end flow over the public API: configuration, registry, dispatcher.

use std::sync::Arc;

use pathwatch::Error;
use pathwatch::EventDispatcher;
use pathwatch::Settings;
use pathwatch::SubscriptionError;
use pathwatch::WatcherRegistry;

#[tokio::test]
async fn track_deliver_and_fail_round_trip() {
    let settings = Settings::default();
    settings.validate().expect("default settings are valid");

    let registry = Arc::new(WatcherRegistry::new(settings.registry.clone()));
    let (dispatcher, receiver) = EventDispatcher::new(registry.clone(), &settings.dispatch);
    let dispatcher = dispatcher.start(receiver);

    // A watcher waiting for its own confirmation event
    let confirmed = registry.track("/settings/desk", |event: &String, mark: &str| {
        mark == "settings-event" && event.contains("put")
    });
    // A watcher on a subscription the transport will kill
    let doomed = registry.track("/graph/updates", |_: &String, _: &str| true);

    // Unrelated events leave both watchers pending
    dispatcher
        .deliver("/settings/desk", "other-mark", "put-entry".to_string())
        .await
        .unwrap();

    dispatcher
        .deliver("/settings/desk", "settings-event", "put-entry".to_string())
        .await
        .unwrap();
    confirmed.wait().await.unwrap();

    dispatcher.fail("/graph/updates", "quit").await.unwrap();
    let err = doomed.wait().await.unwrap_err();
    assert!(matches!(
        err,
        Error::Subscription(SubscriptionError::Rejected(reason)) if reason == "quit"
    ));

    dispatcher.stop().await.unwrap();
    assert!(registry.is_empty());
}
