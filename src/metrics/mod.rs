use lazy_static::lazy_static;
use prometheus::{
    exponential_buckets, register_histogram_vec, HistogramVec, IntCounterVec, IntGaugeVec, Opts,
    Registry,
};

lazy_static! {
    pub static ref TRACKED_WATCHERS_METRIC: IntCounterVec = IntCounterVec::new(
        Opts::new("tracked_watchers", "tracked_watchers"),
        &["path"]
    )
    .expect("metric can not be created");

    pub static ref RESOLVED_WATCHERS_METRIC: IntCounterVec = IntCounterVec::new(
        Opts::new("resolved_watchers", "resolved_watchers"),
        &["path"]
    )
    .expect("metric can not be created");

    pub static ref REJECTED_WATCHERS_METRIC: IntCounterVec = IntCounterVec::new(
        Opts::new("rejected_watchers", "rejected_watchers"),
        &["path"]
    )
    .expect("metric can not be created");

    pub static ref CANCELLED_WATCHERS_METRIC: IntCounterVec = IntCounterVec::new(
        Opts::new("cancelled_watchers", "cancelled_watchers"),
        &["path"]
    )
    .expect("metric can not be created");

    pub static ref PENDING_WATCHERS_METRIC: IntGaugeVec = IntGaugeVec::new(
        Opts::new("pending_watchers", "pending_watchers"),
        &["path"]
    )
    .expect("metric can not be created");

    pub static ref DISPATCH_SCAN_DEPTH_METRIC: HistogramVec = register_histogram_vec!(
        "dispatch_scan_depth_metric",
        "Histogram of watchers scanned per dispatched event",
        &["path"],
        exponential_buckets(1.0, 2.0, 8).unwrap()
    )
    .expect("metric can not be created");
}

/// Register the crate's collectors into a caller-owned registry.
/// The embedding application owns the scrape endpoint.
pub fn register_custom_metrics(registry: &Registry) {
    registry
        .register(Box::new(TRACKED_WATCHERS_METRIC.clone()))
        .expect("collector can be registered");
    registry
        .register(Box::new(RESOLVED_WATCHERS_METRIC.clone()))
        .expect("collector can be registered");
    registry
        .register(Box::new(REJECTED_WATCHERS_METRIC.clone()))
        .expect("collector can be registered");
    registry
        .register(Box::new(CANCELLED_WATCHERS_METRIC.clone()))
        .expect("collector can be registered");
    registry
        .register(Box::new(PENDING_WATCHERS_METRIC.clone()))
        .expect("collector can be registered");
    registry
        .register(Box::new(DISPATCH_SCAN_DEPTH_METRIC.clone()))
        .expect("collector can be registered");
}
