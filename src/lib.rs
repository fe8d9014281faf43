mod config;
mod errors;
mod metrics;
mod query;
mod registry;

pub use config::*;
pub use errors::*;
pub use metrics::*;
pub use query::*;
pub use registry::*;

//-----------------------------------------------------------
// Test utils

#[cfg(test)]
pub mod test_utils;
//-----------------------------------------------------------
// Autometrics
/// autometrics: https://docs.autometrics.dev/rust/adding-alerts-and-slos
use autometrics::objectives::Objective;
use autometrics::objectives::ObjectiveLatency;
use autometrics::objectives::ObjectivePercentile;
const API_SLO: Objective = Objective::new("api")
    .success_rate(ObjectivePercentile::P99_9)
    .latency(ObjectiveLatency::Ms10, ObjectivePercentile::P99);
