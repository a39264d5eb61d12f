//! Logs and metrics for the mock server.
//!
//! Logs are `tracing` events written to stderr (see `logging.rs`); stdout is
//! left to command output such as `generate` and `docs show`. Every HTTP
//! span carries the `x-request-id` of the call.
//!
//! Metrics (`metrics.rs`) record each simulated call, the size of the active
//! catalogue and document reloads. They cost nothing until the Prometheus
//! exporter is enabled in `[observability]`.

pub mod logging;
pub mod metrics;
