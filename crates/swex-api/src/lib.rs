//! Scrape endpoint for the swarm service exporter.
//!
//! Serves `GET /metrics` from any [`MetricsSource`]; the source is injected,
//! never looked up globally.
mod error;
pub use error::ApiError;

mod handler;
pub use handler::MetricsSource;

mod http;
pub use http::{HttpApi, METRICS_PATH};
