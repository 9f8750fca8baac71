//! Prometheus gauge store for the swarm service exporter.
//!
//! This crate provides a [`PrometheusGauges`] implementation of [`swex_core::GaugeStore`]
//! backed by two `GaugeVec`s living in a registry owned by the store.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use swex_core::{GaugeStore, ServiceGauge};
//! use swex_prometheus::PrometheusGauges;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let gauges = Arc::new(PrometheusGauges::new()?);
//! gauges.set_gauge(ServiceGauge::RunningCount, "web", 2.0);
//!
//! let body = gauges.encode_text()?;
//! assert!(body.contains(r#"docker_swarm_service_running_count{service_name="web"} 2"#));
//! # Ok(())
//! # }
//! ```
//!
//! ## Metrics
//! - `docker_swarm_service_desired_state{service_name}` - Gauge
//! - `docker_swarm_service_running_count{service_name}` - Gauge
//!
//! ## HTTP Server
//! This crate does NOT serve `/metrics`; see `swex-api`.

mod backend;
pub use backend::PrometheusGauges;

pub use prometheus::{Encoder, Registry, TextEncoder};
