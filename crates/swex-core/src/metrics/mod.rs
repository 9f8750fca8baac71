//! Gauge store abstraction shared by the reconciler and the scrape endpoint.
//!
//! The reconciler only writes; exporters (prometheus, etc) implement [`GaugeStore`]
//! and are injected into both sides explicitly.
mod backend;
pub use backend::{GaugeHandle, GaugeStore, Sample, ServiceGauge};

mod memory;
pub use memory::MemoryGauges;

use std::sync::Arc;

/// Create an empty in-memory gauge store.
#[inline]
pub fn memory_gauges() -> Arc<MemoryGauges> {
    Arc::new(MemoryGauges::default())
}
