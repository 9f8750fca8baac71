use std::sync::Arc;

use prometheus::{Encoder, GaugeVec, Opts, Registry, TextEncoder, proto::MetricFamily};
use tracing::error;

use swex_core::{GaugeStore, Sample, ServiceGauge};
use swex_model::LABEL_SERVICE_NAME;

/// Prometheus gauge store for per-service signals.
///
/// Implements [`GaugeStore`] and exposes the gauges for scraping via [`PrometheusGauges::encode_text`].
///
/// ## Metrics
/// - `docker_swarm_service_desired_state{service_name}` - 1 when the service has a placement configuration
/// - `docker_swarm_service_running_count{service_name}` - tasks in the `running` state
///
/// ## Label cardinality
/// One series per gauge and service ever observed. Series are never removed,
/// so a deleted service keeps exporting its last values until restart.
#[derive(Clone)]
pub struct PrometheusGauges {
    desired_state: GaugeVec,
    running_count: GaugeVec,
    registry: Arc<Registry>,
}

impl PrometheusGauges {
    /// Create a new gauge store registering into the given registry.
    pub fn new_with_registry(registry: Arc<Registry>) -> Result<Self, prometheus::Error> {
        let desired_state = register_gauge(&registry, ServiceGauge::DesiredState)?;
        let running_count = register_gauge(&registry, ServiceGauge::RunningCount)?;

        Ok(Self {
            desired_state,
            running_count,
            registry,
        })
    }

    /// Create a new gauge store with its own registry.
    pub fn new() -> Result<Self, prometheus::Error> {
        Self::new_with_registry(Arc::new(Registry::new()))
    }

    /// Gather all metric families for exposition.
    pub fn gather(&self) -> Vec<MetricFamily> {
        self.registry.gather()
    }

    /// Encode all metrics in the Prometheus text exposition format.
    pub fn encode_text(&self) -> Result<String, prometheus::Error> {
        let families = self.gather();
        let mut buffer = Vec::new();

        TextEncoder::new()
            .encode(&families, &mut buffer)
            .inspect_err(|e| {
                error!(error = %e, families = families.len(), "prometheus text encoder failed")
            })?;

        String::from_utf8(buffer).map_err(|e| {
            prometheus::Error::Msg(format!("metrics exposition is not valid UTF-8: {e}"))
        })
    }

    /// Content type of [`PrometheusGauges::encode_text`] output.
    #[inline]
    pub fn format_type(&self) -> &'static str {
        prometheus::TEXT_FORMAT
    }

    /// Get reference to underlying prometheus registry.
    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    #[inline]
    fn vec_for(&self, gauge: ServiceGauge) -> &GaugeVec {
        match gauge {
            ServiceGauge::DesiredState => &self.desired_state,
            ServiceGauge::RunningCount => &self.running_count,
        }
    }
}

fn register_gauge(registry: &Registry, gauge: ServiceGauge) -> Result<GaugeVec, prometheus::Error> {
    let vec = GaugeVec::new(
        Opts::new(gauge.as_metric_name(), gauge.help()),
        &[LABEL_SERVICE_NAME],
    )?;
    registry.register(Box::new(vec.clone()))?;
    Ok(vec)
}

impl GaugeStore for PrometheusGauges {
    fn set_gauge(&self, gauge: ServiceGauge, service_name: &str, value: f64) {
        self.vec_for(gauge)
            .with_label_values(&[service_name])
            .set(value);
    }

    fn samples(&self) -> Vec<Sample> {
        let mut out = Vec::new();
        for family in self.gather() {
            let Some(gauge) = ServiceGauge::from_metric_name(family.name()) else {
                continue;
            };
            for metric in family.get_metric() {
                let Some(label) = metric
                    .get_label()
                    .iter()
                    .find(|l| l.name() == LABEL_SERVICE_NAME)
                else {
                    continue;
                };
                out.push(Sample {
                    gauge,
                    service_name: label.value().to_string(),
                    value: metric.get_gauge().value(),
                });
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn can_create_prometheus_gauges() {
        let _gauges = PrometheusGauges::new().expect("failed to create gauges");
    }

    #[test]
    fn unused_gauge_vecs_are_not_exported() {
        let gauges = PrometheusGauges::new().unwrap();
        assert!(gauges.gather().is_empty());
        assert!(gauges.samples().is_empty());
    }

    #[test]
    fn set_gauge_creates_one_series_per_service() {
        let gauges = PrometheusGauges::new().unwrap();

        gauges.set_gauge(ServiceGauge::DesiredState, "web", 1.0);
        gauges.set_gauge(ServiceGauge::DesiredState, "batch", 0.0);
        gauges.set_gauge(ServiceGauge::DesiredState, "web", 1.0);

        let families = gauges.gather();
        let desired = families
            .iter()
            .find(|f| f.name() == "docker_swarm_service_desired_state")
            .expect("metric not found");

        assert_eq!(desired.get_metric().len(), 2);
    }

    #[test]
    fn set_gauge_overwrites_value() {
        let gauges = PrometheusGauges::new().unwrap();

        gauges.set_gauge(ServiceGauge::RunningCount, "web", 5.0);
        gauges.set_gauge(ServiceGauge::RunningCount, "web", 2.0);

        let samples = gauges.samples();
        assert_eq!(
            samples,
            vec![Sample {
                gauge: ServiceGauge::RunningCount,
                service_name: "web".into(),
                value: 2.0,
            }]
        );
    }

    #[test]
    fn samples_cover_both_gauges() {
        let gauges = PrometheusGauges::new().unwrap();

        gauges.set_gauge(ServiceGauge::DesiredState, "web", 1.0);
        gauges.set_gauge(ServiceGauge::RunningCount, "web", 3.0);

        let mut samples = gauges.samples();
        samples.sort_by_key(|s| s.gauge);
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].gauge, ServiceGauge::DesiredState);
        assert_eq!(samples[0].value, 1.0);
        assert_eq!(samples[1].gauge, ServiceGauge::RunningCount);
        assert_eq!(samples[1].value, 3.0);
    }

    #[test]
    fn encode_text_produces_exposition_format() {
        let gauges = PrometheusGauges::new().unwrap();

        gauges.set_gauge(ServiceGauge::DesiredState, "web", 1.0);
        gauges.set_gauge(ServiceGauge::RunningCount, "web", 2.0);

        let body = gauges.encode_text().unwrap();
        assert!(body.contains("# TYPE docker_swarm_service_desired_state gauge"));
        assert!(body.contains(r#"docker_swarm_service_desired_state{service_name="web"} 1"#));
        assert!(body.contains(r#"docker_swarm_service_running_count{service_name="web"} 2"#));
        assert!(body.contains("# HELP docker_swarm_service_running_count Number of running tasks"));
    }

    #[test]
    fn label_values_are_not_normalized() {
        let gauges = PrometheusGauges::new().unwrap();

        gauges.set_gauge(ServiceGauge::DesiredState, "Web", 1.0);
        gauges.set_gauge(ServiceGauge::DesiredState, "web", 0.0);

        assert_eq!(gauges.samples().len(), 2);
    }

    #[test]
    fn can_use_custom_registry() {
        let registry = Arc::new(Registry::new());
        let gauges = PrometheusGauges::new_with_registry(registry.clone()).unwrap();

        gauges.set_gauge(ServiceGauge::RunningCount, "web", 1.0);
        assert!(!registry.gather().is_empty());
    }

    #[test]
    fn registering_twice_in_one_registry_fails() {
        let registry = Arc::new(Registry::new());
        let _first = PrometheusGauges::new_with_registry(registry.clone()).unwrap();

        assert!(PrometheusGauges::new_with_registry(registry).is_err());
    }
}
