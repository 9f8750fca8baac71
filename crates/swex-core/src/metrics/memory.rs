use std::{
    collections::BTreeMap,
    sync::{PoisonError, RwLock},
};

use crate::metrics::backend::{GaugeStore, Sample, ServiceGauge};

/// In-process gauge store backed by a read-write locked map.
///
/// Samples come back ordered by gauge kind, then by service name.
#[derive(Debug, Default)]
pub struct MemoryGauges {
    values: RwLock<BTreeMap<(ServiceGauge, String), f64>>,
}

impl MemoryGauges {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of `gauge{service_name}`, if it was ever written.
    pub fn get(&self, gauge: ServiceGauge, service_name: &str) -> Option<f64> {
        let guard = self.values.read().unwrap_or_else(PoisonError::into_inner);
        guard.get(&(gauge, service_name.to_string())).copied()
    }

    /// Number of stored samples.
    pub fn len(&self) -> usize {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl GaugeStore for MemoryGauges {
    fn set_gauge(&self, gauge: ServiceGauge, service_name: &str, value: f64) {
        let mut guard = self.values.write().unwrap_or_else(PoisonError::into_inner);
        guard.insert((gauge, service_name.to_string()), value);
    }

    fn samples(&self) -> Vec<Sample> {
        let guard = self.values.read().unwrap_or_else(PoisonError::into_inner);
        guard
            .iter()
            .map(|((gauge, name), value)| Sample {
                gauge: *gauge,
                service_name: name.clone(),
                value: *value,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, thread};

    use super::*;

    #[test]
    fn set_overwrites_instead_of_accumulating() {
        let gauges = MemoryGauges::new();
        gauges.set_gauge(ServiceGauge::RunningCount, "web", 3.0);
        gauges.set_gauge(ServiceGauge::RunningCount, "web", 1.0);

        assert_eq!(gauges.get(ServiceGauge::RunningCount, "web"), Some(1.0));
        assert_eq!(gauges.len(), 1);
    }

    #[test]
    fn labels_are_exact_strings() {
        let gauges = MemoryGauges::new();
        gauges.set_gauge(ServiceGauge::DesiredState, "web", 1.0);
        gauges.set_gauge(ServiceGauge::DesiredState, "Web", 0.0);

        assert_eq!(gauges.len(), 2);
        assert_eq!(gauges.get(ServiceGauge::DesiredState, "web"), Some(1.0));
        assert_eq!(gauges.get(ServiceGauge::DesiredState, "Web"), Some(0.0));
    }

    #[test]
    fn samples_are_ordered_by_gauge_then_name() {
        let gauges = MemoryGauges::new();
        gauges.set_gauge(ServiceGauge::RunningCount, "b", 2.0);
        gauges.set_gauge(ServiceGauge::DesiredState, "b", 1.0);
        gauges.set_gauge(ServiceGauge::DesiredState, "a", 0.0);

        let keys: Vec<_> = gauges
            .samples()
            .into_iter()
            .map(|s| (s.gauge, s.service_name))
            .collect();
        assert_eq!(
            keys,
            vec![
                (ServiceGauge::DesiredState, "a".to_string()),
                (ServiceGauge::DesiredState, "b".to_string()),
                (ServiceGauge::RunningCount, "b".to_string()),
            ]
        );
    }

    #[test]
    fn concurrent_writers_and_readers() {
        let gauges = Arc::new(MemoryGauges::new());

        let writers: Vec<_> = (0..4)
            .map(|i| {
                let g = Arc::clone(&gauges);
                thread::spawn(move || {
                    for n in 0..100 {
                        g.set_gauge(ServiceGauge::RunningCount, &format!("svc-{i}"), n as f64);
                    }
                })
            })
            .collect();
        let reader = {
            let g = Arc::clone(&gauges);
            thread::spawn(move || {
                for _ in 0..100 {
                    assert!(g.samples().len() <= 4);
                }
            })
        };

        for w in writers {
            w.join().unwrap();
        }
        reader.join().unwrap();

        assert_eq!(gauges.len(), 4);
        for i in 0..4 {
            assert_eq!(
                gauges.get(ServiceGauge::RunningCount, &format!("svc-{i}")),
                Some(99.0)
            );
        }
    }
}
