//! In-process orchestrator double for reconciler and scheduler tests.
use std::{
    collections::HashMap,
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;
use swex_model::{Placement, Service, ServiceId, Task, TaskState};

use crate::{error::OrchestratorError, orchestrator::Orchestrator};

#[derive(Default)]
pub(crate) struct FakeOrchestrator {
    /// `None` makes `list_services` fail.
    services: Mutex<Option<Vec<Service>>>,
    /// Missing entry lists no tasks; `None` makes `list_tasks` fail.
    tasks: Mutex<HashMap<ServiceId, Option<Vec<Task>>>>,
    service_calls: AtomicUsize,
    task_calls: AtomicUsize,
}

impl FakeOrchestrator {
    pub(crate) fn new() -> Self {
        Self {
            services: Mutex::new(Some(Vec::new())),
            ..Default::default()
        }
    }

    pub(crate) fn set_services(&self, services: Vec<Service>) {
        *self.services.lock().unwrap() = Some(services);
    }

    pub(crate) fn fail_services(&self) {
        *self.services.lock().unwrap() = None;
    }

    pub(crate) fn set_tasks(&self, service: &ServiceId, states: &[&str]) {
        let tasks = states
            .iter()
            .enumerate()
            .map(|(i, s)| Task::new(format!("{service}.{i}"), service.clone(), TaskState::from_wire(s)))
            .collect();
        self.tasks.lock().unwrap().insert(service.clone(), Some(tasks));
    }

    pub(crate) fn fail_tasks(&self, service: &ServiceId) {
        self.tasks.lock().unwrap().insert(service.clone(), None);
    }

    pub(crate) fn service_calls(&self) -> usize {
        self.service_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn task_calls(&self) -> usize {
        self.task_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Orchestrator for FakeOrchestrator {
    async fn list_services(&self) -> Result<Vec<Service>, OrchestratorError> {
        self.service_calls.fetch_add(1, Ordering::SeqCst);
        self.services
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| OrchestratorError::Transport("connection refused".into()))
    }

    async fn list_tasks(&self, service: &ServiceId) -> Result<Vec<Task>, OrchestratorError> {
        self.task_calls.fetch_add(1, Ordering::SeqCst);
        match self.tasks.lock().unwrap().get(service) {
            Some(Some(tasks)) => Ok(tasks.clone()),
            Some(None) => Err(OrchestratorError::Status {
                code: 500,
                message: format!("tasks for {service} unavailable"),
            }),
            None => Ok(Vec::new()),
        }
    }
}

pub(crate) fn sid(id: &str) -> ServiceId {
    ServiceId::new(id).unwrap()
}

pub(crate) fn placed(id: &str, name: &str) -> Service {
    Service::new(sid(id), name).with_placement(Placement::default())
}

pub(crate) fn unplaced(id: &str, name: &str) -> Service {
    Service::new(sid(id), name)
}
