//! Docker Swarm orchestrator client.
//!
//! Talks to the Docker Engine HTTP API and implements [`swex_core::Orchestrator`]:
//! - `GET /services` for the service listing;
//! - `GET /tasks?filters={"service":["<id>"]}` for the per-service task listing.
//!
//! The engine is reached over its local socket (`unix://`, the default) or over
//! TCP (`tcp://`, `http://`, `https://`).
mod client;
pub use client::DockerClient;

mod config;
pub use config::{
    DEFAULT_DOCKER_HOST, DockerConfig, DockerEndpoint, ENV_DOCKER_API_VERSION, ENV_DOCKER_HOST,
};

mod wire;
