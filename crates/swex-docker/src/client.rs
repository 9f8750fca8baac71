#[cfg(unix)]
use std::path::Path;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, trace, warn};

use swex_core::{Orchestrator, OrchestratorError};
use swex_model::{Service, ServiceId, Task};

use crate::{
    config::{DockerConfig, DockerEndpoint},
    wire::{WireError, WireService, WireTask},
};

const USER_AGENT: &str = concat!("swex/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
enum Transport {
    /// TCP endpoint through a pooled `reqwest` client.
    Http { http: Client, base_url: String },
    /// Local engine socket; one HTTP/1 connection per request.
    #[cfg(unix)]
    Unix { socket: std::path::PathBuf },
}

/// Docker Engine API client.
///
/// Cheap to clone; TCP connections are pooled and shared between clones.
#[derive(Debug, Clone)]
pub struct DockerClient {
    transport: Transport,
    config: DockerConfig,
}

impl DockerClient {
    /// Build a client for the given endpoint.
    ///
    /// Fails if the HTTP stack cannot be initialized, or for a socket
    /// endpoint on a platform without unix sockets.
    pub fn new(config: DockerConfig) -> Result<Self, OrchestratorError> {
        let transport = match &config.endpoint {
            DockerEndpoint::Http(base_url) => {
                let http = Client::builder()
                    .user_agent(USER_AGENT)
                    .build()
                    .map_err(|e| OrchestratorError::Config(format!("http client: {e}")))?;
                Transport::Http {
                    http,
                    base_url: base_url.clone(),
                }
            }
            #[cfg(unix)]
            DockerEndpoint::Unix(socket) => Transport::Unix {
                socket: socket.clone(),
            },
            #[cfg(not(unix))]
            DockerEndpoint::Unix(socket) => {
                return Err(OrchestratorError::Config(format!(
                    "unix://{}: unix sockets are not available on this platform",
                    socket.display()
                )));
            }
        };
        Ok(Self { transport, config })
    }

    async fn get_json<T>(&self, path: &str, query: &[(&str, String)]) -> Result<T, OrchestratorError>
    where
        T: DeserializeOwned,
    {
        let target = request_target(&self.config.api_path(path), query)?;
        trace!(endpoint = %self.config.endpoint, %target, "docker api request");

        let (status, body) = match &self.transport {
            Transport::Http { http, base_url } => http_get(http, base_url, &target).await?,
            #[cfg(unix)]
            Transport::Unix { socket } => unix_get(socket, &target).await?,
        };

        if !status.is_success() {
            return Err(status_error(status, &body));
        }
        serde_json::from_slice(&body).map_err(|e| OrchestratorError::Decode(format!("{path}: {e}")))
    }
}

/// Origin-form request target (`/v1.43/tasks?filters=...`) with encoded query.
fn request_target(path: &str, query: &[(&str, String)]) -> Result<String, OrchestratorError> {
    let url = Url::parse_with_params(&format!("http://docker{path}"), query)
        .map_err(|e| OrchestratorError::Config(format!("{path}: {e}")))?;
    Ok(match url.query() {
        Some(q) if !q.is_empty() => format!("{}?{q}", url.path()),
        _ => url.path().to_string(),
    })
}

fn transport_error(e: impl std::fmt::Display) -> OrchestratorError {
    OrchestratorError::Transport(e.to_string())
}

async fn http_get(http: &Client, base_url: &str, target: &str) -> Result<(StatusCode, Bytes), OrchestratorError> {
    let resp = http
        .get(format!("{base_url}{target}"))
        .send()
        .await
        .map_err(transport_error)?;
    let status = resp.status();
    let body = resp.bytes().await.map_err(transport_error)?;
    Ok((status, body))
}

#[cfg(unix)]
async fn unix_get(socket: &Path, target: &str) -> Result<(StatusCode, Bytes), OrchestratorError> {
    use http_body_util::{BodyExt, Empty};
    use hyper::{Request, header};
    use hyper_util::rt::TokioIo;

    let stream = tokio::net::UnixStream::connect(socket)
        .await
        .map_err(|e| OrchestratorError::Transport(format!("{}: {e}", socket.display())))?;
    let (mut sender, conn) = hyper::client::conn::http1::handshake(TokioIo::new(stream))
        .await
        .map_err(transport_error)?;
    tokio::spawn(async move {
        if let Err(e) = conn.await {
            debug!(error = %e, "docker socket connection closed");
        }
    });

    let req = Request::get(target)
        .header(header::HOST, "docker")
        .header(header::USER_AGENT, USER_AGENT)
        .body(Empty::<Bytes>::new())
        .map_err(transport_error)?;
    let resp = sender.send_request(req).await.map_err(transport_error)?;
    let status = resp.status();
    let body = resp
        .into_body()
        .collect()
        .await
        .map_err(transport_error)?
        .to_bytes();
    Ok((status, body))
}

fn status_error(status: StatusCode, body: &[u8]) -> OrchestratorError {
    let message = match serde_json::from_slice::<WireError>(body) {
        Ok(err) => err.message,
        Err(_) => String::from_utf8_lossy(body).trim().to_string(),
    };
    OrchestratorError::Status {
        code: status.as_u16(),
        message,
    }
}

/// `filters` query value selecting the tasks of one service.
fn service_filter(service: &ServiceId) -> String {
    serde_json::json!({ "service": [service.as_str()] }).to_string()
}

/// Decode listing entries one by one; malformed entries are logged and dropped.
fn decode_entries<W, T>(kind: &'static str, entries: Vec<Value>) -> Vec<T>
where
    W: DeserializeOwned,
    T: TryFrom<W, Error = OrchestratorError>,
{
    entries
        .into_iter()
        .filter_map(|raw| {
            let id = raw
                .get("ID")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            let decoded = serde_json::from_value::<W>(raw)
                .map_err(|e| OrchestratorError::Decode(format!("{kind} {id}: {e}")))
                .and_then(T::try_from);
            match decoded {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!(kind, id = %id, error = %e, "skipping malformed listing entry");
                    None
                }
            }
        })
        .collect()
}

#[async_trait]
impl Orchestrator for DockerClient {
    async fn list_services(&self) -> Result<Vec<Service>, OrchestratorError> {
        let raw: Vec<Value> = self.get_json("/services", &[]).await?;
        debug!(count = raw.len(), "listed services");
        Ok(decode_entries::<WireService, Service>("service", raw))
    }

    async fn list_tasks(&self, service: &ServiceId) -> Result<Vec<Task>, OrchestratorError> {
        let query = [("filters", service_filter(service))];
        let raw: Vec<Value> = self.get_json("/tasks", &query).await?;
        trace!(service = %service, count = raw.len(), "listed tasks");
        Ok(decode_entries::<WireTask, Task>("task", raw))
    }
}
