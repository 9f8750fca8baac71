use std::{fmt, path::PathBuf};

use swex_core::OrchestratorError;

/// Environment variable naming the engine endpoint.
pub const ENV_DOCKER_HOST: &str = "DOCKER_HOST";

/// Environment variable pinning the engine API version (e.g. `1.43`).
pub const ENV_DOCKER_API_VERSION: &str = "DOCKER_API_VERSION";

/// Endpoint used when `DOCKER_HOST` is unset or empty.
pub const DEFAULT_DOCKER_HOST: &str = "unix:///var/run/docker.sock";

/// Where the engine API is reachable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DockerEndpoint {
    /// Local socket path (e.g. `/var/run/docker.sock`).
    Unix(PathBuf),
    /// Base URL without trailing slash (e.g. `http://10.0.0.1:2375`).
    Http(String),
}

impl fmt::Display for DockerEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DockerEndpoint::Unix(path) => write!(f, "unix://{}", path.display()),
            DockerEndpoint::Http(url) => f.write_str(url),
        }
    }
}

/// Connection settings for the Docker Engine API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DockerConfig {
    pub endpoint: DockerEndpoint,
    /// API version prefix without the leading `v`; `None` lets the engine
    /// serve its own current version.
    pub api_version: Option<String>,
}

impl Default for DockerConfig {
    fn default() -> Self {
        Self {
            endpoint: DockerEndpoint::Unix(PathBuf::from("/var/run/docker.sock")),
            api_version: None,
        }
    }
}

impl DockerConfig {
    /// Build config from a `DOCKER_HOST`-style value and optional API version.
    pub fn new(host: &str, api_version: Option<&str>) -> Result<Self, OrchestratorError> {
        Ok(Self {
            endpoint: parse_host(host)?,
            api_version: api_version.map(parse_api_version).transpose()?.flatten(),
        })
    }

    /// Read config through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, OrchestratorError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup(ENV_DOCKER_HOST).unwrap_or_default();
        let version = lookup(ENV_DOCKER_API_VERSION);
        Self::new(&host, version.as_deref())
    }

    /// Request path for an API path such as `/services`, with the version prefix.
    pub fn api_path(&self, path: &str) -> String {
        match &self.api_version {
            Some(v) => format!("/v{v}{path}"),
            None => path.to_string(),
        }
    }
}

fn parse_host(host: &str) -> Result<DockerEndpoint, OrchestratorError> {
    let host = host.trim();
    if host.is_empty() {
        return parse_host(DEFAULT_DOCKER_HOST);
    }
    let missing = || OrchestratorError::Config(format!("{host}: missing address"));

    if let Some(path) = host.strip_prefix("unix://") {
        if path.is_empty() {
            return Err(missing());
        }
        return Ok(DockerEndpoint::Unix(PathBuf::from(path)));
    }

    let (scheme, rest) = if let Some(rest) = host.strip_prefix("tcp://") {
        ("http", rest)
    } else if let Some(rest) = host.strip_prefix("http://") {
        ("http", rest)
    } else if let Some(rest) = host.strip_prefix("https://") {
        ("https", rest)
    } else {
        return Err(OrchestratorError::Config(format!(
            "{host}: unsupported scheme (expected unix://, tcp://, http:// or https://)"
        )));
    };

    let rest = rest.trim_end_matches('/');
    if rest.is_empty() {
        return Err(missing());
    }
    Ok(DockerEndpoint::Http(format!("{scheme}://{rest}")))
}

fn parse_api_version(raw: &str) -> Result<Option<String>, OrchestratorError> {
    let v = raw.trim();
    let v = v.strip_prefix('v').unwrap_or(v);
    if v.is_empty() {
        return Ok(None);
    }
    let valid = v.split('.').count() == 2
        && v.split('.').all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()));
    if !valid {
        return Err(OrchestratorError::Config(format!(
            "invalid api version: {raw:?} (expected e.g. 1.43)"
        )));
    }
    Ok(Some(v.to_string()))
}
