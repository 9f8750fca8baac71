use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::header,
    response::IntoResponse,
    routing::get,
};
use tracing::{trace, warn};

use crate::{error::ApiError, handler::MetricsSource};

/// Path of the scrape endpoint.
pub const METRICS_PATH: &str = "/metrics";

/// HTTP API service builder.
pub struct HttpApi<S> {
    source: Arc<S>,
}

impl<S> HttpApi<S>
where
    S: MetricsSource,
{
    /// Create new HTTP API over the given source.
    pub fn new(source: Arc<S>) -> Self {
        Self { source }
    }

    /// Build axum router with mounted endpoints.
    ///
    /// Routes:
    /// - GET /metrics - Prometheus text exposition of all samples
    pub fn router(self) -> Router {
        Router::new()
            .route(METRICS_PATH, get(scrape::<S>))
            .with_state(self.source)
    }
}

/// GET /metrics
async fn scrape<S>(State(source): State<Arc<S>>) -> Result<impl IntoResponse, ApiError>
where
    S: MetricsSource,
{
    let body = source.render().inspect_err(|e| warn!(error = %e, "scrape failed"))?;
    trace!(bytes = body.len(), "scrape served");

    Ok(([(header::CONTENT_TYPE, source.content_type())], body))
}
