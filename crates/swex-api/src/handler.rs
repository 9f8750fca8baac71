use swex_prometheus::PrometheusGauges;

use crate::error::ApiError;

/// Anything that can render a scrape response body.
pub trait MetricsSource: Send + Sync + 'static {
    /// `Content-Type` of the rendered body.
    fn content_type(&self) -> &'static str;

    /// Render all current samples.
    fn render(&self) -> Result<String, ApiError>;
}

impl MetricsSource for PrometheusGauges {
    fn content_type(&self) -> &'static str {
        self.format_type()
    }

    fn render(&self) -> Result<String, ApiError> {
        self.encode_text().map_err(|e| ApiError::Encode(e.to_string()))
    }
}
