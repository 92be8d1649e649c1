// Detection API client
// Serializes a staged file into a multipart upload against the remote
// detection service and parses the classification response.

use crate::models::{DetectionReport, DetectionRequest};
use crate::services::config_store::AppConfig;
use crate::services::detection::endpoints::{EndpointTable, DETECT_FIELD_NAME};
use reqwest::{multipart, Client};
use std::env;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum DetectionError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("detection service error: {status} - {message}")]
    Api { status: u16, message: String },
    #[error("JSON parse error: {0}")]
    Json(String),
}

pub struct DetectionClient {
    client: Client,
    base_url: String,
    endpoints: EndpointTable,
}

impl DetectionClient {
    /// Build a client from configuration. `ECHOMARK_API_URL` overrides the
    /// configured base URL. The timeout bounds every call made through this
    /// client; a timed-out request surfaces as a transport failure.
    pub fn new(config: &AppConfig) -> Result<Self, DetectionError> {
        let mut builder =
            Client::builder().timeout(Duration::from_millis(config.request_timeout_ms));
        if let Some(proxy_url) = config.proxy_url() {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        }
        let client = builder.build()?;

        let base_url = env::var("ECHOMARK_API_URL").unwrap_or_else(|_| config.base_url.clone());

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            endpoints: config.endpoints.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Submit one detection request: a multipart POST with the file bytes
    /// under the `file` field. Owns no state across calls.
    pub async fn submit(
        &self,
        request: DetectionRequest,
    ) -> Result<DetectionReport, DetectionError> {
        let url = format!("{}{}", self.base_url, self.endpoints.path_for(request.mode));

        let part = multipart::Part::bytes(request.bytes)
            .file_name(request.file_name.clone())
            .mime_str(&request.media_type)?;
        let form = multipart::Form::new().part(DETECT_FIELD_NAME, part);

        info!(
            request_id = %request.id,
            mode = %request.mode,
            file = %request.file_name,
            "detect.submit"
        );

        let start = Instant::now();
        let response = self.client.post(&url).multipart(form).send().await?;
        let latency_ms = start.elapsed().as_millis() as i64;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!(
                request_id = %request.id,
                status = status.as_u16(),
                latency_ms,
                "detect.failed"
            );
            return Err(DetectionError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| DetectionError::Json(e.to_string()))?;

        info!(request_id = %request.id, latency_ms, "detect.response");

        Ok(DetectionReport {
            request_id: request.id,
            mode: request.mode,
            payload,
            latency_ms,
        })
    }

    /// Probe the service's welcome endpoint.
    pub async fn ping(&self) -> Result<(), DetectionError> {
        let url = format!("{}/", self.base_url);
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(DetectionError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(())
    }
}
