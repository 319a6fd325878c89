//! Client for the remote image-analysis endpoint.
//!
//! One multipart `POST` per image, field `image`. The JSON reply is either a
//! success report or a backend-reported rejection; everything else is an
//! [`AnalysisError`].

use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::intake::UploadedFile;

/// Label the backend uses for synthetic images; drives the "fake" styling.
pub const AI_GENERATED_LABEL: &str = "AI-Generated";

pub const DEMO_FILE_NAME: &str = "demo.jpg";
pub const DEMO_FILE_MIME: &str = "image/jpeg";

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("response is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("malformed response: {0}")]
    Malformed(&'static str),
}

/// A successful classification.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    pub result: String,
    /// Probability in `[0, 1]` that `result` is correct.
    pub confidence: f64,
    pub explanation: String,
    /// Image reference, usually a `data:image/png;base64,...` URL.
    pub heatmap: String,
}

impl AnalysisReport {
    pub fn is_ai_generated(&self) -> bool {
        self.result == AI_GENERATED_LABEL
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisResponse {
    Success(AnalysisReport),
    /// Well-formed reply with `status != "success"`.
    Rejected { message: String },
}

#[derive(Deserialize)]
struct WireResponse {
    status: String,
    result: Option<String>,
    confidence: Option<f64>,
    explanation: Option<String>,
    heatmap: Option<String>,
    message: Option<String>,
}

/// Decode a response body.
pub fn parse_response(body: &str) -> Result<AnalysisResponse, AnalysisError> {
    let wire: WireResponse = serde_json::from_str(body)?;

    if wire.status != "success" {
        let message = wire
            .message
            .ok_or(AnalysisError::Malformed("error reply without message"))?;
        return Ok(AnalysisResponse::Rejected { message });
    }

    let report = AnalysisReport {
        result: wire.result.ok_or(AnalysisError::Malformed("missing result"))?,
        confidence: wire
            .confidence
            .ok_or(AnalysisError::Malformed("missing confidence"))?,
        explanation: wire
            .explanation
            .ok_or(AnalysisError::Malformed("missing explanation"))?,
        heatmap: wire.heatmap.ok_or(AnalysisError::Malformed("missing heatmap"))?,
    };
    Ok(AnalysisResponse::Success(report))
}

#[derive(Debug, Clone)]
pub struct AnalysisClient {
    http: Client,
    endpoint: String,
}

impl AnalysisClient {
    /// The inner `reqwest::Client` is pooled; clones share it.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Upload `file` and interpret the reply. No retries, no timeout beyond
    /// the transport's own.
    pub async fn analyze(&self, file: &UploadedFile) -> Result<AnalysisResponse, AnalysisError> {
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(&file.mime)?;
        let form = Form::new().part("image", part);

        info!(endpoint = %self.endpoint, name = %file.name, "submitting image");
        let response = self.http.post(&self.endpoint).multipart(form).send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!(%status, bytes = body.len(), "analysis reply received");

        let parsed = parse_response(&body);
        if let Err(err) = &parsed {
            warn!(%status, "unusable analysis reply: {err}");
        }
        parsed
    }

    /// Download the demo image and wrap it as `demo.jpg`.
    pub async fn fetch_demo(&self, url: &str) -> Result<UploadedFile, AnalysisError> {
        info!(%url, "fetching demo image");
        let bytes = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        Ok(UploadedFile::with_mime(
            DEMO_FILE_NAME,
            DEMO_FILE_MIME,
            bytes.to_vec(),
        ))
    }
}
