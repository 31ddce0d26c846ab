//! OCR.space engine implementation
//!
//! Forwards images to the OCR.space parse API, or any endpoint speaking the
//! same protocol, and interprets its JSON reply. One request per upload, no
//! retries.

use crate::config::Config;
use crate::engine::{OcrEngine, OcrResult, Upload};
use crate::error::OcrError;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

/// `OCRExitCode` value reported when the image was parsed
const SUCCESS_EXIT_CODE: i64 = 1;
/// Used when a failed parse comes back without any error message
const UNKNOWN_ERROR: &str = "Unknown OCR error";

/// Reply body of the parse endpoint
#[derive(Debug, Deserialize)]
pub struct ParseResponse {
    #[serde(rename = "OCRExitCode", default)]
    pub exit_code: Option<i64>,

    #[serde(rename = "ParsedResults", default)]
    pub parsed_results: Option<Vec<ParsedResult>>,

    #[serde(rename = "ErrorMessage", default)]
    pub error_message: Option<ErrorMessage>,
}

#[derive(Debug, Deserialize)]
pub struct ParsedResult {
    #[serde(rename = "ParsedText", default)]
    pub text: Option<String>,
}

/// The service documents a list of messages but sometimes sends a bare string
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ErrorMessage {
    Many(Vec<String>),
    One(String),
}

impl ErrorMessage {
    pub fn first(&self) -> Option<&str> {
        match self {
            ErrorMessage::Many(messages) => messages.first().map(String::as_str),
            ErrorMessage::One(message) => Some(message.as_str()),
        }
    }
}

/// Turn a parse reply into the extracted text, or the service's own error
/// message when the exit code is anything but success
pub fn interpret(response: ParseResponse) -> Result<String, OcrError> {
    if response.exit_code != Some(SUCCESS_EXIT_CODE) {
        let message = response
            .error_message
            .as_ref()
            .and_then(ErrorMessage::first)
            .unwrap_or(UNKNOWN_ERROR);
        return Err(OcrError::Remote(message.to_string()));
    }

    Ok(response
        .parsed_results
        .unwrap_or_default()
        .into_iter()
        .next()
        .and_then(|result| result.text)
        .unwrap_or_default())
}

/// Client for the remote parse endpoint
pub struct OcrSpaceEngine {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    language: String,
    overlay_required: bool,
}

impl OcrSpaceEngine {
    pub fn new(config: &Config) -> Result<Self, OcrError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("ocr-relay-server/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| OcrError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: config.ocr_url.clone(),
            api_key: config.api_key.clone(),
            language: config.language.clone(),
            overlay_required: config.overlay_required,
        })
    }

    fn form(&self, upload: Upload) -> Form {
        let part = Part::bytes(upload.data).file_name(upload.filename);

        Form::new()
            .text("apikey", self.api_key.clone())
            .text("language", self.language.clone())
            .text("isOverlayRequired", self.overlay_required.to_string())
            .part("filename", part)
    }
}

#[async_trait]
impl OcrEngine for OcrSpaceEngine {
    fn name(&self) -> &'static str {
        "ocr.space"
    }

    async fn process(&self, upload: Upload) -> Result<OcrResult, OcrError> {
        let response = self
            .client
            .post(&self.endpoint)
            .multipart(self.form(upload))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        tracing::debug!("OCR service replied with HTTP {}: {}", status, body);

        let parsed: ParseResponse = serde_json::from_str(&body).map_err(|e| {
            OcrError::MalformedResponse(format!("{} (HTTP {})", e, status))
        })?;

        Ok(OcrResult {
            text: interpret(parsed)?,
        })
    }
}
