use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OcrError {
    #[error("No file uploaded")]
    MissingFile,

    #[error("Empty filename")]
    EmptyFilename,

    #[error("{0}")]
    Multipart(#[from] MultipartError),

    #[error("Failed to decode image: {0}")]
    ImageDecode(String),

    #[error("Failed to encode image: {0}")]
    ImageEncode(String),

    /// The OCR service answered but reported a failure
    #[error("{0}")]
    Remote(String),

    #[error("{0}")]
    Transport(String),

    #[error("Malformed OCR response: {0}")]
    MalformedResponse(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<reqwest::Error> for OcrError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            OcrError::MalformedResponse(err.to_string())
        } else {
            OcrError::Transport(err.to_string())
        }
    }
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl OcrError {
    pub fn status(&self) -> StatusCode {
        match self {
            OcrError::MissingFile | OcrError::EmptyFilename => StatusCode::BAD_REQUEST,
            OcrError::Multipart(err) => err.status(),
            OcrError::ImageDecode(_)
            | OcrError::ImageEncode(_)
            | OcrError::Remote(_)
            | OcrError::Transport(_)
            | OcrError::MalformedResponse(_)
            | OcrError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for OcrError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::warn!("Extraction failed: {}", self);
        }

        let body = Json(ErrorResponse {
            error: self.to_string(),
        });

        (status, body).into_response()
    }
}
