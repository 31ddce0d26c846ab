use crate::error::OcrError;
use async_trait::async_trait;

/// An image received from a client, ready to be forwarded
#[derive(Debug, Clone)]
pub struct Upload {
    pub filename: String,
    pub data: Vec<u8>,
}

/// OCR processing result
#[derive(Debug, Clone)]
pub struct OcrResult {
    pub text: String,
}

/// Trait that all OCR backends must implement
#[async_trait]
pub trait OcrEngine: Send + Sync {
    /// Returns the engine identifier (e.g., "ocr.space")
    fn name(&self) -> &'static str;

    /// Extract the text from an uploaded image
    async fn process(&self, upload: Upload) -> Result<OcrResult, OcrError>;
}
