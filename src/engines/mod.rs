//! OCR engine implementations
//!
//! Text extraction is delegated to a remote service; this module holds the
//! clients that implement the OcrEngine trait for each supported service.

pub mod ocr_space;

use crate::config::Config;
use crate::engine::OcrEngine;
use crate::error::OcrError;
use std::sync::Arc;

/// Build the engine the server forwards uploads to
pub fn from_config(config: &Config) -> Result<Arc<dyn OcrEngine>, OcrError> {
    tracing::info!("Initializing ocr.space engine...");
    let engine = ocr_space::OcrSpaceEngine::new(config)?;
    tracing::info!("{} engine ready, endpoint {}", engine.name(), config.ocr_url);
    Ok(Arc::new(engine))
}
