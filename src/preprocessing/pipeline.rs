use crate::config::Config;
use crate::error::OcrError;
use std::time::Instant;

use super::steps;

/// Default upload size (bytes) above which images are downsized
pub const DEFAULT_RESIZE_THRESHOLD: usize = 2_000_000;
/// Default longest side (pixels) of a downsized image
pub const DEFAULT_MAX_SIDE: u32 = 1000;

/// Result of preprocessing an upload
#[derive(Debug, Clone)]
pub struct PreprocessingResult {
    /// Bytes to forward; identical to the input unless `resized` is set
    pub data: Vec<u8>,
    pub resized: bool,
    pub original_size: usize,
    pub total_time_ms: u64,
}

/// Decides whether an upload must be downsized and does so
#[derive(Debug, Clone)]
pub struct Pipeline {
    resize_threshold: usize,
    max_side: u32,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(DEFAULT_RESIZE_THRESHOLD, DEFAULT_MAX_SIDE)
    }
}

impl Pipeline {
    pub fn new(resize_threshold: usize, max_side: u32) -> Self {
        Self {
            resize_threshold,
            max_side,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.resize_threshold, config.max_side)
    }

    pub fn resize_threshold(&self) -> usize {
        self.resize_threshold
    }

    pub fn max_side(&self) -> u32 {
        self.max_side
    }

    /// Uploads at or under the threshold are returned unchanged
    pub fn process(&self, data: Vec<u8>) -> Result<PreprocessingResult, OcrError> {
        let start = Instant::now();
        let original_size = data.len();

        if original_size <= self.resize_threshold {
            return Ok(PreprocessingResult {
                data,
                resized: false,
                original_size,
                total_time_ms: 0,
            });
        }

        let data = steps::resize::apply(&data, self.max_side)?;

        Ok(PreprocessingResult {
            data,
            resized: true,
            original_size,
            total_time_ms: start.elapsed().as_millis() as u64,
        })
    }
}
