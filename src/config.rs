use crate::Args;

pub const DEFAULT_OCR_URL: &str = "https://api.ocr.space/parse/image";

/// Server configuration, read once at startup and never mutated
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub api_key: String,
    pub ocr_url: String,
    pub language: String,
    pub overlay_required: bool,
    pub resize_threshold: usize,
    pub max_side: u32,
    pub max_file_size: usize,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            api_key: args.api_key,
            ocr_url: args.ocr_url,
            language: args.language,
            overlay_required: false,
            resize_threshold: args.resize_threshold,
            max_side: args.max_side,
            max_file_size: args.max_file_size,
        }
    }
}

#[cfg(test)]
impl Config {
    /// Defaults matching the CLI, pointed at the given endpoint
    pub fn for_tests(ocr_url: &str) -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 0,
            api_key: "test-key".to_string(),
            ocr_url: ocr_url.to_string(),
            language: "eng".to_string(),
            overlay_required: false,
            resize_threshold: 2_000_000,
            max_side: 1000,
            max_file_size: 52_428_800,
        }
    }
}
