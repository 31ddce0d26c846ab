//! Image preprocessing applied before an upload is forwarded for OCR
//!
//! Large uploads are shrunk to a bounded size; everything else passes through
//! byte-for-byte.

pub mod pipeline;
pub mod steps;

pub use pipeline::Pipeline;
