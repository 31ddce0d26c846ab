//! Individual preprocessing steps

pub mod resize;
