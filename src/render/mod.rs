//! CPU-side rendering module
//!
//! This module handles:
//! - Rasterizing catalog emoji into sticker pixels (sticker.rs)
//! - Flattening the composite canvas scene for export (compose.rs)

pub mod compose;
pub mod sticker;
