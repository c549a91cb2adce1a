//! Error types for media access and capture.
//!
//! Failures are surfaced to the user only at the two handler boundaries
//! (pick completion, export completion); everything below propagates with `?`.

use thiserror::Error;

/// Errors from the media library side: permissions, picking, writing.
///
/// Variants carry plain strings so the error can cross the async boundary
/// inside a cloneable message.
#[derive(Debug, Clone, Error)]
pub enum MediaError {
    /// The picked file does not have a recognized image extension.
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// The picked file could not be decoded into pixels.
    #[error("could not decode {path}: {reason}")]
    Decode { path: String, reason: String },

    /// The media library directory could not be created or entered.
    #[error("could not access the media library: {0}")]
    LibraryAccess(String),

    /// The captured file could not be written into the media library.
    #[error("could not save into the media library: {0}")]
    LibraryWrite(String),
}

/// Errors while flattening the composite canvas into an image file.
#[derive(Debug, Clone, Error)]
pub enum CaptureError {
    /// The scene cannot be rendered (e.g. a zero-sized background).
    #[error("could not render the composite: {0}")]
    Render(String),

    /// The flattened image could not be encoded/saved to disk.
    #[error("could not write the captured image: {0}")]
    Encode(String),
}

/// Errors while turning a catalog emoji into sticker pixels.
#[derive(Debug, Clone, Error)]
pub enum StickerRenderError {
    /// The emoji has no glyph in the bundled Twemoji set.
    #[error("emoji {0:?} is not in the bundled sticker set")]
    UnknownEmoji(String),

    /// The bundled SVG failed to parse.
    #[error("could not parse sticker vector data for {emoji:?}: {reason}")]
    InvalidSvg { emoji: String, reason: String },

    /// No pixel buffer could be allocated at the requested size.
    #[error("could not rasterize sticker at {0} px")]
    Rasterize(u32),
}
