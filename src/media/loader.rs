//! Photo decoding and the bundled default background.

use std::path::Path;
use std::sync::Arc;

use iced::widget::image::Handle;
use image::{Rgba, RgbaImage};

use crate::error::MediaError;

/// Image file extensions the picker accepts.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif", "webp", "tiff"];

/// Dimensions of the generated default background (portrait, 3:4).
const DEFAULT_BACKGROUND_WIDTH: u32 = 960;
const DEFAULT_BACKGROUND_HEIGHT: u32 = 1280;

/// A picked photo, decoded once and shared between display and capture.
#[derive(Debug, Clone)]
pub struct LoadedPhoto {
    /// Where the photo came from.
    pub path: std::path::PathBuf,
    /// Decoded pixels, used by the capture pipeline.
    pub image: Arc<RgbaImage>,
    /// Display handle for the iced image/canvas widgets.
    pub handle: Handle,
}

/// Check if a path has a supported image extension.
pub fn is_supported(path: &Path) -> bool {
    path.extension()
        .map(|ext| {
            let ext = ext.to_string_lossy().to_lowercase();
            SUPPORTED_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// Decode a picked photo file into RGBA pixels plus a display handle.
pub fn load_photo(path: &Path) -> Result<LoadedPhoto, MediaError> {
    if !is_supported(path) {
        return Err(MediaError::UnsupportedFormat(
            path.file_name()
                .unwrap_or_default()
                .to_string_lossy()
                .to_string(),
        ));
    }

    let image = image::open(path)
        .map_err(|e| MediaError::Decode {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?
        .to_rgba8();

    println!(
        "🖼  Loaded photo {} ({}x{})",
        path.display(),
        image.width(),
        image.height()
    );

    let handle = handle_from_rgba(&image);

    Ok(LoadedPhoto {
        path: path.to_path_buf(),
        image: Arc::new(image),
        handle,
    })
}

/// Build an iced image handle from decoded RGBA pixels.
pub fn handle_from_rgba(image: &RgbaImage) -> Handle {
    Handle::from_rgba(image.width(), image.height(), image.as_raw().clone())
}

/// Generate the bundled default background: a soft vertical gradient.
///
/// Compiled-in behavior rather than a binary asset, so the default canvas
/// is always available without touching the filesystem.
pub fn default_background() -> RgbaImage {
    let (w, h) = (DEFAULT_BACKGROUND_WIDTH, DEFAULT_BACKGROUND_HEIGHT);
    let top = [36.0, 40.0, 84.0];
    let bottom = [92.0, 148.0, 170.0];

    RgbaImage::from_fn(w, h, |_x, y| {
        let t = y as f32 / (h - 1) as f32;
        let channel = |i: usize| (top[i] + (bottom[i] - top[i]) * t).round() as u8;
        Rgba([channel(0), channel(1), channel(2), 255])
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_extensions() {
        assert!(is_supported(Path::new("photo.JPG")));
        assert!(is_supported(Path::new("photo.png")));
        assert!(!is_supported(Path::new("notes.txt")));
        assert!(!is_supported(Path::new("no_extension")));
    }

    #[test]
    fn test_load_photo_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tiny.png");

        let img = RgbaImage::from_pixel(6, 4, Rgba([1, 2, 3, 255]));
        img.save(&path).unwrap();

        let photo = load_photo(&path).unwrap();
        assert_eq!(photo.image.width(), 6);
        assert_eq!(photo.image.height(), 4);
        assert_eq!(photo.path, path);
    }

    #[test]
    fn test_load_photo_rejects_unsupported_extension() {
        let err = load_photo(Path::new("whatever.docx")).unwrap_err();
        assert!(matches!(err, MediaError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_load_photo_reports_decode_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"definitely not a png").unwrap();

        let err = load_photo(&path).unwrap_err();
        assert!(matches!(err, MediaError::Decode { .. }));
    }

    #[test]
    fn test_default_background_is_portrait() {
        let bg = default_background();
        assert!(bg.height() > bg.width());

        // Gradient: top and bottom rows differ
        assert_ne!(bg.get_pixel(0, 0), bg.get_pixel(0, bg.height() - 1));
    }
}
