//! Platform capability gateway.
//!
//! All ambient platform access (permission, photo picking, capture,
//! media-library writes, user-facing alerts) goes through the
//! [`MediaGateway`] trait so the application logic never talks to the
//! platform directly and tests can substitute a recording fake.

use std::path::{Path, PathBuf};

use chrono::Local;
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageLevel};

use crate::error::{CaptureError, MediaError};
use crate::media::loader;
use crate::render::compose::{self, Scene, CAPTURE_HEIGHT};

/// Severity of a user-facing alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertLevel {
    Info,
    Error,
}

/// Capability port for everything the editor needs from the platform.
///
/// Implementations must be `Send + Sync`: the gateway is shared with the
/// blocking pool where dialogs and compositing run.
pub trait MediaGateway: Send + Sync {
    /// Ask for media-library access. Callers treat this as fire-and-forget:
    /// a denial is logged but never blocks the pick flow.
    fn request_permission(&self) -> Result<(), MediaError>;

    /// Open the native photo browser restricted to images.
    /// Returns `None` when the user cancels.
    fn pick_image(&self) -> Option<PathBuf>;

    /// Flatten the composite canvas scene into a temporary image file and
    /// return its path.
    fn capture_region(&self, scene: &Scene) -> Result<PathBuf, CaptureError>;

    /// Persist a captured file into the media library; returns the
    /// destination path.
    fn write_to_library(&self, captured: &Path) -> Result<PathBuf, MediaError>;

    /// Show a blocking user-facing alert.
    fn alert(&self, level: AlertLevel, title: &str, body: &str);
}

// ============================================================================
// DesktopGateway
// ============================================================================

/// The real gateway: rfd dialogs, a Pictures-folder media library, and
/// CPU-side capture into the system temp directory.
pub struct DesktopGateway {
    export_dir: PathBuf,
}

impl DesktopGateway {
    /// Create a gateway writing into `export_override`, or into the default
    /// media library folder when no override is configured.
    pub fn new(export_override: Option<PathBuf>) -> Self {
        let export_dir = export_override.unwrap_or_else(Self::default_export_dir);
        println!("📁 Media library folder: {}", export_dir.display());
        Self { export_dir }
    }

    /// The media library folder:
    /// - Linux: ~/Pictures/Sticker Studio
    /// - macOS: ~/Pictures/Sticker Studio
    /// - Windows: %USERPROFILE%\Pictures\Sticker Studio
    /// Falls back to the home directory when no Pictures folder exists.
    fn default_export_dir() -> PathBuf {
        let mut path = dirs::picture_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(std::env::temp_dir);

        path.push("Sticker Studio");
        path
    }
}

impl MediaGateway for DesktopGateway {
    fn request_permission(&self) -> Result<(), MediaError> {
        std::fs::create_dir_all(&self.export_dir)
            .map_err(|e| MediaError::LibraryAccess(e.to_string()))
    }

    fn pick_image(&self) -> Option<PathBuf> {
        FileDialog::new()
            .set_title("Select a photo")
            .add_filter("Images", loader::SUPPORTED_EXTENSIONS)
            .pick_file()
    }

    fn capture_region(&self, scene: &Scene) -> Result<PathBuf, CaptureError> {
        let flattened = compose::flatten(scene, CAPTURE_HEIGHT)?;

        let path = std::env::temp_dir().join(format!(
            "sticker-studio-capture-{}.png",
            Local::now().format("%Y%m%d-%H%M%S%3f")
        ));

        flattened
            .save(&path)
            .map_err(|e| CaptureError::Encode(e.to_string()))?;

        println!(
            "📸 Captured canvas ({}x{}) to {}",
            flattened.width(),
            flattened.height(),
            path.display()
        );

        Ok(path)
    }

    fn write_to_library(&self, captured: &Path) -> Result<PathBuf, MediaError> {
        std::fs::create_dir_all(&self.export_dir)
            .map_err(|e| MediaError::LibraryAccess(e.to_string()))?;

        let dest = self.export_dir.join(format!(
            "sticker-{}.png",
            Local::now().format("%Y%m%d-%H%M%S%3f")
        ));

        std::fs::copy(captured, &dest).map_err(|e| MediaError::LibraryWrite(e.to_string()))?;

        println!("✅ Saved image to {}", dest.display());

        Ok(dest)
    }

    fn alert(&self, level: AlertLevel, title: &str, body: &str) {
        let level = match level {
            AlertLevel::Info => MessageLevel::Info,
            AlertLevel::Error => MessageLevel::Error,
        };

        let _ = MessageDialog::new()
            .set_level(level)
            .set_title(title)
            .set_description(body)
            .set_buttons(MessageButtons::Ok)
            .show();
    }
}

// ============================================================================
// FakeGateway (test double)
// ============================================================================

/// Recording fake for tests: scripted pick/capture outcomes, captured
/// write and alert calls.
#[cfg(test)]
pub struct FakeGateway {
    pub next_pick: std::sync::Mutex<Option<PathBuf>>,
    pub capture_result: std::sync::Mutex<Result<PathBuf, CaptureError>>,
    pub permission_error: Option<MediaError>,
    pub writes: std::sync::Mutex<Vec<PathBuf>>,
    pub alerts: std::sync::Mutex<Vec<(AlertLevel, String)>>,
}

#[cfg(test)]
impl Default for FakeGateway {
    fn default() -> Self {
        Self {
            next_pick: std::sync::Mutex::new(None),
            capture_result: std::sync::Mutex::new(Ok(PathBuf::from("/tmp/fake-capture.png"))),
            permission_error: None,
            writes: std::sync::Mutex::new(Vec::new()),
            alerts: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[cfg(test)]
impl FakeGateway {
    pub fn picking(path: PathBuf) -> Self {
        let fake = Self::default();
        *fake.next_pick.lock().unwrap() = Some(path);
        fake
    }

    pub fn failing_capture(reason: &str) -> Self {
        let fake = Self::default();
        *fake.capture_result.lock().unwrap() = Err(CaptureError::Render(reason.to_string()));
        fake
    }

    pub fn alert_titles(&self) -> Vec<(AlertLevel, String)> {
        self.alerts.lock().unwrap().clone()
    }
}

#[cfg(test)]
impl MediaGateway for FakeGateway {
    fn request_permission(&self) -> Result<(), MediaError> {
        match &self.permission_error {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }

    fn pick_image(&self) -> Option<PathBuf> {
        self.next_pick.lock().unwrap().take()
    }

    fn capture_region(&self, _scene: &Scene) -> Result<PathBuf, CaptureError> {
        self.capture_result.lock().unwrap().clone()
    }

    fn write_to_library(&self, captured: &Path) -> Result<PathBuf, MediaError> {
        self.writes.lock().unwrap().push(captured.to_path_buf());
        Ok(PathBuf::from("/fake/library").join(
            captured
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| "capture.png".to_string()),
        ))
    }

    fn alert(&self, level: AlertLevel, title: &str, _body: &str) {
        self.alerts
            .lock()
            .unwrap()
            .push((level, title.to_string()));
    }
}
