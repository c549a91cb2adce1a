//! Editor session state: the background photo, the active sticker, and the
//! UI mode flags. Everything here is transient; nothing survives exit.

use std::path::PathBuf;
use std::sync::Arc;

use cgmath::Vector2;
use iced::widget::image::Handle;
use image::RgbaImage;

use crate::media::loader::{self, LoadedPhoto};
use crate::render::compose::{Placement, Scene, StickerLayer};
use crate::state::catalog::CatalogEntry;

// ============================================================================
// Mode flags
// ============================================================================

/// Which controls the home screen shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    /// Initial state: the choose/use-photo buttons are visible.
    Choosing,
    /// A background is locked in: sticker/save controls are visible.
    Editing,
}

/// In-flight async action. At most one runs at a time; a second trigger
/// while non-idle is rejected instead of racing the first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity {
    Idle,
    PickingPhoto,
    Exporting,
}

// ============================================================================
// Background and sticker references
// ============================================================================

/// Where the current background came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackgroundSource {
    /// The bundled default gradient.
    Default,
    /// A photo picked from the media library.
    Photo(PathBuf),
}

/// The currently displayed base photo. Exactly one is active at a time.
#[derive(Debug, Clone)]
pub struct Background {
    pub source: BackgroundSource,
    pub image: Arc<RgbaImage>,
    pub handle: Handle,
}

impl Background {
    /// The bundled default background.
    pub fn bundled_default() -> Self {
        let image = loader::default_background();
        let handle = loader::handle_from_rgba(&image);
        Self {
            source: BackgroundSource::Default,
            image: Arc::new(image),
            handle,
        }
    }

    fn from_photo(photo: LoadedPhoto) -> Self {
        Self {
            source: BackgroundSource::Photo(photo.path),
            handle: photo.handle,
            image: photo.image,
        }
    }
}

/// The sticker currently overlaid on the canvas. At most one at a time.
#[derive(Debug, Clone)]
pub struct ActiveSticker {
    pub emoji: &'static str,
    pub image: Arc<RgbaImage>,
    pub handle: Handle,
    pub placement: Placement,
}

// ============================================================================
// EditorState
// ============================================================================

/// All per-session editor state.
#[derive(Debug, Clone)]
pub struct EditorState {
    default_background: Background,
    pub background: Background,
    pub sticker: Option<ActiveSticker>,
    pub mode: EditorMode,
    pub picker_open: bool,
    pub activity: Activity,
}

impl EditorState {
    /// Fresh session showing the given default background in choosing mode.
    pub fn new(default_background: Background) -> Self {
        Self {
            background: default_background.clone(),
            default_background,
            sticker: None,
            mode: EditorMode::Choosing,
            picker_open: false,
            activity: Activity::Idle,
        }
    }

    // ---- Async activity guard ----

    pub fn is_idle(&self) -> bool {
        self.activity == Activity::Idle
    }

    /// Claim the activity slot. Returns `false` (and changes nothing) when
    /// another action is already in flight.
    pub fn begin(&mut self, activity: Activity) -> bool {
        if !self.is_idle() || activity == Activity::Idle {
            return false;
        }
        self.activity = activity;
        true
    }

    pub fn finish_activity(&mut self) {
        self.activity = Activity::Idle;
    }

    // ---- Background ----

    /// A photo pick completed: replace the background and enter editing mode.
    pub fn photo_picked(&mut self, photo: LoadedPhoto) {
        self.background = Background::from_photo(photo);
        self.mode = EditorMode::Editing;
    }

    /// Keep the bundled default background and enter editing mode.
    pub fn use_default(&mut self) {
        self.mode = EditorMode::Editing;
    }

    // ---- Sticker ----

    pub fn open_picker(&mut self) {
        self.picker_open = true;
    }

    pub fn close_picker(&mut self) {
        self.picker_open = false;
    }

    /// Activate a catalog sticker with a fresh centered placement and close
    /// the picker. Replaces any previous sticker.
    pub fn choose_sticker(&mut self, entry: &CatalogEntry) {
        self.sticker = Some(ActiveSticker {
            emoji: entry.emoji,
            image: entry.image.clone(),
            handle: entry.handle.clone(),
            placement: Placement::default(),
        });
        self.picker_open = false;
    }

    /// Drag delta from the canvas, normalized to background dimensions.
    pub fn move_sticker(&mut self, delta: Vector2<f32>) {
        if let Some(sticker) = &mut self.sticker {
            sticker.placement.nudge(delta);
        }
    }

    /// Wheel delta from the canvas.
    pub fn scale_sticker(&mut self, delta: f32) {
        if let Some(sticker) = &mut self.sticker {
            sticker.placement.rescale(delta);
        }
    }

    // ---- Reset ----

    /// Back to the initial state: default background, no sticker,
    /// choosing mode, picker closed.
    pub fn reset(&mut self) {
        self.background = self.default_background.clone();
        self.sticker = None;
        self.mode = EditorMode::Choosing;
        self.picker_open = false;
    }

    // ---- Capture snapshot ----

    /// Snapshot of the canvas contents for the capture pipeline.
    pub fn scene(&self) -> Scene {
        Scene {
            background: self.background.image.clone(),
            sticker: self.sticker.as_ref().map(|s| StickerLayer {
                image: s.image.clone(),
                placement: s.placement,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn tiny_background() -> Background {
        let image = RgbaImage::from_pixel(4, 4, Rgba([9, 9, 9, 255]));
        let handle = loader::handle_from_rgba(&image);
        Background {
            source: BackgroundSource::Default,
            image: Arc::new(image),
            handle,
        }
    }

    fn tiny_photo(name: &str) -> LoadedPhoto {
        let image = RgbaImage::from_pixel(2, 2, Rgba([1, 2, 3, 255]));
        LoadedPhoto {
            path: PathBuf::from(name),
            handle: loader::handle_from_rgba(&image),
            image: Arc::new(image),
        }
    }

    fn tiny_entry() -> CatalogEntry {
        let image = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 255, 255]));
        let handle = loader::handle_from_rgba(&image);
        CatalogEntry {
            emoji: "🦆",
            thumb: handle.clone(),
            image: Arc::new(image),
            handle,
        }
    }

    #[test]
    fn test_starts_in_choosing_mode() {
        let state = EditorState::new(tiny_background());
        assert_eq!(state.mode, EditorMode::Choosing);
        assert_eq!(state.background.source, BackgroundSource::Default);
        assert!(state.sticker.is_none());
        assert!(!state.picker_open);
        assert!(state.is_idle());
    }

    #[test]
    fn test_photo_picked_replaces_background_and_enters_editing() {
        let mut state = EditorState::new(tiny_background());
        state.photo_picked(tiny_photo("/photos/cat.png"));

        assert_eq!(state.mode, EditorMode::Editing);
        assert_eq!(
            state.background.source,
            BackgroundSource::Photo(PathBuf::from("/photos/cat.png"))
        );
    }

    #[test]
    fn test_use_default_keeps_bundled_background() {
        let mut state = EditorState::new(tiny_background());
        state.use_default();

        assert_eq!(state.mode, EditorMode::Editing);
        assert_eq!(state.background.source, BackgroundSource::Default);
    }

    #[test]
    fn test_choose_sticker_sets_one_and_closes_picker() {
        let mut state = EditorState::new(tiny_background());
        state.use_default();
        state.open_picker();
        assert!(state.picker_open);

        state.choose_sticker(&tiny_entry());

        let sticker = state.sticker.as_ref().expect("sticker should be active");
        assert_eq!(sticker.emoji, "🦆");
        assert_eq!(sticker.placement, Placement::default());
        assert!(!state.picker_open);
    }

    #[test]
    fn test_choosing_again_replaces_previous_sticker() {
        let mut state = EditorState::new(tiny_background());
        state.use_default();
        state.choose_sticker(&tiny_entry());
        state.move_sticker(Vector2::new(0.2, 0.2));

        state.choose_sticker(&tiny_entry());

        // Still exactly one sticker, with placement reset
        let sticker = state.sticker.as_ref().unwrap();
        assert_eq!(sticker.placement, Placement::default());
    }

    #[test]
    fn test_move_and_scale_without_sticker_are_noops() {
        let mut state = EditorState::new(tiny_background());
        state.move_sticker(Vector2::new(0.5, 0.5));
        state.scale_sticker(1.0);
        assert!(state.sticker.is_none());
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut state = EditorState::new(tiny_background());
        state.photo_picked(tiny_photo("/photos/dog.png"));
        state.choose_sticker(&tiny_entry());
        state.open_picker();

        state.reset();

        assert_eq!(state.mode, EditorMode::Choosing);
        assert_eq!(state.background.source, BackgroundSource::Default);
        assert!(state.sticker.is_none());
        assert!(!state.picker_open);
    }

    #[test]
    fn test_begin_rejects_concurrent_activity() {
        let mut state = EditorState::new(tiny_background());

        assert!(state.begin(Activity::PickingPhoto));
        assert!(!state.begin(Activity::Exporting));
        assert_eq!(state.activity, Activity::PickingPhoto);

        state.finish_activity();
        assert!(state.begin(Activity::Exporting));
    }

    #[test]
    fn test_begin_idle_is_rejected() {
        let mut state = EditorState::new(tiny_background());
        assert!(!state.begin(Activity::Idle));
        assert!(state.is_idle());
    }

    #[test]
    fn test_scene_snapshot_mirrors_state() {
        let mut state = EditorState::new(tiny_background());
        state.use_default();

        assert!(state.scene().sticker.is_none());

        state.choose_sticker(&tiny_entry());
        state.move_sticker(Vector2::new(0.1, -0.1));

        let scene = state.scene();
        let layer = scene.sticker.expect("scene should include the sticker");
        assert!((layer.placement.offset.x - 0.1).abs() < 1e-6);
        assert!((layer.placement.offset.y + 0.1).abs() < 1e-6);
    }
}
