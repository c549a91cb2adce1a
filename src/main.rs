use iced::widget::{button, column, container, row, text};
use iced::{Element, Length, Task, Theme};
use std::path::PathBuf;
use std::sync::Arc;

// Declare the application modules
mod error;
mod media;
mod render;
mod state;
mod ui;

use media::gateway::{AlertLevel, DesktopGateway, MediaGateway};
use media::loader::{self, LoadedPhoto};
use render::compose::Scene;
use state::catalog::StickerCatalog;
use state::editor::{Activity, Background, EditorMode, EditorState};
use state::settings::{Settings, ThemeChoice};

/// The two statically declared tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Home,
    About,
}

impl Screen {
    const ALL: [Screen; 2] = [Screen::Home, Screen::About];

    fn title(self) -> &'static str {
        match self {
            Screen::Home => "Sticker",
            Screen::About => "About",
        }
    }

    /// Tab glyph: filled when the tab has focus, outline otherwise.
    fn icon(self, focused: bool) -> &'static str {
        match (self, focused) {
            (Screen::Home, true) => "●",
            (Screen::Home, false) => "○",
            (Screen::About, true) => "◆",
            (Screen::About, false) => "◇",
        }
    }
}

/// Result of the photo pick flow.
#[derive(Debug, Clone)]
enum PickOutcome {
    /// A photo was picked and decoded.
    Picked(LoadedPhoto),
    /// The user dismissed the photo browser.
    Cancelled,
    /// The picked file could not be used.
    Failed(String),
}

/// Main application state
struct StickerStudio {
    /// Which tab is focused
    screen: Screen,
    /// The editor session: background, sticker, mode flags
    editor: EditorState,
    /// The fixed sticker catalog
    catalog: StickerCatalog,
    /// Persisted preferences
    settings: Settings,
    /// Platform capability gateway (dialogs, capture, media library)
    gateway: Arc<dyn MediaGateway>,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// User focused a tab
    ScreenSelected(Screen),
    /// User clicked "Choose a photo"
    ChoosePhoto,
    /// User clicked "Use this photo" (keep the default background)
    UseDefaultPhoto,
    /// The pick flow finished
    PhotoPicked(PickOutcome),
    /// User clicked "Add sticker"
    OpenStickerPicker,
    /// User dismissed the sticker picker
    CloseStickerPicker,
    /// User selected a catalog sticker
    StickerChosen(usize),
    /// Canvas drag, normalized to the photo rectangle
    StickerMoved(cgmath::Vector2<f32>),
    /// Canvas wheel delta
    StickerScaled(f32),
    /// User clicked "Reset"
    Reset,
    /// User clicked "Save"
    SaveImage,
    /// The export flow finished
    ExportFinished(Result<PathBuf, String>),
}

impl StickerStudio {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let settings = Settings::load_or_init();
        let gateway: Arc<dyn MediaGateway> =
            Arc::new(DesktopGateway::new(settings.export_dir.clone()));

        // If the bundled set fails to rasterize the binary is broken,
        // so there is nothing sensible to fall back to.
        let catalog = StickerCatalog::load();
        let editor = EditorState::new(Background::bundled_default());

        println!("🎨 Sticker Studio initialized with {} stickers", catalog.len());

        (
            StickerStudio {
                screen: Screen::Home,
                editor,
                catalog,
                settings,
                gateway,
                status: "Ready. Pick a photo to get started.".to_string(),
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::ScreenSelected(screen) => {
                self.screen = screen;
                Task::none()
            }

            Message::ChoosePhoto => {
                if !self.editor.begin(Activity::PickingPhoto) {
                    println!("⏳ Ignoring photo pick: another operation is in progress");
                    self.status = "Hold on, still working on the previous action…".to_string();
                    return Task::none();
                }

                self.status = "Opening the photo browser…".to_string();

                Task::perform(pick_photo(self.gateway.clone()), Message::PhotoPicked)
            }

            Message::PhotoPicked(outcome) => {
                self.editor.finish_activity();

                match outcome {
                    PickOutcome::Picked(photo) => {
                        let name = photo
                            .path
                            .file_name()
                            .map(|n| n.to_string_lossy().to_string())
                            .unwrap_or_else(|| photo.path.display().to_string());
                        self.status = format!("Loaded {name}. Add a sticker!");
                        self.editor.photo_picked(photo);
                    }
                    PickOutcome::Cancelled => {
                        self.status = "Photo selection cancelled.".to_string();
                    }
                    PickOutcome::Failed(reason) => {
                        self.status = format!("Could not load photo: {reason}");
                    }
                }

                Task::none()
            }

            Message::UseDefaultPhoto => {
                self.editor.use_default();
                self.status = "Using the default background. Add a sticker!".to_string();
                Task::none()
            }

            Message::OpenStickerPicker => {
                self.editor.open_picker();
                Task::none()
            }

            Message::CloseStickerPicker => {
                self.editor.close_picker();
                Task::none()
            }

            Message::StickerChosen(index) => {
                if let Some(entry) = self.catalog.get(index) {
                    self.editor.choose_sticker(entry);
                    self.status =
                        format!("{} added. Drag to move it, scroll to resize it.", entry.emoji);
                }
                Task::none()
            }

            Message::StickerMoved(delta) => {
                self.editor.move_sticker(delta);
                Task::none()
            }

            Message::StickerScaled(delta) => {
                self.editor.scale_sticker(delta);
                Task::none()
            }

            Message::Reset => {
                self.editor.reset();
                self.status = "Canvas reset.".to_string();
                Task::none()
            }

            Message::SaveImage => {
                if self.editor.mode != EditorMode::Editing {
                    return Task::none();
                }

                if !self.editor.begin(Activity::Exporting) {
                    println!("⏳ Ignoring save: another operation is in progress");
                    self.status = "Hold on, still working on the previous action…".to_string();
                    return Task::none();
                }

                self.status = "Saving your creation…".to_string();

                Task::perform(
                    export_scene(self.gateway.clone(), self.editor.scene()),
                    Message::ExportFinished,
                )
            }

            Message::ExportFinished(result) => {
                self.editor.finish_activity();

                match result {
                    Ok(path) => {
                        println!("📊 Export complete: {}", path.display());
                        self.status = format!("Saved to {}.", path.display());
                    }
                    Err(reason) => {
                        self.status = format!("Save failed: {reason}");
                    }
                }

                Task::none()
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let body: Element<Message> = match self.screen {
            Screen::Home => ui::home::view(&self.editor, &self.catalog, &self.status),
            Screen::About => ui::about::view(),
        };

        let tabs: Vec<Element<Message>> = Screen::ALL
            .iter()
            .map(|screen| {
                let focused = *screen == self.screen;
                let label = row![text(screen.icon(focused)), text(screen.title())].spacing(6);

                button(container(label).center_x(Length::Fill))
                    .style(if focused {
                        button::primary
                    } else {
                        button::text
                    })
                    .padding(10)
                    .width(Length::Fill)
                    .on_press(Message::ScreenSelected(*screen))
                    .into()
            })
            .collect();

        column![
            container(body).width(Length::Fill).height(Length::Fill),
            row(tabs).spacing(4),
        ]
        .into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        match self.settings.theme {
            ThemeChoice::Dark => Theme::Dark,
            ThemeChoice::Light => Theme::Light,
        }
    }
}

fn main() -> iced::Result {
    iced::application("Sticker Studio", StickerStudio::update, StickerStudio::view)
        .theme(StickerStudio::theme)
        .window_size((420.0, 780.0))
        .centered()
        .run_with(StickerStudio::new)
}

/// Async photo pick flow: permission, native browser, decode.
/// Runs on the blocking pool so the dialog never stalls the UI thread.
async fn pick_photo(gateway: Arc<dyn MediaGateway>) -> PickOutcome {
    let result = tokio::task::spawn_blocking(move || {
        // Fire-and-forget: a denied permission is logged, not fatal
        if let Err(e) = gateway.request_permission() {
            eprintln!("⚠️  Media library permission not granted: {e}");
        }

        match gateway.pick_image() {
            None => {
                println!("🚫 Photo selection cancelled");
                gateway.alert(
                    AlertLevel::Info,
                    "No photo selected",
                    "You did not select any photo.",
                );
                PickOutcome::Cancelled
            }
            Some(path) => match loader::load_photo(&path) {
                Ok(photo) => PickOutcome::Picked(photo),
                Err(e) => {
                    eprintln!("⚠️  Could not load picked photo: {e}");
                    gateway.alert(AlertLevel::Error, "Could not open photo", &e.to_string());
                    PickOutcome::Failed(e.to_string())
                }
            },
        }
    })
    .await;

    result.unwrap_or_else(|e| PickOutcome::Failed(format!("task join error: {e}")))
}

/// Async export flow: capture the scene, then write it into the media
/// library. Either failure is reported through a single alert boundary;
/// a failed capture performs no library write.
async fn export_scene(gateway: Arc<dyn MediaGateway>, scene: Scene) -> Result<PathBuf, String> {
    let result = tokio::task::spawn_blocking(move || match gateway.capture_region(&scene) {
        Ok(captured) => match gateway.write_to_library(&captured) {
            Ok(saved) => {
                gateway.alert(
                    AlertLevel::Info,
                    "Saved!",
                    &format!("Your image has been saved to {}.", saved.display()),
                );
                Ok(saved)
            }
            Err(e) => {
                eprintln!("❌ Media library write failed: {e}");
                gateway.alert(AlertLevel::Error, "Save failed", &e.to_string());
                Err(e.to_string())
            }
        },
        Err(e) => {
            eprintln!("❌ Capture failed: {e}");
            gateway.alert(AlertLevel::Error, "Save failed", &e.to_string());
            Err(e.to_string())
        }
    })
    .await;

    result.unwrap_or_else(|e| Err(format!("task join error: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::gateway::FakeGateway;
    use crate::state::editor::BackgroundSource;
    use image::{Rgba, RgbaImage};

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

    fn test_app(gateway: Arc<FakeGateway>) -> StickerStudio {
        StickerStudio {
            screen: Screen::Home,
            editor: EditorState::new(tiny_background()),
            catalog: StickerCatalog::with_emoji(&["🦆"]).unwrap(),
            settings: Settings::default(),
            gateway,
            status: String::new(),
        }
    }

    #[test]
    fn test_picked_photo_becomes_background() {
        let mut app = test_app(Arc::new(FakeGateway::default()));

        let _ = app.update(Message::PhotoPicked(PickOutcome::Picked(tiny_photo(
            "/photos/cat.png",
        ))));

        assert_eq!(app.editor.mode, EditorMode::Editing);
        assert_eq!(
            app.editor.background.source,
            BackgroundSource::Photo(PathBuf::from("/photos/cat.png"))
        );
        assert!(app.editor.is_idle());
    }

    #[test]
    fn test_cancelled_pick_changes_nothing() {
        let mut app = test_app(Arc::new(FakeGateway::default()));

        let _ = app.update(Message::PhotoPicked(PickOutcome::Cancelled));

        assert_eq!(app.editor.mode, EditorMode::Choosing);
        assert_eq!(app.editor.background.source, BackgroundSource::Default);
    }

    #[test]
    fn test_sticker_selection_closes_picker() {
        let mut app = test_app(Arc::new(FakeGateway::default()));

        let _ = app.update(Message::UseDefaultPhoto);
        let _ = app.update(Message::OpenStickerPicker);
        let _ = app.update(Message::StickerChosen(0));

        assert!(!app.editor.picker_open);
        assert_eq!(app.editor.sticker.as_ref().unwrap().emoji, "🦆");
    }

    #[test]
    fn test_unknown_sticker_index_is_ignored() {
        let mut app = test_app(Arc::new(FakeGateway::default()));

        let _ = app.update(Message::UseDefaultPhoto);
        let _ = app.update(Message::StickerChosen(42));

        assert!(app.editor.sticker.is_none());
    }

    #[test]
    fn test_reset_returns_to_initial_state() {
        let mut app = test_app(Arc::new(FakeGateway::default()));

        let _ = app.update(Message::PhotoPicked(PickOutcome::Picked(tiny_photo(
            "/photos/dog.png",
        ))));
        let _ = app.update(Message::StickerChosen(0));
        let _ = app.update(Message::Reset);

        assert_eq!(app.editor.mode, EditorMode::Choosing);
        assert_eq!(app.editor.background.source, BackgroundSource::Default);
        assert!(app.editor.sticker.is_none());
    }

    #[test]
    fn test_second_pick_while_busy_is_rejected() {
        let mut app = test_app(Arc::new(FakeGateway::default()));

        let _ = app.update(Message::ChoosePhoto);
        assert_eq!(app.editor.activity, Activity::PickingPhoto);

        let _ = app.update(Message::ChoosePhoto);
        assert_eq!(app.editor.activity, Activity::PickingPhoto);

        let _ = app.update(Message::PhotoPicked(PickOutcome::Cancelled));
        assert!(app.editor.is_idle());
    }

    #[test]
    fn test_save_is_ignored_outside_editing_mode() {
        let mut app = test_app(Arc::new(FakeGateway::default()));

        let _ = app.update(Message::SaveImage);
        assert!(app.editor.is_idle());
    }

    #[test]
    fn test_export_finished_clears_busy_flag() {
        let mut app = test_app(Arc::new(FakeGateway::default()));

        let _ = app.update(Message::UseDefaultPhoto);
        let _ = app.update(Message::SaveImage);
        assert_eq!(app.editor.activity, Activity::Exporting);

        let _ = app.update(Message::ExportFinished(Ok(PathBuf::from("/out.png"))));
        assert!(app.editor.is_idle());
        assert!(app.status.contains("Saved"));
    }

    #[test]
    fn test_tab_selection_switches_screen() {
        let mut app = test_app(Arc::new(FakeGateway::default()));
        assert_eq!(app.screen, Screen::Home);

        let _ = app.update(Message::ScreenSelected(Screen::About));
        assert_eq!(app.screen, Screen::About);
    }

    #[test]
    fn test_tab_icons_reflect_focus() {
        for screen in Screen::ALL {
            assert_ne!(screen.icon(true), screen.icon(false));
        }
        assert_eq!(Screen::ALL.len(), 2);
    }

    #[tokio::test]
    async fn test_pick_cancellation_alerts_once() {
        let fake = Arc::new(FakeGateway::default());

        let outcome = pick_photo(fake.clone()).await;

        assert!(matches!(outcome, PickOutcome::Cancelled));
        let alerts = fake.alert_titles();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].0, AlertLevel::Info);
    }

    #[tokio::test]
    async fn test_pick_success_decodes_photo() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.png");
        RgbaImage::from_pixel(3, 3, Rgba([7, 7, 7, 255]))
            .save(&path)
            .unwrap();

        let fake = Arc::new(FakeGateway::picking(path.clone()));

        match pick_photo(fake.clone()).await {
            PickOutcome::Picked(photo) => {
                assert_eq!(photo.path, path);
                assert_eq!(photo.image.width(), 3);
            }
            other => panic!("expected a picked photo, got {other:?}"),
        }

        assert!(fake.alert_titles().is_empty());
    }

    #[tokio::test]
    async fn test_export_writes_captured_file_once() {
        let fake = Arc::new(FakeGateway::default());
        let scene = EditorState::new(tiny_background()).scene();

        let saved = export_scene(fake.clone(), scene).await.unwrap();

        let writes = fake.writes.lock().unwrap().clone();
        assert_eq!(writes, vec![PathBuf::from("/tmp/fake-capture.png")]);
        assert!(saved.starts_with("/fake/library"));

        let alerts = fake.alert_titles();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0], (AlertLevel::Info, "Saved!".to_string()));
    }

    #[tokio::test]
    async fn test_failed_capture_writes_nothing() {
        let fake = Arc::new(FakeGateway::failing_capture("boom"));
        let scene = EditorState::new(tiny_background()).scene();

        let result = export_scene(fake.clone(), scene).await;

        assert!(result.is_err());
        assert!(fake.writes.lock().unwrap().is_empty());

        let alerts = fake.alert_titles();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].0, AlertLevel::Error);
    }
}
