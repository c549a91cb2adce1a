//! The live composite canvas: background photo with the sticker overlaid,
//! plus mouse interaction for repositioning and rescaling the sticker.

use cgmath::Vector2;
use iced::mouse::{self, Cursor};
use iced::widget::canvas::{self, Program};
use iced::{Color, Point, Rectangle, Renderer, Size, Theme};

use crate::render::compose::STICKER_BASE_FRACTION;
use crate::state::editor::EditorState;
use crate::Message;

/// Letterbox fill behind the photo.
const BACKDROP: Color = Color {
    r: 0.09,
    g: 0.09,
    b: 0.11,
    a: 1.0,
};

/// Canvas program rendering the current editor scene.
pub struct CompositeCanvas<'a> {
    pub editor: &'a EditorState,
}

impl CompositeCanvas<'_> {
    /// The rectangle the background photo occupies inside the canvas,
    /// letterboxed to preserve its aspect ratio.
    fn background_rect(&self, area: Size) -> Rectangle {
        let image = self.editor.background.image.as_ref();
        let (iw, ih) = (image.width() as f32, image.height() as f32);
        if iw <= 0.0 || ih <= 0.0 || area.width <= 0.0 || area.height <= 0.0 {
            return Rectangle::new(Point::ORIGIN, area);
        }

        let scale = (area.width / iw).min(area.height / ih);
        let size = Size::new(iw * scale, ih * scale);
        let origin = Point::new(
            (area.width - size.width) / 2.0,
            (area.height - size.height) / 2.0,
        );

        Rectangle::new(origin, size)
    }

    /// The rectangle the sticker occupies, relative to the canvas origin.
    fn sticker_rect(&self, area: Size) -> Option<Rectangle> {
        let sticker = self.editor.sticker.as_ref()?;
        let bg = self.background_rect(area);

        let raster = sticker.image.as_ref();
        let aspect = if raster.height() > 0 {
            raster.width() as f32 / raster.height() as f32
        } else {
            1.0
        };

        let height = sticker.placement.scale * STICKER_BASE_FRACTION * bg.height;
        let width = height * aspect;

        let center_x = bg.x + bg.width / 2.0 + sticker.placement.offset.x * bg.width;
        let center_y = bg.y + bg.height / 2.0 + sticker.placement.offset.y * bg.height;

        Some(Rectangle::new(
            Point::new(center_x - width / 2.0, center_y - height / 2.0),
            Size::new(width, height),
        ))
    }
}

impl Program<Message> for CompositeCanvas<'_> {
    type State = DragState;

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());

        frame.fill_rectangle(Point::ORIGIN, bounds.size(), BACKDROP);

        let bg_rect = self.background_rect(bounds.size());
        frame.draw_image(
            bg_rect,
            canvas::Image::new(self.editor.background.handle.clone()),
        );

        if let (Some(sticker), Some(rect)) =
            (self.editor.sticker.as_ref(), self.sticker_rect(bounds.size()))
        {
            frame.draw_image(rect, canvas::Image::new(sticker.handle.clone()));
        }

        vec![frame.into_geometry()]
    }

    fn update(
        &self,
        state: &mut Self::State,
        event: canvas::Event,
        bounds: Rectangle,
        cursor: Cursor,
    ) -> (canvas::event::Status, Option<Message>) {
        match event {
            // Mouse wheel resizes the sticker under the cursor
            canvas::Event::Mouse(mouse::Event::WheelScrolled { delta }) => {
                if self.editor.sticker.is_some() && cursor.is_over(bounds) {
                    let scale_delta = match delta {
                        mouse::ScrollDelta::Lines { y, .. } => y * 0.1,
                        mouse::ScrollDelta::Pixels { y, .. } => y * 0.01,
                    };
                    return (
                        canvas::event::Status::Captured,
                        Some(Message::StickerScaled(scale_delta)),
                    );
                }
            }

            // Press on the sticker starts dragging it
            canvas::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                if let (Some(relative), Some(rect)) = (
                    cursor.position_in(bounds),
                    self.sticker_rect(bounds.size()),
                ) {
                    if rect.contains(relative) {
                        state.is_dragging = true;
                        state.last_position = cursor.position();
                        return (canvas::event::Status::Captured, None);
                    }
                }
            }

            canvas::Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
                if state.is_dragging {
                    state.is_dragging = false;
                    state.last_position = None;
                    return (canvas::event::Status::Captured, None);
                }
            }

            // Drag moves the sticker, normalized to the photo rectangle
            canvas::Event::Mouse(mouse::Event::CursorMoved { .. }) => {
                if state.is_dragging {
                    if let (Some(current), Some(last)) = (cursor.position(), state.last_position) {
                        let bg = self.background_rect(bounds.size());
                        if bg.width > 0.0 && bg.height > 0.0 {
                            let delta = Vector2::new(
                                (current.x - last.x) / bg.width,
                                (current.y - last.y) / bg.height,
                            );
                            state.last_position = Some(current);
                            return (
                                canvas::event::Status::Captured,
                                Some(Message::StickerMoved(delta)),
                            );
                        }
                    }
                }
            }

            _ => {}
        }

        (canvas::event::Status::Ignored, None)
    }

    fn mouse_interaction(
        &self,
        state: &Self::State,
        bounds: Rectangle,
        cursor: Cursor,
    ) -> mouse::Interaction {
        if state.is_dragging {
            return mouse::Interaction::Grabbing;
        }

        if let (Some(relative), Some(rect)) =
            (cursor.position_in(bounds), self.sticker_rect(bounds.size()))
        {
            if rect.contains(relative) {
                return mouse::Interaction::Grab;
            }
        }

        mouse::Interaction::default()
    }
}

/// State for drag interactions
#[derive(Debug, Clone, Default)]
pub struct DragState {
    pub is_dragging: bool,
    pub last_position: Option<Point>,
}
