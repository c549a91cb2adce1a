//! Home screen: the composite canvas plus the mode-dependent controls.

use iced::widget::canvas::Canvas;
use iced::widget::{button, column, container, row, text};
use iced::{Alignment, Element, Length};

use crate::state::catalog::StickerCatalog;
use crate::state::editor::{EditorMode, EditorState};
use crate::ui::canvas::CompositeCanvas;
use crate::ui::picker;
use crate::Message;

/// Render the home screen; overlays the sticker picker when it is open.
pub fn view<'a>(
    editor: &'a EditorState,
    catalog: &'a StickerCatalog,
    status: &'a str,
) -> Element<'a, Message> {
    let canvas = Canvas::new(CompositeCanvas { editor })
        .width(Length::Fill)
        .height(Length::Fill);

    let controls: Element<'a, Message> = match editor.mode {
        EditorMode::Choosing => row![
            button("Choose a photo")
                .padding(10)
                .on_press(Message::ChoosePhoto),
            button("Use this photo")
                .padding(10)
                .style(button::secondary)
                .on_press(Message::UseDefaultPhoto),
        ]
        .spacing(12)
        .into(),
        EditorMode::Editing => row![
            button("Reset")
                .padding(10)
                .style(button::secondary)
                .on_press(Message::Reset),
            button("Add sticker")
                .padding(10)
                .on_press(Message::OpenStickerPicker),
            button("Save")
                .padding(10)
                .on_press(Message::SaveImage),
        ]
        .spacing(12)
        .into(),
    };

    let content = column![
        container(canvas).width(Length::Fill).height(Length::Fill),
        controls,
        text(status).size(14),
    ]
    .spacing(16)
    .padding(20)
    .align_x(Alignment::Center);

    if editor.picker_open {
        picker::overlay(content.into(), catalog)
    } else {
        content.into()
    }
}
