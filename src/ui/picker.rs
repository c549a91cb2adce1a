//! The sticker picker: a dismissible modal over the home screen with the
//! fixed catalog laid out as a wrapping grid.

use iced::widget::{
    button, center, column, container, image, mouse_area, opaque, scrollable, stack, text,
};
use iced::{Color, Element, Length};
use iced_aw::Wrap;

use crate::state::catalog::StickerCatalog;
use crate::Message;

/// Edge length of one grid cell.
const CELL_SIZE: f32 = 72.0;

/// Overlay the sticker picker modal on top of `base`.
///
/// Clicking outside the card dismisses the picker without changing the
/// active sticker.
pub fn overlay<'a>(base: Element<'a, Message>, catalog: &'a StickerCatalog) -> Element<'a, Message> {
    let cells: Vec<Element<'a, Message>> = catalog
        .entries()
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            button(
                image(entry.thumb.clone())
                    .width(CELL_SIZE)
                    .height(CELL_SIZE),
            )
            .style(button::text)
            .padding(4)
            .on_press(Message::StickerChosen(index))
            .into()
        })
        .collect();

    let grid = Wrap::with_elements(cells).spacing(6.0).line_spacing(6.0);

    let card = container(
        column![
            text("Choose a sticker").size(20),
            scrollable(grid).height(Length::Fixed(320.0)),
        ]
        .spacing(12),
    )
    .width(Length::Fixed(360.0))
    .padding(16)
    .style(container::rounded_box);

    stack![
        base,
        opaque(
            mouse_area(center(opaque(card)).style(|_theme| {
                container::Style {
                    background: Some(
                        Color {
                            a: 0.7,
                            ..Color::BLACK
                        }
                        .into(),
                    ),
                    ..container::Style::default()
                }
            }))
            .on_press(Message::CloseStickerPicker)
        )
    ]
    .into()
}
