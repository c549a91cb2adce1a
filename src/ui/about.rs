//! Static about screen.

use iced::widget::{column, container, text};
use iced::{Alignment, Element, Length};

use crate::Message;

/// Application version from Cargo.toml.
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Render the about screen.
pub fn view<'a>() -> Element<'a, Message> {
    let content = column![
        text("Sticker Studio").size(36),
        text(format!("v{APP_VERSION}")).size(16),
        text("Pick a photo, drop an emoji sticker on it, and save the result straight into your Pictures folder.").size(16),
        text("Drag the sticker to move it. Scroll to resize it.").size(14),
        text("Stickers are rendered from the bundled Twemoji set.").size(14),
    ]
    .spacing(16)
    .padding(40)
    .max_width(420)
    .align_x(Alignment::Center);

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}
