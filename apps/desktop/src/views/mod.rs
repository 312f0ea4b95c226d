pub mod script;
pub mod steps;
pub mod upload;
pub mod video;

use iced::{
    Color, Element,
    widget::{column, container, text},
};

use crate::app::Message;

pub const ACCENT: Color = Color::from_rgb(0.506, 0.549, 0.973);
pub const MUTED: Color = Color::from_rgb(0.58, 0.64, 0.72);

pub fn header<'a>() -> Element<'a, Message> {
    column![
        text("AI Video Producer").size(36).color(ACCENT),
        text("Turn your documents into engaging YouTube videos in minutes.")
            .size(16)
            .color(MUTED),
    ]
    .spacing(6)
    .into()
}

pub fn error_banner(message: &str) -> Element<'_, Message> {
    container(text(format!("Error: {message}")).style(text::danger))
        .padding(16)
        .style(container::rounded_box)
        .into()
}
