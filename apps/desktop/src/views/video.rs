use docreel_core::Video;
use iced::{
    Element, Length,
    alignment::Horizontal,
    widget::{Row, button, column, container, image, row, text},
};

use super::MUTED;
use crate::app::Message;

pub fn view<'a>(
    video: &'a Video,
    thumbnail: Option<&'a image::Handle>,
    notice: Option<&'a str>,
) -> Element<'a, Message> {
    let preview: Element<'a, Message> = match thumbnail {
        Some(handle) => image(handle.clone()).width(Length::Fill).into(),
        None => container(text("Loading thumbnail...").color(MUTED))
            .padding(48)
            .center_x(Length::Fill)
            .style(container::rounded_box)
            .into(),
    };

    let tags = video.tags.iter().fold(Row::new().spacing(8), |chips, tag| {
        chips.push(
            container(text(tag).size(12))
                .padding([4, 8])
                .style(container::rounded_box),
        )
    });

    let mut content = column![
        column![
            text("Your Video is Ready!").size(28),
            text("Preview your final video below.").color(MUTED),
        ]
        .spacing(8),
        column![text("Video").size(16), text(&video.url).color(MUTED)].spacing(8),
        column![text("Generated Thumbnail").size(16), preview].spacing(8),
        column![text("Suggested Tags").size(16), tags.wrap()].spacing(8),
    ]
    .spacing(24);

    if let Some(notice) = notice {
        content = content.push(
            container(
                column![
                    text("Publish to YouTube").size(16),
                    text(notice).color(MUTED),
                    button(text("OK")).on_press(Message::DismissNotice),
                ]
                .spacing(8),
            )
            .padding(16)
            .style(container::rounded_box),
        );
    }

    let actions = row![
        button(text("Create New Video"))
            .on_press(Message::StartOver)
            .style(button::secondary)
            .padding([12, 16]),
        button(text("Publish to YouTube"))
            .on_press(Message::Publish)
            .style(button::danger)
            .padding([12, 16]),
    ]
    .spacing(16);

    content
        .push(
            container(actions)
                .width(Length::Fill)
                .align_x(Horizontal::Right),
        )
        .into()
}
