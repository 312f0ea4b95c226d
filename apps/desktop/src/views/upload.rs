use docreel_core::UploadForm;
use iced::{
    Alignment, Element, Length,
    alignment::Horizontal,
    widget::{Column, button, column, container, row, text, text_input},
};

use super::MUTED;
use crate::app::Message;

pub fn view(form: &UploadForm, loading: bool) -> Element<'_, Message> {
    let name_input = text_input("e.g., My Awesome Tutorial", &form.project_name)
        .on_input_maybe((!loading).then_some(Message::ProjectNameChanged))
        .padding(12);

    let picker = button(
        column![
            text("Click to select files"),
            text("Any file type").size(12).color(MUTED),
        ]
        .align_x(Alignment::Center)
        .spacing(4),
    )
    .on_press_maybe((!loading).then_some(Message::PickFiles))
    .style(button::secondary)
    .padding(32)
    .width(Length::Fill);

    let mut content = column![
        column![text("Project Name").size(14), name_input].spacing(8),
        column![text("Upload Files").size(14), picker].spacing(8),
    ]
    .spacing(24);

    if !form.files().is_empty() {
        let files = form.files().iter().fold(Column::new().spacing(8), |list, f| {
            list.push(
                row![
                    text(&f.file.name).width(Length::Fill),
                    button(text("Remove").size(12))
                        .on_press_maybe((!loading).then(|| Message::RemoveFile(f.id.clone())))
                        .style(button::danger),
                ]
                .align_y(Alignment::Center),
            )
        });
        content = content.push(column![text("Uploaded Files").size(16), files].spacing(12));
    }

    let label = if loading {
        "Processing..."
    } else {
        "Process & Generate Script"
    };
    let process = button(text(label))
        .on_press_maybe(form.can_process(loading).then_some(Message::Process))
        .style(button::primary)
        .padding([12, 16]);

    content
        .push(
            container(process)
                .width(Length::Fill)
                .align_x(Horizontal::Right),
        )
        .into()
}
