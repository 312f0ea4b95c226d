use docreel_core::{
    Stage,
    format::{StepState, step_state},
};
use iced::{
    Alignment, Color, Element, Length,
    widget::{Row, column, container, rule, text},
};

use super::{ACCENT, MUTED};
use crate::app::Message;

pub fn view<'a>(current: Stage) -> Element<'a, Message> {
    let mut steps = Row::new().spacing(12).align_y(Alignment::Center);

    for (i, stage) in Stage::ALL.iter().enumerate() {
        let state = step_state(*stage, current);
        let (marker, color) = match state {
            StepState::Completed => ("✓", Color::WHITE),
            StepState::Current => ("●", ACCENT),
            StepState::Upcoming => ("○", MUTED),
        };

        steps = steps.push(
            column![text(marker).size(22).color(color), text(stage.label()).size(12).color(MUTED)]
                .align_x(Alignment::Center)
                .spacing(4),
        );

        if i + 1 < Stage::ALL.len() {
            steps = steps.push(container(rule::horizontal(2)).width(Length::Fill));
        }
    }

    steps.width(Length::Fill).into()
}
