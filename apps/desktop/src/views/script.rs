use docreel_core::{Project, Script, ScriptDraft, Section};
use iced::{
    Element, Length,
    alignment::Horizontal,
    widget::{Column, button, column, container, row, text, text_editor},
};

use super::{ACCENT, MUTED};
use crate::app::Message;

/// Script draft plus the editor buffers backing each section.
pub struct ScriptEditor {
    draft: ScriptDraft,
    contents: [text_editor::Content; 4],
}

impl ScriptEditor {
    pub fn new(script: &Script) -> Self {
        let draft = ScriptDraft::new(script);
        let contents = Section::ALL.map(|s| text_editor::Content::with_text(draft.get(s)));
        Self { draft, contents }
    }

    pub fn perform(&mut self, section: Section, action: text_editor::Action) {
        let content = &mut self.contents[index(section)];
        let is_edit = action.is_edit();
        content.perform(action);
        if is_edit {
            let text = content.text();
            self.draft.set(section, text.trim_end_matches('\n'));
        }
    }

    pub fn finalize(&self) -> Script {
        self.draft.finalize()
    }

    pub fn is_modified(&self) -> bool {
        self.draft.is_modified()
    }
}

fn index(section: Section) -> usize {
    match section {
        Section::Intro => 0,
        Section::MainContent => 1,
        Section::Summary => 2,
        Section::Cta => 3,
    }
}

pub fn view<'a>(editor: &'a ScriptEditor, project: &'a Project, loading: bool) -> Element<'a, Message> {
    let heading = column![
        text("Your AI-Generated Script").size(28),
        row![
            text("Detected type: ").color(MUTED),
            text(project.content_type.label()).color(ACCENT),
            text(". Review and edit the script below.").color(MUTED),
        ],
    ]
    .spacing(8);

    let sections = Section::ALL.iter().fold(Column::new().spacing(20), |list, section| {
        let section = *section;
        let height = if section == Section::MainContent { 192.0 } else { 96.0 };
        let mut input = text_editor(&editor.contents[index(section)])
            .placeholder(section.placeholder())
            .height(height)
            .padding(12);
        if !loading {
            input = input.on_action(move |action| Message::SectionEdited(section, action));
        }
        list.push(column![text(section.title()).size(14), input].spacing(8))
    });

    let (regenerate_label, generate_label) = if loading {
        ("Please wait...", "Generating...")
    } else {
        ("Regenerate Script", "Generate Video")
    };
    let actions = row![
        button(text(regenerate_label))
            .on_press_maybe((!loading).then_some(Message::Regenerate))
            .style(button::secondary)
            .padding([12, 16]),
        button(text(generate_label))
            .on_press_maybe((!loading).then_some(Message::GenerateVideo))
            .style(button::primary)
            .padding([12, 16]),
    ]
    .spacing(16);

    column![
        heading,
        sections,
        container(actions)
            .width(Length::Fill)
            .align_x(Horizontal::Right),
    ]
    .spacing(24)
    .into()
}
