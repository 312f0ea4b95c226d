use crate::{
    editor::{Section, section_text},
    session::Stage,
    types::{Project, Script, Video},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepState {
    Completed,
    Current,
    Upcoming,
}

pub fn step_state(step: Stage, current: Stage) -> StepState {
    match step.index().cmp(&current.index()) {
        std::cmp::Ordering::Less => StepState::Completed,
        std::cmp::Ordering::Equal => StepState::Current,
        std::cmp::Ordering::Greater => StepState::Upcoming,
    }
}

/// One-line progress indicator, e.g. `✓ 1. Process ── ● 2. Script ── ○ 3. Video`
pub fn format_step_indicator(current: Stage) -> String {
    Stage::ALL
        .iter()
        .map(|step| {
            let marker = match step_state(*step, current) {
                StepState::Completed => "✓",
                StepState::Current => "●",
                StepState::Upcoming => "○",
            };
            format!("{} {}", marker, step.label())
        })
        .collect::<Vec<_>>()
        .join(" ── ")
}

/// Format a generated script as human-readable markdown
pub fn format_script_readable(project: &Project, script: &Script) -> String {
    let mut output = String::new();
    output.push_str(&format!("# {}\n\n", project.name));
    output.push_str(&format!(
        "**Detected type:** {} | **Files:** {}\n\n",
        project.content_type,
        project.files.len()
    ));

    if project.files.iter().any(|f| f.summary.is_some()) {
        output.push_str("## Sources\n\n");
        for file in &project.files {
            match &file.summary {
                Some(summary) => output.push_str(&format!("• {}: {}\n", file.file.name, summary)),
                None => output.push_str(&format!("• {}\n", file.file.name)),
            }
        }
        output.push('\n');
    }

    for section in Section::ALL {
        let text = section_text(script, section);
        output.push_str(&format!("## {}\n\n", section.title()));
        output.push_str(text.trim());
        output.push_str("\n\n");
    }

    output
}

pub fn format_video_readable(video: &Video) -> String {
    let mut output = String::new();
    output.push_str("## Your Video is Ready!\n\n");
    output.push_str(&format!("**Video:** {}\n", video.url));
    output.push_str(&format!("**Thumbnail:** {}\n\n", video.thumbnail_url));

    if !video.tags.is_empty() {
        output.push_str("## Suggested Tags\n\n");
        output.push_str(
            &video
                .tags
                .iter()
                .map(|t| format!("#{}", t.replace(' ', "")))
                .collect::<Vec<_>>()
                .join(" "),
        );
        output.push('\n');
    }

    output
}
