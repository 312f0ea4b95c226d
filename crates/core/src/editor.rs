use crate::types::Script;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Intro,
    MainContent,
    Summary,
    Cta,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Intro,
        Section::MainContent,
        Section::Summary,
        Section::Cta,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Section::Intro => "1. Intro",
            Section::MainContent => "2. Main Content",
            Section::Summary => "3. Summary",
            Section::Cta => "4. Call to Action (CTA)",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            Section::Intro => "A hook to grab the viewer's attention...",
            Section::MainContent => "The core message of the video...",
            Section::Summary => "A brief recap of the key points...",
            Section::Cta => "e.g., 'Like, comment, and subscribe!'",
        }
    }
}

/// Editable copy of a generated script. The controller's script stays
/// untouched until the draft is finalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptDraft {
    source: Script,
    intro: String,
    main_content: String,
    summary: String,
    cta: String,
}

impl ScriptDraft {
    pub fn new(script: &Script) -> Self {
        Self {
            source: script.clone(),
            intro: script.intro.clone(),
            main_content: script.main_content.clone(),
            summary: script.summary.clone(),
            cta: script.cta.clone(),
        }
    }

    /// Whether this draft was started from `script`. A replaced script means
    /// the draft is stale and should be rebuilt.
    pub fn is_based_on(&self, script: &Script) -> bool {
        &self.source == script
    }

    pub fn get(&self, section: Section) -> &str {
        match section {
            Section::Intro => &self.intro,
            Section::MainContent => &self.main_content,
            Section::Summary => &self.summary,
            Section::Cta => &self.cta,
        }
    }

    pub fn set(&mut self, section: Section, text: impl Into<String>) {
        let text = text.into();
        match section {
            Section::Intro => self.intro = text,
            Section::MainContent => self.main_content = text,
            Section::Summary => self.summary = text,
            Section::Cta => self.cta = text,
        }
    }

    pub fn is_modified(&self) -> bool {
        Section::ALL
            .iter()
            .any(|s| self.get(*s) != section_text(&self.source, *s))
    }

    /// The edited script, with `raw` rebuilt from the current sections.
    pub fn finalize(&self) -> Script {
        Script {
            raw: Script::compose_raw(&self.intro, &self.main_content, &self.summary, &self.cta),
            intro: self.intro.clone(),
            main_content: self.main_content.clone(),
            summary: self.summary.clone(),
            cta: self.cta.clone(),
            scenes: self.source.scenes.clone(),
        }
    }
}

pub fn section_text(script: &Script, section: Section) -> &str {
    match section {
        Section::Intro => &script.intro,
        Section::MainContent => &script.main_content,
        Section::Summary => &script.summary,
        Section::Cta => &script.cta,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generated() -> Script {
        Script {
            raw: "Hi\n\nBody\n\nRecap\n\nSubscribe".to_string(),
            intro: "Hi".to_string(),
            main_content: "Body".to_string(),
            summary: "Recap".to_string(),
            cta: "Subscribe".to_string(),
            scenes: Vec::new(),
        }
    }

    #[test]
    fn finalize_rebuilds_raw_from_edits() {
        let mut draft = ScriptDraft::new(&generated());
        assert!(!draft.is_modified());

        draft.set(Section::Intro, "Welcome back");
        draft.set(Section::Cta, "Share it");
        assert!(draft.is_modified());

        let script = draft.finalize();
        assert_eq!(script.intro, "Welcome back");
        assert_eq!(script.main_content, "Body");
        assert_eq!(script.raw, "Welcome back\n\nBody\n\nRecap\n\nShare it");
    }

    #[test]
    fn draft_tracks_its_source() {
        let script = generated();
        let draft = ScriptDraft::new(&script);
        assert!(draft.is_based_on(&script));

        let mut regenerated = script.clone();
        regenerated.intro = "A new hook".to_string();
        assert!(!draft.is_based_on(&regenerated));
    }
}
