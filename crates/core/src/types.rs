use std::{fmt, path::PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileInfo {
    pub name: String,
    pub uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

impl FileInfo {
    /// Local filesystem path behind `uri`, accepting both bare paths and `file://` URIs.
    pub fn local_path(&self) -> PathBuf {
        PathBuf::from(self.uri.strip_prefix("file://").unwrap_or(&self.uri))
    }

    pub fn mime_type_or_default(&self) -> &str {
        self.mime_type
            .as_deref()
            .unwrap_or(crate::upload::DEFAULT_MIME_TYPE)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub id: String,
    pub file: FileInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// Video genre inferred by the backend from the uploaded documents.
///
/// The backend is free to answer with labels outside the known set; those are
/// kept verbatim in [`ContentType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ContentType {
    Tutorial,
    Story,
    Review,
    News,
    Crime,
    #[default]
    Unknown,
    Other(String),
}

impl ContentType {
    pub fn label(&self) -> &str {
        match self {
            ContentType::Tutorial => "Tutorial",
            ContentType::Story => "Storytelling",
            ContentType::Review => "Product Review",
            ContentType::News => "News Announcement",
            ContentType::Crime => "True Crime",
            ContentType::Unknown => "Unknown",
            ContentType::Other(label) => label,
        }
    }
}

impl From<String> for ContentType {
    fn from(label: String) -> Self {
        match label.trim() {
            "Tutorial" => ContentType::Tutorial,
            "Storytelling" => ContentType::Story,
            "Product Review" => ContentType::Review,
            "News Announcement" => ContentType::News,
            "True Crime" => ContentType::Crime,
            "Unknown" | "" => ContentType::Unknown,
            other => ContentType::Other(other.to_string()),
        }
    }
}

impl From<&str> for ContentType {
    fn from(label: &str) -> Self {
        ContentType::from(label.to_string())
    }
}

impl From<ContentType> for String {
    fn from(content_type: ContentType) -> Self {
        content_type.label().to_string()
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub name: String,
    pub files: Vec<UploadedFile>,
    pub content_type: ContentType,
}

impl Project {
    /// Build a project from the selected files, attaching each summary to the
    /// file with the matching id. Files without a summary keep `None`.
    pub fn from_processed(name: &str, files: Vec<UploadedFile>, processed: ProcessedDocuments) -> Self {
        let files = files
            .into_iter()
            .map(|mut f| {
                f.summary = processed
                    .file_summaries
                    .iter()
                    .find(|s| s.id == f.id)
                    .map(|s| s.summary.clone());
                f
            })
            .collect();

        Self {
            name: name.to_string(),
            files,
            content_type: processed.content_type,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene {
    pub scene: u32,
    pub text: String,
    pub visual: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Script {
    pub raw: String,
    pub intro: String,
    pub main_content: String,
    pub summary: String,
    pub cta: String,
    pub scenes: Vec<Scene>,
}

impl Script {
    /// Join the four narration sections the way the raw script is laid out.
    pub fn compose_raw(intro: &str, main_content: &str, summary: &str, cta: &str) -> String {
        [intro, main_content, summary, cta].join("\n\n")
    }

    pub fn has_sections(&self) -> bool {
        [&self.intro, &self.main_content, &self.summary, &self.cta]
            .iter()
            .any(|s| !s.trim().is_empty())
    }

    /// Scene-only responses carry no named sections; surface their narration
    /// as the main content so there is something to edit.
    pub fn normalized(mut self) -> Self {
        if !self.has_sections() {
            if !self.scenes.is_empty() {
                self.main_content = self
                    .scenes
                    .iter()
                    .map(|s| s.text.trim())
                    .collect::<Vec<_>>()
                    .join("\n\n");
            } else {
                self.main_content = self.raw.clone();
            }
        }
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub url: String,
    pub thumbnail_url: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSummary {
    pub id: String,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedDocuments {
    pub content_type: ContentType,
    #[serde(default)]
    pub file_summaries: Vec<FileSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uploaded(id: &str, name: &str) -> UploadedFile {
        UploadedFile {
            id: id.to_string(),
            file: FileInfo {
                name: name.to_string(),
                uri: format!("/tmp/{name}"),
                mime_type: Some("text/plain".to_string()),
                size: Some(12),
            },
            summary: None,
        }
    }

    #[test]
    fn content_type_keeps_unknown_labels() {
        let known: ContentType = serde_json::from_str("\"Product Review\"").unwrap();
        assert_eq!(known, ContentType::Review);

        let other: ContentType = serde_json::from_str("\"Documentary\"").unwrap();
        assert_eq!(other, ContentType::Other("Documentary".to_string()));
        assert_eq!(serde_json::to_string(&other).unwrap(), "\"Documentary\"");
    }

    #[test]
    fn project_uses_camel_case_wire_names() {
        let project = Project {
            name: "Demo".to_string(),
            files: vec![uploaded("file-0-a.txt", "a.txt")],
            content_type: ContentType::Tutorial,
        };

        let value = serde_json::to_value(&project).unwrap();
        assert_eq!(value["contentType"], "Tutorial");
        assert_eq!(value["files"][0]["file"]["mimeType"], "text/plain");
        assert!(value["files"][0].get("summary").is_none());
    }

    #[test]
    fn summaries_are_matched_by_id() {
        let processed = ProcessedDocuments {
            content_type: ContentType::Story,
            file_summaries: vec![FileSummary {
                id: "file-1-b.md".to_string(),
                summary: "About b".to_string(),
            }],
        };

        let project = Project::from_processed(
            "Demo",
            vec![uploaded("file-0-a.txt", "a.txt"), uploaded("file-1-b.md", "b.md")],
            processed,
        );

        assert_eq!(project.files[0].summary, None);
        assert_eq!(project.files[1].summary.as_deref(), Some("About b"));
        assert_eq!(project.content_type, ContentType::Story);
    }

    #[test]
    fn script_sections_default_when_missing() {
        let script: Script = serde_json::from_str(
            r#"{"raw": "Hello there", "scenes": [{"scene": 1, "text": "Hello there", "visual": "Host"}]}"#,
        )
        .unwrap();

        assert!(!script.has_sections());
        let script = script.normalized();
        assert_eq!(script.main_content, "Hello there");
        assert_eq!(script.scenes.len(), 1);
    }

    #[test]
    fn script_always_serializes_scenes() {
        let script = Script {
            raw: "a".to_string(),
            intro: "a".to_string(),
            ..Default::default()
        };

        let value = serde_json::to_value(&script).unwrap();
        assert_eq!(value["scenes"], serde_json::json!([]));
        assert_eq!(value["mainContent"], "");
    }

    #[test]
    fn local_path_strips_file_scheme() {
        let mut info = uploaded("x", "a.txt").file;
        info.uri = "file:///home/me/a.txt".to_string();
        assert_eq!(info.local_path(), PathBuf::from("/home/me/a.txt"));
    }
}
