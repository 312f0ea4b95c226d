use std::path::Path;

use crate::{
    error::{DocreelError, Result},
    types::{FileInfo, UploadedFile},
};

/// Local state of the upload form: the project name being typed and the files
/// picked so far.
#[derive(Debug, Default, Clone)]
pub struct UploadForm {
    pub project_name: String,
    files: Vec<UploadedFile>,
    next_id: u64,
}

impl UploadForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn files(&self) -> &[UploadedFile] {
        &self.files
    }

    pub fn set_project_name(&mut self, name: impl Into<String>) {
        self.project_name = name.into();
    }

    /// Append picked files, giving each an id that stays unique for the
    /// lifetime of the form even after removals.
    pub fn add_files(&mut self, picked: impl IntoIterator<Item = FileInfo>) {
        for file in picked {
            let id = format!("file-{}-{}", self.next_id, file.name);
            self.next_id += 1;
            self.files.push(UploadedFile {
                id,
                file,
                summary: None,
            });
        }
    }

    pub fn remove_file(&mut self, id: &str) {
        self.files.retain(|f| f.id != id);
    }

    pub fn clear(&mut self) {
        self.project_name.clear();
        self.files.clear();
    }

    pub fn is_complete(&self) -> bool {
        !self.project_name.trim().is_empty() && !self.files.is_empty()
    }

    pub fn can_process(&self, is_loading: bool) -> bool {
        self.is_complete() && !is_loading
    }
}

pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// Describe a file on disk the way the backend expects it.
pub fn file_info_from_path(path: &Path) -> Result<FileInfo> {
    let metadata = std::fs::metadata(path).map_err(|source| DocreelError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "unknown".into());

    Ok(FileInfo {
        mime_type: Some(mime_type_for(path).unwrap_or(DEFAULT_MIME_TYPE).to_string()),
        name,
        uri: path.to_string_lossy().to_string(),
        size: Some(metadata.len()),
    })
}

pub fn mime_type_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_string_lossy().to_lowercase();
    let mime = match ext.as_str() {
        "txt" | "text" | "log" => "text/plain",
        "md" | "markdown" => "text/markdown",
        "csv" => "text/csv",
        "html" | "htm" => "text/html",
        "json" => "application/json",
        "xml" => "application/xml",
        "pdf" => "application/pdf",
        "rtf" => "application/rtf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "ppt" => "application/vnd.ms-powerpoint",
        "pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        "odt" => "application/vnd.oasis.opendocument.text",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        _ => return None,
    };
    Some(mime)
}
