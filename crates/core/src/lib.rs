//! docreel core library
//!
//! Data model, backend client and stage controller for turning uploaded
//! documents into an edited script and a generated video.

pub mod api;
pub mod config;
pub mod editor;
pub mod error;
pub mod export;
pub mod format;
pub mod session;
pub mod types;
pub mod upload;

pub use api::{ApiClient, Backend};
pub use config::Config;
pub use editor::{ScriptDraft, Section};
pub use error::{DocreelError, Result};
pub use export::{load_script, save_script};
pub use format::{format_script_readable, format_step_indicator, format_video_readable};
pub use session::{Controller, Job, Operation, Outcome, Session, SessionError, Stage};
pub use types::{
    ContentType, FileInfo, FileSummary, ProcessedDocuments, Project, Scene, Script,
    UploadedFile, Video,
};
pub use upload::{UploadForm, file_info_from_path};
