use std::sync::Arc;

use docreel_core::{
    ApiClient, Backend, Config, FileInfo, Job, Outcome, Section, Session, Stage, UploadForm,
    file_info_from_path,
};
use iced::{
    Element, Length, Task, Theme,
    widget::{column, container, image, scrollable, text, text_editor},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::views::{self, script::ScriptEditor};

const PUBLISH_NOTICE: &str = "This would normally initiate YouTube OAuth and upload the video. \
                              This feature is not implemented in this demo.";

pub struct App {
    session_id: Uuid,
    backend: Arc<dyn Backend>,
    session: Session,
    upload: UploadForm,
    editor: Option<ScriptEditor>,
    thumbnail: Option<image::Handle>,
    notice: Option<String>,
}

#[derive(Debug, Clone)]
pub enum Message {
    ProjectNameChanged(String),
    PickFiles,
    FilesPicked(Vec<FileInfo>),
    RemoveFile(String),
    Process,
    SectionEdited(Section, text_editor::Action),
    Regenerate,
    GenerateVideo,
    Finished(Outcome),
    ThumbnailLoaded(String, Result<Vec<u8>, String>),
    StartOver,
    Publish,
    DismissNotice,
}

impl App {
    pub fn new() -> (Self, Task<Message>) {
        let config = Config::load(None).unwrap_or_else(|e| {
            warn!(error = %e, "falling back to default config");
            Config::default()
        });
        let session_id = Uuid::new_v4();
        info!(%session_id, api = %config.api_base_url, "session started");

        (
            Self {
                session_id,
                backend: Arc::new(ApiClient::from_config(&config)),
                session: Session::new(),
                upload: UploadForm::new(),
                editor: None,
                thumbnail: None,
                notice: None,
            },
            Task::none(),
        )
    }

    pub fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn spawn(&self, job: Job) -> Task<Message> {
        let backend = Arc::clone(&self.backend);
        Task::perform(
            async move { job.run(backend.as_ref()).await },
            Message::Finished,
        )
    }

    /// Start a fresh editor from the session's script, dropping local edits.
    fn reset_editor(&mut self) {
        self.editor = self.session.script().map(ScriptEditor::new);
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        let loading = self.session.is_loading();

        match message {
            Message::ProjectNameChanged(name) => self.upload.set_project_name(name),
            Message::PickFiles => {
                if !loading {
                    return Task::perform(pick_files(), Message::FilesPicked);
                }
            }
            Message::FilesPicked(files) => {
                if !loading {
                    self.upload.add_files(files);
                }
            }
            Message::RemoveFile(id) => {
                if !loading {
                    self.upload.remove_file(&id);
                }
            }
            Message::Process => {
                match self
                    .session
                    .request_processing(&self.upload.project_name, self.upload.files().to_vec())
                {
                    Ok(job) => return self.spawn(job),
                    Err(e) => warn!(session = %self.session_id, error = %e, "process ignored"),
                }
            }
            Message::SectionEdited(section, action) => {
                if let Some(editor) = self.editor.as_mut()
                    && !loading
                {
                    editor.perform(section, action);
                }
            }
            Message::Regenerate => match self.session.request_regeneration() {
                Ok(job) => return self.spawn(job),
                Err(e) => warn!(session = %self.session_id, error = %e, "regenerate ignored"),
            },
            Message::GenerateVideo => {
                let Some(script) = self.editor.as_ref().map(|e| e.finalize()) else {
                    return Task::none();
                };
                match self.session.request_video(script) {
                    Ok(job) => return self.spawn(job),
                    Err(e) => warn!(session = %self.session_id, error = %e, "generate video ignored"),
                }
            }
            Message::Finished(outcome) => {
                let script_replaced = matches!(
                    outcome,
                    Outcome::ScriptReady { .. } | Outcome::ScriptRegenerated { .. }
                );
                let video_ready = matches!(outcome, Outcome::VideoReady { .. });
                if self.session.apply(outcome) {
                    if script_replaced {
                        self.reset_editor();
                    }
                    if video_ready && let Some(video) = self.session.video() {
                        let url = video.thumbnail_url.clone();
                        return Task::perform(fetch_thumbnail(url.clone()), move |result| {
                            Message::ThumbnailLoaded(url, result)
                        });
                    }
                }
            }
            Message::ThumbnailLoaded(url, result) => match result {
                Ok(bytes) => {
                    let current = self
                        .session
                        .video()
                        .is_some_and(|video| video.thumbnail_url == url);
                    if current {
                        self.thumbnail = Some(image::Handle::from_bytes(bytes));
                    }
                }
                Err(e) => warn!(session = %self.session_id, %url, error = %e, "thumbnail unavailable"),
            },
            Message::StartOver => {
                self.session.start_over();
                self.upload.clear();
                self.editor = None;
                self.thumbnail = None;
                self.notice = None;
            }
            Message::Publish => self.notice = Some(PUBLISH_NOTICE.to_string()),
            Message::DismissNotice => self.notice = None,
        }

        Task::none()
    }

    pub fn view(&self) -> Element<'_, Message> {
        let loading = self.session.is_loading();

        let stage_view: Element<'_, Message> = match (self.session.stage(), &self.editor) {
            (Stage::Script, Some(editor)) => match self.session.project() {
                Some(project) => views::script::view(editor, project, loading),
                None => views::upload::view(&self.upload, loading),
            },
            (Stage::Video, _) => match self.session.video() {
                Some(video) => {
                    views::video::view(video, self.thumbnail.as_ref(), self.notice.as_deref())
                }
                None => views::upload::view(&self.upload, loading),
            },
            _ => views::upload::view(&self.upload, loading),
        };

        let mut content = column![
            views::header(),
            views::steps::view(self.session.stage()),
        ]
        .spacing(24)
        .padding(32)
        .max_width(1100);

        if let Some(error) = self.session.error() {
            content = content.push(views::error_banner(error));
        }

        content = content.push(
            container(stage_view)
                .padding(24)
                .width(Length::Fill)
                .style(container::rounded_box),
        );

        scrollable(container(content).center_x(Length::Fill)).into()
    }
}

async fn pick_files() -> Vec<FileInfo> {
    let Some(handles) = rfd::AsyncFileDialog::new()
        .set_title("Select files")
        .pick_files()
        .await
    else {
        return Vec::new();
    };

    handles
        .iter()
        .filter_map(|handle| match file_info_from_path(handle.path()) {
            Ok(info) => Some(info),
            Err(e) => {
                warn!(error = %e, "skipping unreadable file");
                None
            }
        })
        .collect()
}

async fn fetch_thumbnail(url: String) -> Result<Vec<u8>, String> {
    let response = reqwest::get(&url)
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| e.to_string())?;
    let bytes = response.bytes().await.map_err(|e| e.to_string())?;
    Ok(bytes.to_vec())
}
