//! Stage controller for the Upload → Script → Video workflow.
//!
//! [`Session`] is synchronous: a request validates the current state, marks
//! the session as loading and hands back a [`Job`]. The caller runs the job on
//! whatever executor it owns and feeds the resulting [`Outcome`] back through
//! [`Session::apply`]. [`Controller`] bundles both halves for callers that can
//! simply await.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    api::Backend,
    error::DocreelError,
    types::{ContentType, Project, Script, UploadedFile, Video},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stage {
    #[default]
    Upload,
    Script,
    Video,
}

impl Stage {
    pub const ALL: [Stage; 3] = [Stage::Upload, Stage::Script, Stage::Video];

    pub fn index(&self) -> usize {
        match self {
            Stage::Upload => 0,
            Stage::Script => 1,
            Stage::Video => 2,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Stage::Upload => "1. Process",
            Stage::Script => "2. Script",
            Stage::Video => "3. Video",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ProcessDocuments,
    RegenerateScript,
    GenerateVideo,
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::ProcessDocuments => "process-documents",
            Operation::RegenerateScript => "regenerate-script",
            Operation::GenerateVideo => "generate-video",
        }
    }

    pub fn failure_message(&self, cause: &DocreelError) -> String {
        match self {
            Operation::ProcessDocuments => format!(
                "Failed to process documents. Please check your connection and try again. ({cause})"
            ),
            Operation::RegenerateScript => "Failed to regenerate script. Please try again.".into(),
            Operation::GenerateVideo => "Failed to generate video. Please try again.".into(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Another operation is still in progress")]
    Busy,
    #[error("Not available in the {actual:?} stage")]
    WrongStage { actual: Stage },
    #[error("Project name must not be empty")]
    EmptyProjectName,
    #[error("Select at least one file")]
    NoFiles,
    #[error("No project has been processed yet")]
    NoProject,
}

/// Identifies one in-flight job. Outcomes whose ticket no longer matches are
/// dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug, Clone)]
pub enum Job {
    Process {
        ticket: Ticket,
        name: String,
        files: Vec<UploadedFile>,
    },
    Regenerate {
        ticket: Ticket,
        project: Project,
    },
    Video {
        ticket: Ticket,
        script: Script,
        content_type: ContentType,
    },
}

#[derive(Debug, Clone)]
pub enum Outcome {
    ScriptReady {
        ticket: Ticket,
        project: Project,
        script: Script,
    },
    ScriptRegenerated {
        ticket: Ticket,
        script: Script,
    },
    VideoReady {
        ticket: Ticket,
        video: Video,
    },
    Failed {
        ticket: Ticket,
        operation: Operation,
        message: String,
    },
}

impl Outcome {
    pub fn ticket(&self) -> Ticket {
        match self {
            Outcome::ScriptReady { ticket, .. }
            | Outcome::ScriptRegenerated { ticket, .. }
            | Outcome::VideoReady { ticket, .. }
            | Outcome::Failed { ticket, .. } => *ticket,
        }
    }
}

impl Job {
    pub fn ticket(&self) -> Ticket {
        match self {
            Job::Process { ticket, .. }
            | Job::Regenerate { ticket, .. }
            | Job::Video { ticket, .. } => *ticket,
        }
    }

    pub fn operation(&self) -> Operation {
        match self {
            Job::Process { .. } => Operation::ProcessDocuments,
            Job::Regenerate { .. } => Operation::RegenerateScript,
            Job::Video { .. } => Operation::GenerateVideo,
        }
    }

    /// Perform the backend calls for this job. Never fails: errors come back
    /// as [`Outcome::Failed`].
    pub async fn run(self, backend: &dyn Backend) -> Outcome {
        let ticket = self.ticket();
        let operation = self.operation();

        let result = match self {
            Job::Process { name, files, .. } => async {
                let processed = backend.process_documents(&files).await?;
                let project = Project::from_processed(&name, files, processed);
                let script = backend.generate_script(&project).await?;
                Ok::<_, DocreelError>(Outcome::ScriptReady {
                    ticket,
                    project,
                    script,
                })
            }
            .await,
            Job::Regenerate { project, .. } => backend
                .generate_script(&project)
                .await
                .map(|script| Outcome::ScriptRegenerated { ticket, script }),
            Job::Video {
                script,
                content_type,
                ..
            } => backend
                .generate_video(&script, &content_type)
                .await
                .map(|video| Outcome::VideoReady { ticket, video }),
        };

        result.unwrap_or_else(|e: DocreelError| {
            warn!(operation = operation.name(), error = %e, "operation failed");
            Outcome::Failed {
                ticket,
                operation,
                message: operation.failure_message(&e),
            }
        })
    }
}

#[derive(Debug, Default)]
pub struct Session {
    stage: Stage,
    project: Option<Project>,
    script: Option<Script>,
    video: Option<Video>,
    error: Option<String>,
    in_flight: Option<Ticket>,
    next_ticket: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn project(&self) -> Option<&Project> {
        self.project.as_ref()
    }

    pub fn script(&self) -> Option<&Script> {
        self.script.as_ref()
    }

    pub fn video(&self) -> Option<&Video> {
        self.video.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    fn begin(&mut self, operation: Operation) -> Result<Ticket, SessionError> {
        if self.is_loading() {
            return Err(SessionError::Busy);
        }

        let ticket = Ticket(self.next_ticket);
        self.next_ticket += 1;
        self.in_flight = Some(ticket);
        self.error = None;
        debug!(operation = operation.name(), ticket = ticket.0, "operation started");
        Ok(ticket)
    }

    fn expect_stage(&self, stage: Stage) -> Result<(), SessionError> {
        if self.stage != stage {
            return Err(SessionError::WrongStage { actual: self.stage });
        }
        Ok(())
    }

    pub fn request_processing(
        &mut self,
        name: &str,
        files: Vec<UploadedFile>,
    ) -> Result<Job, SessionError> {
        if self.is_loading() {
            return Err(SessionError::Busy);
        }
        self.expect_stage(Stage::Upload)?;
        if name.trim().is_empty() {
            return Err(SessionError::EmptyProjectName);
        }
        if files.is_empty() {
            return Err(SessionError::NoFiles);
        }

        let ticket = self.begin(Operation::ProcessDocuments)?;
        Ok(Job::Process {
            ticket,
            name: name.trim().to_string(),
            files,
        })
    }

    pub fn request_regeneration(&mut self) -> Result<Job, SessionError> {
        if self.is_loading() {
            return Err(SessionError::Busy);
        }
        self.expect_stage(Stage::Script)?;
        let project = self.project.clone().ok_or(SessionError::NoProject)?;

        let ticket = self.begin(Operation::RegenerateScript)?;
        Ok(Job::Regenerate { ticket, project })
    }

    /// Keep the edited script and ask for a video of it. The edits survive a
    /// failed request.
    pub fn request_video(&mut self, script: Script) -> Result<Job, SessionError> {
        if self.is_loading() {
            return Err(SessionError::Busy);
        }
        self.expect_stage(Stage::Script)?;
        let content_type = self
            .project
            .as_ref()
            .map(|p| p.content_type.clone())
            .ok_or(SessionError::NoProject)?;

        let ticket = self.begin(Operation::GenerateVideo)?;
        self.script = Some(script.clone());
        Ok(Job::Video {
            ticket,
            script,
            content_type,
        })
    }

    /// Fold a finished job back into the session. Returns `false` when the
    /// outcome belongs to a job that is no longer current.
    pub fn apply(&mut self, outcome: Outcome) -> bool {
        if self.in_flight != Some(outcome.ticket()) {
            debug!(ticket = outcome.ticket().0, "dropping stale outcome");
            return false;
        }
        self.in_flight = None;

        match outcome {
            Outcome::ScriptReady {
                project, script, ..
            } => {
                info!(project = %project.name, content_type = %project.content_type, "script ready");
                self.project = Some(project);
                self.script = Some(script);
                self.stage = Stage::Script;
            }
            Outcome::ScriptRegenerated { script, .. } => {
                info!("script regenerated");
                self.script = Some(script);
            }
            Outcome::VideoReady { video, .. } => {
                info!(url = %video.url, "video ready");
                self.video = Some(video);
                self.stage = Stage::Video;
            }
            Outcome::Failed { message, .. } => {
                self.error = Some(message);
            }
        }
        true
    }

    pub fn start_over(&mut self) {
        info!("starting over");
        self.stage = Stage::Upload;
        self.project = None;
        self.script = None;
        self.video = None;
        self.error = None;
        self.in_flight = None;
    }
}

/// Session plus the backend it talks to, for callers that can await each
/// step in place.
pub struct Controller {
    session: Session,
    backend: Arc<dyn Backend>,
}

impl Controller {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            session: Session::new(),
            backend,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    async fn execute(&mut self, job: Job) {
        let outcome = job.run(self.backend.as_ref()).await;
        self.session.apply(outcome);
    }

    pub async fn process(
        &mut self,
        name: &str,
        files: Vec<UploadedFile>,
    ) -> Result<(), SessionError> {
        let job = self.session.request_processing(name, files)?;
        self.execute(job).await;
        Ok(())
    }

    pub async fn regenerate(&mut self) -> Result<(), SessionError> {
        let job = self.session.request_regeneration()?;
        self.execute(job).await;
        Ok(())
    }

    pub async fn generate_video(&mut self, script: Script) -> Result<(), SessionError> {
        let job = self.session.request_video(script)?;
        self.execute(job).await;
        Ok(())
    }

    pub fn start_over(&mut self) {
        self.session.start_over();
    }
}
