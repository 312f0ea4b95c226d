//! HTTP client for the video producer backend.
//!
//! Every call is a single attempt: no retry, no timeout, no backoff. Non-2xx
//! responses become [`DocreelError::Api`] carrying the most specific message
//! the backend gave us.

use async_trait::async_trait;
use reqwest::{
    StatusCode,
    multipart::{Form, Part},
};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, info};

use crate::{
    config::Config,
    error::{DocreelError, Result},
    types::{ContentType, ProcessedDocuments, Project, Script, UploadedFile, Video},
};

/// The three backend operations the workflow depends on.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn process_documents(&self, files: &[UploadedFile]) -> Result<ProcessedDocuments>;
    async fn generate_script(&self, project: &Project) -> Result<Script>;
    async fn generate_video(&self, script: &Script, content_type: &ContentType) -> Result<Video>;
}

#[derive(Clone, Debug)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateVideoBody<'a> {
    script: &'a Script,
    content_type: &'a ContentType,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.api_base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let response = self.client.post(self.url(path)).json(body).send().await?;
        handle_response(response).await
    }
}

#[async_trait]
impl Backend for ApiClient {
    async fn process_documents(&self, files: &[UploadedFile]) -> Result<ProcessedDocuments> {
        let mut form = Form::new();

        for uploaded in files {
            let path = uploaded.file.local_path();
            let bytes = tokio::fs::read(&path)
                .await
                .map_err(|source| DocreelError::FileRead {
                    path: path.clone(),
                    source,
                })?;
            debug!(id = %uploaded.id, bytes = bytes.len(), "attaching file");

            let part = Part::bytes(bytes)
                .file_name(uploaded.file.name.clone())
                .mime_str(uploaded.file.mime_type_or_default())?;
            form = form.part("files", part).text("file_ids", uploaded.id.clone());
        }

        info!(files = files.len(), "processing documents");
        let response = self
            .client
            .post(self.url("/process-documents"))
            .multipart(form)
            .send()
            .await?;
        handle_response(response).await
    }

    async fn generate_script(&self, project: &Project) -> Result<Script> {
        info!(project = %project.name, content_type = %project.content_type, "generating script");
        let script: Script = self.post_json("/generate-script", project).await?;
        Ok(script.normalized())
    }

    async fn generate_video(&self, script: &Script, content_type: &ContentType) -> Result<Video> {
        info!(content_type = %content_type, "generating video");
        self.post_json(
            "/generate-video",
            &GenerateVideoBody {
                script,
                content_type,
            },
        )
        .await
    }
}

async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(api_error(status, &body));
    }

    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Build the user-facing error for a failed response, preferring the
/// backend's `detail` field over the bare status line.
pub fn api_error(status: StatusCode, body: &str) -> DocreelError {
    let status_line = format!(
        "API Error: {} {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("")
    )
    .trim_end()
    .to_string();

    let message = match serde_json::from_str::<serde_json::Value>(body) {
        Ok(json) => match json.get("detail").and_then(|d| d.as_str()) {
            Some(detail) if !detail.trim().is_empty() => detail.to_string(),
            _ => status_line,
        },
        Err(_) if body.trim().is_empty() => status_line,
        Err(_) => format!("{} - {}", status_line, body.trim()),
    };

    DocreelError::Api {
        status: status.as_u16(),
        message,
    }
}
