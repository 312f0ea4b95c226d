use std::sync::Arc;

use docreel_core::{
    ApiClient, Backend, ContentType, Controller, DocreelError, Project, Script, Stage, UploadForm,
    file_info_from_path,
};
use mockito::Matcher;
use serde_json::json;

const SCRIPT_BODY: &str = r#"{
    "raw": "Hook\n\nBody\n\nRecap\n\nSubscribe",
    "intro": "Hook",
    "mainContent": "Body",
    "summary": "Recap",
    "cta": "Subscribe"
}"#;

fn write_doc(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn project() -> Project {
    Project {
        name: "Demo".to_string(),
        files: Vec::new(),
        content_type: ContentType::Tutorial,
    }
}

#[tokio::test]
async fn process_documents_sends_files_with_ids() {
    let mut server = mockito::Server::new_async().await;
    let dir = tempfile::tempdir().unwrap();
    let mut form = UploadForm::new();
    form.add_files([file_info_from_path(&write_doc(&dir, "notes.txt", "hello backend")).unwrap()]);

    let mock = server
        .mock("POST", "/process-documents")
        .match_header("content-type", Matcher::Regex("multipart/form-data".into()))
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#"name="files"; filename="notes.txt""#.into()),
            Matcher::Regex("hello backend".into()),
            Matcher::Regex(r#"name="file_ids""#.into()),
            Matcher::Regex("file-0-notes.txt".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "contentType": "Documentary",
                "fileSummaries": [{"id": "file-0-notes.txt", "summary": "A greeting."}]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = ApiClient::new(&server.url());
    let processed = client.process_documents(form.files()).await.unwrap();

    mock.assert_async().await;
    assert_eq!(processed.content_type, ContentType::Other("Documentary".to_string()));
    assert_eq!(processed.file_summaries[0].summary, "A greeting.");
}

#[tokio::test]
async fn unreadable_file_fails_before_sending() {
    let server = mockito::Server::new_async().await;
    let dir = tempfile::tempdir().unwrap();
    let path = write_doc(&dir, "gone.txt", "x");
    let mut form = UploadForm::new();
    form.add_files([file_info_from_path(&path).unwrap()]);
    std::fs::remove_file(&path).unwrap();

    let client = ApiClient::new(&server.url());
    let err = client.process_documents(form.files()).await.unwrap_err();
    assert!(matches!(err, DocreelError::FileRead { .. }));
}

#[tokio::test]
async fn generate_script_posts_project_json() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/generate-script")
        .match_body(Matcher::PartialJson(json!({
            "name": "Demo",
            "contentType": "Tutorial",
            "files": []
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(SCRIPT_BODY)
        .create_async()
        .await;

    let client = ApiClient::new(&server.url());
    let script = client.generate_script(&project()).await.unwrap();

    mock.assert_async().await;
    assert_eq!(script.main_content, "Body");
    assert_eq!(script.cta, "Subscribe");
}

#[tokio::test]
async fn generate_video_sends_script_and_content_type() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/generate-video")
        .match_body(Matcher::PartialJson(json!({
            "script": {"intro": "Edited hook"},
            "contentType": "True Crime"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "url": "https://cdn.example/v.mp4",
                "thumbnailUrl": "https://cdn.example/t.jpg",
                "tags": ["AI Generated", "True Crime"]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let script = Script {
        intro: "Edited hook".to_string(),
        ..Default::default()
    };
    let client = ApiClient::new(&server.url());
    let video = client
        .generate_video(&script, &ContentType::Crime)
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(video.thumbnail_url, "https://cdn.example/t.jpg");
    assert_eq!(video.tags.len(), 2);
}

#[tokio::test]
async fn generate_video_sends_empty_scene_list() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/generate-video")
        .match_body(Matcher::PartialJson(json!({
            "script": {"intro": "Only sections", "scenes": []}
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"url": "u", "thumbnailUrl": "t", "tags": []}"#)
        .create_async()
        .await;

    let script = Script {
        raw: "Only sections".to_string(),
        intro: "Only sections".to_string(),
        ..Default::default()
    };
    let client = ApiClient::new(&server.url());
    client
        .generate_video(&script, &ContentType::Unknown)
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn backend_detail_becomes_error_message() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/generate-script")
        .with_status(500)
        .with_header("content-type", "application/json")
        .with_body(r#"{"detail": "Failed to generate script."}"#)
        .create_async()
        .await;

    let client = ApiClient::new(&server.url());
    let err = client.generate_script(&project()).await.unwrap_err();

    match err {
        DocreelError::Api { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "Failed to generate script.");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[tokio::test]
async fn malformed_success_body_is_an_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/generate-video")
        .with_status(200)
        .with_body("<html>not json</html>")
        .create_async()
        .await;

    let client = ApiClient::new(&server.url());
    let err = client
        .generate_video(&Script::default(), &ContentType::Unknown)
        .await
        .unwrap_err();
    assert!(matches!(err, DocreelError::JsonError(_)));
}

#[tokio::test]
async fn full_workflow_against_http_backend() {
    let mut server = mockito::Server::new_async().await;
    let dir = tempfile::tempdir().unwrap();
    let mut form = UploadForm::new();
    form.set_project_name("Demo");
    form.add_files([file_info_from_path(&write_doc(&dir, "a.md", "# A")).unwrap()]);

    server
        .mock("POST", "/process-documents")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "contentType": "Tutorial",
                "fileSummaries": [{"id": "file-0-a.md", "summary": "About A"}]
            })
            .to_string(),
        )
        .create_async()
        .await;
    let script_mock = server
        .mock("POST", "/generate-script")
        .match_body(Matcher::PartialJson(json!({
            "files": [{"id": "file-0-a.md", "summary": "About A"}]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(SCRIPT_BODY)
        .create_async()
        .await;
    let video_mock = server
        .mock("POST", "/generate-video")
        .match_body(Matcher::PartialJson(json!({
            "script": {"mainContent": "Rewritten body"}
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"url": "u", "thumbnailUrl": "t", "tags": []}"#)
        .create_async()
        .await;

    let mut controller = Controller::new(Arc::new(ApiClient::new(&server.url())));
    controller
        .process(&form.project_name, form.files().to_vec())
        .await
        .unwrap();
    assert_eq!(controller.session().stage(), Stage::Script);

    let mut draft = docreel_core::ScriptDraft::new(controller.session().script().unwrap());
    draft.set(docreel_core::Section::MainContent, "Rewritten body");
    controller.generate_video(draft.finalize()).await.unwrap();

    script_mock.assert_async().await;
    video_mock.assert_async().await;
    assert_eq!(controller.session().stage(), Stage::Video);
    assert_eq!(controller.session().error(), None);
}

#[tokio::test]
async fn unreachable_backend_reports_connection_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut form = UploadForm::new();
    form.add_files([file_info_from_path(&write_doc(&dir, "a.txt", "a")).unwrap()]);

    let mut controller = Controller::new(Arc::new(ApiClient::new("http://127.0.0.1:1")));
    controller.process("Demo", form.files().to_vec()).await.unwrap();

    let session = controller.session();
    assert_eq!(session.stage(), Stage::Upload);
    assert!(
        session
            .error()
            .unwrap()
            .starts_with("Failed to process documents. Please check your connection")
    );
}
