use httpmock::{Method::POST, Method::PUT, MockServer};
use serde_json::json;
use taskattach::attachments::{self, FilePayload, HttpAttachmentService};
use taskattach::config;
use taskattach::store::TaskStore;
use taskattach::summarize::HttpSummarizer;
use tokio::sync::OnceCell;

static SERVER: OnceCell<&'static MockServer> = OnceCell::const_new();

fn set_env(key: &str, value: &str) {
    // SAFETY: Tests run in a single process and establish deterministic configuration upfront.
    unsafe { std::env::set_var(key, value) }
}

async fn harness() -> &'static MockServer {
    SERVER
        .get_or_init(|| async {
            let server: &'static MockServer = Box::leak(Box::new(MockServer::start_async().await));
            set_env("TASK_API_URL", &server.base_url());
            config::init_config();
            server
        })
        .await
}

#[tokio::test]
async fn uploads_register_attachments_and_summarize_once() {
    let server = harness().await;

    let create_mock = server
        .mock_async(|when, then| {
            when.method(PUT).path("/tasks/42/attachments");
            then.status(200).json_body(json!({
                "success": [
                    { "id": 1, "taskId": 42, "fileName": "contract.pdf" },
                    { "id": 2, "taskId": 42, "fileName": "annex.pdf" }
                ],
                "errors": null
            }));
        })
        .await;

    let summarize_mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/aiapi/summarizeDocument");
            then.status(200).json_body(json!({
                "id": "doc-1",
                "summary": "A contract renewal request awaiting legal sign-off."
            }));
        })
        .await;

    let service = HttpAttachmentService::new().expect("service");
    let summarizer = HttpSummarizer::new().expect("summarizer");
    let store = TaskStore::new();
    let mut seen: Vec<(String, Option<String>)> = Vec::new();

    attachments::upload_files(
        &service,
        &summarizer,
        &store,
        42,
        vec![
            FilePayload::new("contract.pdf", b"%PDF-1.7 contract".to_vec()),
            FilePayload::new("annex.pdf", b"%PDF-1.7 annex".to_vec()),
        ],
        true,
        Some(&mut |url, summary| seen.push((url, summary.map(|s| s.summary.clone())))),
    )
    .await
    .expect("upload flow");

    create_mock.assert_async().await;
    summarize_mock.assert_hits_async(1).await;

    let base = server.base_url();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0].0, format!("{base}/tasks/42/attachments/1"));
    assert_eq!(seen[1].0, format!("{base}/tasks/42/attachments/2"));
    for (_, summary) in &seen {
        assert_eq!(
            summary.as_deref(),
            Some("A contract renewal request awaiting legal sign-off.")
        );
    }
    assert_eq!(store.task_attachments(42).len(), 2);
}

#[tokio::test]
async fn backend_errors_surface_without_callbacks() {
    let server = harness().await;

    server
        .mock_async(|when, then| {
            when.method(PUT).path("/tasks/99/attachments");
            then.status(200).json_body(json!({
                "success": [],
                "errors": ["corrupt.pdf: could not be read"]
            }));
        })
        .await;

    let service = HttpAttachmentService::new().expect("service");
    let summarizer = HttpSummarizer::new().expect("summarizer");
    let store = TaskStore::new();
    let mut callbacks = 0usize;

    let error = attachments::upload_files(
        &service,
        &summarizer,
        &store,
        99,
        vec![FilePayload::new("corrupt.pdf", b"not a pdf".to_vec())],
        false,
        Some(&mut |_url, _summary| callbacks += 1),
    )
    .await
    .expect_err("backend errors must surface");

    assert!(matches!(error, attachments::UploadError::Creation(_)));
    assert_eq!(callbacks, 0);
    assert!(store.task_attachments(99).is_empty());
}
