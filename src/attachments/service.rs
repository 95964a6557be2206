//! HTTP client for the attachment-creation API.

use crate::attachments::urls::join_endpoint;
use crate::config::get_config;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors returned while talking to the attachment API.
#[derive(Debug, Error)]
pub enum AttachmentError {
    /// HTTP layer failed before receiving a response.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// Attachment API responded with an unexpected status code.
    #[error("Unexpected attachment API response ({status}): {body}")]
    UnexpectedStatus {
        /// HTTP status returned from the API.
        status: StatusCode,
        /// Body payload associated with the failing response.
        body: String,
    },
}

/// An in-memory file queued for upload.
#[derive(Debug, Clone)]
pub struct FilePayload {
    /// File name reported to the backend and the summarizer.
    pub file_name: String,
    /// Optional MIME type; the transport default applies when absent.
    pub content_type: Option<String>,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

impl FilePayload {
    /// Build a payload with no explicit content type.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            bytes,
        }
    }

    pub(crate) fn to_part(&self) -> Result<Part, reqwest::Error> {
        let part = Part::bytes(self.bytes.clone()).file_name(self.file_name.clone());
        match &self.content_type {
            Some(content_type) => part.mime_str(content_type),
            None => Ok(part),
        }
    }
}

/// A file attached to a task, owned and identified by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    /// Backend-assigned attachment identifier.
    pub id: i64,
    /// Task the attachment belongs to, when the backend reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<i64>,
    /// Stored file name, when the backend reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

/// Result of an attachment-creation call.
///
/// The backend reports per-file outcomes: `success` lists the attachments it
/// created, `errors` is `None` when every file went through.
#[derive(Debug, Clone, Deserialize)]
pub struct AttachmentCreateResponse {
    /// Attachments created by this call.
    #[serde(default)]
    pub success: Option<Vec<Attachment>>,
    /// Per-file failure messages, `None` when there was no error.
    #[serde(default)]
    pub errors: Option<Vec<String>>,
}

/// Interface to the attachment-creation backend.
#[async_trait]
pub trait AttachmentService: Send + Sync {
    /// Upload a batch of files for the given task.
    async fn create(
        &self,
        task_id: i64,
        files: &[FilePayload],
    ) -> Result<AttachmentCreateResponse, AttachmentError>;
}

/// HTTP implementation of [`AttachmentService`] against the task API.
pub struct HttpAttachmentService {
    client: Client,
    base_url: String,
}

impl HttpAttachmentService {
    /// Construct a client targeting the configured task API.
    pub fn new() -> Result<Self, AttachmentError> {
        Self::with_base_url(&get_config().api_url)
    }

    /// Construct a client targeting an explicit base URL.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, AttachmentError> {
        let client = Client::builder().user_agent("taskattach/0.2").build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl AttachmentService for HttpAttachmentService {
    async fn create(
        &self,
        task_id: i64,
        files: &[FilePayload],
    ) -> Result<AttachmentCreateResponse, AttachmentError> {
        let mut form = Form::new();
        for file in files {
            form = form.part("files", file.to_part()?);
        }

        let url = join_endpoint(&self.base_url, &format!("tasks/{task_id}/attachments"));
        let response = self.client.put(url).multipart(form).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let error = AttachmentError::UnexpectedStatus { status, body };
            tracing::error!(task_id, error = %error, "Attachment upload failed");
            return Err(error);
        }

        let result: AttachmentCreateResponse = response.json().await?;
        tracing::debug!(
            task_id,
            files = files.len(),
            created = result.success.as_ref().map(Vec::len).unwrap_or(0),
            "Uploaded attachments"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::{Method::PUT, MockServer};
    use serde_json::json;

    #[tokio::test]
    async fn create_parses_success_and_errors() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(PUT).path("/tasks/7/attachments");
                then.status(200).json_body(json!({
                    "success": [
                        { "id": 3, "taskId": 7, "fileName": "notes.txt" }
                    ],
                    "errors": null
                }));
            })
            .await;

        let service = HttpAttachmentService::with_base_url(server.base_url()).expect("client");
        let files = vec![FilePayload::new("notes.txt", b"hello".to_vec())];
        let result = service.create(7, &files).await.expect("create");

        mock.assert();
        let created = result.success.expect("success list");
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].id, 3);
        assert_eq!(created[0].file_name.as_deref(), Some("notes.txt"));
        assert!(result.errors.is_none());
    }

    #[tokio::test]
    async fn create_surfaces_unexpected_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(PUT).path("/tasks/7/attachments");
                then.status(403).body("forbidden");
            })
            .await;

        let service = HttpAttachmentService::with_base_url(server.base_url()).expect("client");
        let files = vec![FilePayload::new("notes.txt", b"hello".to_vec())];
        let error = service.create(7, &files).await.expect_err("must fail");

        assert!(matches!(
            error,
            AttachmentError::UnexpectedStatus { status, ref body }
                if status == StatusCode::FORBIDDEN && body == "forbidden"
        ));
    }
}
