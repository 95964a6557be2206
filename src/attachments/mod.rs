//! Upload orchestration for task attachments.
//!
//! The flow is strictly sequential: create the attachments, optionally
//! summarize the first file, then register every created attachment in the
//! task store and notify the caller. Partial successes reach the caller
//! through the callback before an aggregate creation error is raised.

/// Attachment API client and request/response types.
pub mod service;
/// Reference URL construction.
pub mod urls;

pub use service::{
    Attachment, AttachmentCreateResponse, AttachmentError, AttachmentService, FilePayload,
    HttpAttachmentService,
};
pub use urls::generate_attachment_url;

use crate::store::TaskStore;
use crate::summarize::{DocumentSummarizer, SummarizeError, SummarySimple};
use thiserror::Error;

/// Errors surfaced by upload orchestration.
#[derive(Debug, Error)]
pub enum UploadError {
    /// Transport-level failure reaching the attachment API.
    #[error(transparent)]
    Service(#[from] AttachmentError),
    /// Summarization of the first file failed.
    #[error(transparent)]
    Summarize(#[from] SummarizeError),
    /// The attachment API reported per-file failures.
    #[error("Failed to create attachments: {0}")]
    Creation(String),
}

/// Callback invoked once per created attachment with its reference URL and
/// the batch summary, when one was requested.
pub type UploadCallback<'a> = &'a mut dyn FnMut(String, Option<&SummarySimple>);

/// Upload a single file for a task. Convenience wrapper around
/// [`upload_files`].
pub async fn upload_file<S, A>(
    service: &S,
    summarizer: &A,
    store: &TaskStore,
    task_id: i64,
    file: FilePayload,
    need_ai: bool,
    on_success: Option<UploadCallback<'_>>,
) -> Result<(), UploadError>
where
    S: AttachmentService + ?Sized,
    A: DocumentSummarizer + ?Sized,
{
    upload_files(
        service,
        summarizer,
        store,
        task_id,
        vec![file],
        need_ai,
        on_success,
    )
    .await
}

/// Upload a batch of files for a task, optionally summarizing the first one.
///
/// Every attachment the backend reports as created is registered in the task
/// store and announced through `on_success` with its reference URL. When the
/// backend also reports errors, they are raised as [`UploadError::Creation`]
/// only after those per-success side effects have run.
///
/// When `need_ai` is set, only the FIRST file of the batch is summarized,
/// however many files were submitted; the same summary is passed to every
/// callback invocation.
pub async fn upload_files<S, A>(
    service: &S,
    summarizer: &A,
    store: &TaskStore,
    task_id: i64,
    files: Vec<FilePayload>,
    need_ai: bool,
    mut on_success: Option<UploadCallback<'_>>,
) -> Result<(), UploadError>
where
    S: AttachmentService + ?Sized,
    A: DocumentSummarizer + ?Sized,
{
    let response = service.create(task_id, &files).await?;
    tracing::debug!(
        task_id,
        files = files.len(),
        created = response.success.as_ref().map(Vec::len).unwrap_or(0),
        "Attachment creation finished"
    );

    let summary = match (need_ai, files.first()) {
        (true, Some(first)) => Some(summarizer.summarize(first).await?),
        _ => None,
    };

    if let Some(created) = &response.success {
        for attachment in created {
            store.add_task_attachment(task_id, attachment.clone());
            if let Some(callback) = &mut on_success {
                callback(
                    generate_attachment_url(task_id, attachment.id),
                    summary.as_ref(),
                );
            }
        }
    }

    if let Some(errors) = response.errors {
        return Err(UploadError::Creation(errors.join("; ")));
    }

    Ok(())
}
