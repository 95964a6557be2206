#![deny(missing_docs)]

//! Client-side helpers for task attachments.
//!
//! The crate glues three collaborators together: an attachment-creation HTTP
//! API, an AI document-summarization endpoint, and a process-wide task store.
//! [`attachments::upload_files`] runs the whole flow; everything else exists
//! to serve it.

/// Upload orchestration, attachment service client, and reference URLs.
pub mod attachments;
/// Environment-driven configuration management.
pub mod config;
/// Structured logging and tracing setup.
pub mod logging;
/// Process-wide in-memory task state.
pub mod store;
/// Document summarization client and response schemas.
pub mod summarize;
