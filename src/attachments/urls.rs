//! Reference URL construction for attachments.

use crate::config::get_config;

/// Build the canonical download URL for an attachment, rooted at the
/// configured API base.
pub fn generate_attachment_url(task_id: i64, attachment_id: i64) -> String {
    format_attachment_url(&get_config().api_url, task_id, attachment_id)
}

fn format_attachment_url(base: &str, task_id: i64, attachment_id: i64) -> String {
    join_endpoint(base, &format!("tasks/{task_id}/attachments/{attachment_id}"))
}

pub(crate) fn join_endpoint(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{base}/{path}")
}
