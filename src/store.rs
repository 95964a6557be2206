//! Process-wide in-memory task state.

use crate::attachments::Attachment;
use std::collections::HashMap;
use std::sync::RwLock;

/// Tracks which attachments belong to which task.
///
/// The store is the single point of truth for attachment membership and is
/// mutated only through [`TaskStore::add_task_attachment`]. Interior locking
/// makes it safe to share behind a reference or `Arc`.
#[derive(Default)]
pub struct TaskStore {
    attachments: RwLock<HashMap<i64, Vec<Attachment>>>,
}

impl TaskStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an attachment under the given task.
    pub fn add_task_attachment(&self, task_id: i64, attachment: Attachment) {
        let mut attachments = self
            .attachments
            .write()
            .expect("task store lock poisoned");
        attachments.entry(task_id).or_default().push(attachment);
        tracing::debug!(task_id, "Registered task attachment");
    }

    /// Snapshot the attachments currently registered for a task.
    pub fn task_attachments(&self, task_id: i64) -> Vec<Attachment> {
        self.attachments
            .read()
            .expect("task store lock poisoned")
            .get(&task_id)
            .cloned()
            .unwrap_or_default()
    }
}
