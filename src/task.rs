//! Task data structure and related functionality.
//!
//! This module defines the core `Task` struct that represents a single
//! to-do item, plus the draft and patch shapes the form and repository
//! exchange.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::fields::{Priority, Status};

/// A single to-do item.
///
/// Serialized field names are camelCase to stay compatible with the JSON
/// array persisted under the cloud-storage key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: Status,
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// What the creation form submits. The repository fills in id, status and
/// the timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub deadline: Option<DateTime<Utc>>,
}

/// Partial update merged into an existing task. `deadline` is doubly
/// optional so a patch can clear it (`Some(None)`) or leave it untouched
/// (`None`).
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    pub deadline: Option<Option<DateTime<Utc>>>,
}

impl TaskPatch {
    /// Patch carrying every field of a submitted draft, for the edit flow.
    pub fn from_draft(draft: TaskDraft) -> Self {
        TaskPatch {
            title: Some(draft.title),
            description: Some(draft.description),
            status: None,
            priority: Some(draft.priority),
            deadline: Some(draft.deadline),
        }
    }
}
