//! Task repository: owns the in-memory task list and keeps it in sync
//! with cloud storage.
//!
//! Every mutation rewrites the full collection under a single key; there
//! is no incremental diffing. The list sits behind an async mutex that
//! stays held across the persistence await, so overlapping mutations from
//! the host are serialized into a single-writer queue and cannot lose
//! each other's appends.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rand::Rng;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::fields::Status;
use crate::store::{CloudStore, StoreError, TASKS_KEY};
use crate::task::{Task, TaskDraft, TaskPatch};

/// Failure reported by repository operations.
#[derive(Debug, Error)]
pub enum RepoError {
    /// The storage collaborator was never supplied; mutations reject
    /// immediately without touching in-memory state.
    #[error("cloud storage is not available")]
    StoreUnavailable,
    #[error("failed to serialize tasks: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// In-memory task collection backed by a cloud key-value store.
pub struct TaskRepository {
    store: Option<Arc<dyn CloudStore>>,
    tasks: Mutex<Vec<Task>>,
}

impl TaskRepository {
    /// Repository backed by the given store.
    pub fn new(store: Arc<dyn CloudStore>) -> Self {
        TaskRepository {
            store: Some(store),
            tasks: Mutex::new(Vec::new()),
        }
    }

    /// Repository with no storage collaborator. Loads come back empty and
    /// every mutation rejects with [`RepoError::StoreUnavailable`].
    pub fn detached() -> Self {
        TaskRepository {
            store: None,
            tasks: Mutex::new(Vec::new()),
        }
    }

    /// Fetch and parse the persisted collection, replacing the in-memory
    /// list. A missing blob, unreachable store or unparseable payload all
    /// yield an empty list; corrupt remote state must not take the app
    /// down, so the failure is only reported through the tracing hook.
    pub async fn load(&self) -> Vec<Task> {
        let mut tasks = self.tasks.lock().await;
        let Some(store) = &self.store else {
            *tasks = Vec::new();
            return tasks.clone();
        };
        *tasks = match store.get_item(TASKS_KEY).await {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Task>>(&raw) {
                Ok(list) => list,
                Err(e) => {
                    warn!(key = TASKS_KEY, error = %e, "stored tasks unparseable, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(key = TASKS_KEY, error = %e, "failed to load tasks, starting empty");
                Vec::new()
            }
        };
        tasks.clone()
    }

    /// Snapshot of the current in-memory list.
    pub async fn tasks(&self) -> Vec<Task> {
        self.tasks.lock().await.clone()
    }

    /// Look up a single task by id.
    pub async fn get(&self, id: &str) -> Option<Task> {
        self.tasks.lock().await.iter().find(|t| t.id == id).cloned()
    }

    /// Create a task from a draft and persist the grown list. If the
    /// write fails the append is rolled back and the error re-raised, so
    /// the caller can surface it.
    pub async fn create(&self, draft: TaskDraft) -> Result<Task, RepoError> {
        let store = self.store.as_ref().ok_or(RepoError::StoreUnavailable)?;
        let mut tasks = self.tasks.lock().await;
        let now = Utc::now();
        let task = Task {
            id: generate_id(now),
            title: draft.title,
            description: draft.description,
            status: Status::Pending,
            priority: draft.priority,
            deadline: draft.deadline,
            created_at: now,
            updated_at: now,
        };
        tasks.push(task.clone());
        if let Err(e) = persist(store.as_ref(), &tasks).await {
            tasks.pop();
            return Err(e);
        }
        debug!(id = %task.id, "task created");
        Ok(task)
    }

    /// Merge patch fields into the matching task and bump `updated_at`.
    /// A failed write is logged, not rolled back: the displayed state may
    /// diverge from the store until the next successful write.
    pub async fn update(&self, id: &str, patch: TaskPatch) -> Result<(), RepoError> {
        let store = self.store.as_ref().ok_or(RepoError::StoreUnavailable)?;
        let mut tasks = self.tasks.lock().await;
        if let Some(task) = tasks.iter_mut().find(|t| t.id == id) {
            if let Some(title) = patch.title {
                task.title = title;
            }
            if let Some(description) = patch.description {
                task.description = description;
            }
            if let Some(status) = patch.status {
                task.status = status;
            }
            if let Some(priority) = patch.priority {
                task.priority = priority;
            }
            if let Some(deadline) = patch.deadline {
                task.deadline = deadline;
            }
            task.updated_at = Utc::now();
        }
        if let Err(e) = persist(store.as_ref(), &tasks).await {
            warn!(id, error = %e, "failed to persist task update");
        }
        Ok(())
    }

    /// Remove the matching task. Same failure policy as [`update`].
    ///
    /// [`update`]: TaskRepository::update
    pub async fn delete(&self, id: &str) -> Result<(), RepoError> {
        let store = self.store.as_ref().ok_or(RepoError::StoreUnavailable)?;
        let mut tasks = self.tasks.lock().await;
        tasks.retain(|t| t.id != id);
        if let Err(e) = persist(store.as_ref(), &tasks).await {
            warn!(id, error = %e, "failed to persist task deletion");
        }
        Ok(())
    }

    /// Flip a task between pending and completed. An unknown id is a
    /// complete no-op, including the write.
    pub async fn toggle_status(&self, id: &str) -> Result<(), RepoError> {
        let store = self.store.as_ref().ok_or(RepoError::StoreUnavailable)?;
        let mut tasks = self.tasks.lock().await;
        let Some(task) = tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(());
        };
        task.status = task.status.flipped();
        task.updated_at = Utc::now();
        if let Err(e) = persist(store.as_ref(), &tasks).await {
            warn!(id, error = %e, "failed to persist status toggle");
        }
        Ok(())
    }

    /// Drop every task and persist the empty collection.
    pub async fn clear(&self) -> Result<(), RepoError> {
        let store = self.store.as_ref().ok_or(RepoError::StoreUnavailable)?;
        let mut tasks = self.tasks.lock().await;
        tasks.clear();
        persist(store.as_ref(), &tasks).await
    }
}

async fn persist(store: &dyn CloudStore, tasks: &[Task]) -> Result<(), RepoError> {
    let raw = serde_json::to_string(tasks)?;
    store.set_item(TASKS_KEY, &raw).await?;
    Ok(())
}

/// Generate a collision-resistant id: millisecond epoch timestamp plus a
/// nine-character base-36 suffix.
fn generate_id(now: DateTime<Utc>) -> String {
    const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut rng = rand::thread_rng();
    let suffix: String = (0..9)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();
    format!("{}{}", now.timestamp_millis(), suffix)
}
