//! Headless session controller.
//!
//! Owns the navigator, the active form, the transient filter/sort
//! selection and a repository handle, and routes the platform events
//! (back button, main button) between them. After every event it pushes
//! the resulting chrome state back to the host, so the back button and
//! main button always reflect where the user is.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, warn};

use crate::fields::{SortKey, SortOrder, TaskFilters};
use crate::query;
use crate::repo::{RepoError, TaskRepository};
use crate::task::{Task, TaskPatch};
use crate::ui::chrome::{Chrome, HapticStrength};
use crate::ui::form::{FormBack, TaskForm};
use crate::ui::nav::{Navigator, Screen, ScreenParams, SlideDirection};

/// Param key carrying the task id into the detail screen.
pub const TASK_ID_PARAM: &str = "taskId";

/// One user's UI session over the task collection.
pub struct Session {
    repo: Arc<TaskRepository>,
    chrome: Arc<dyn Chrome>,
    nav: Navigator,
    form: Option<TaskForm>,
    /// Task id the active form is editing; `None` while creating.
    editing: Option<String>,
    filters: TaskFilters,
    sort_key: SortKey,
    sort_order: SortOrder,
    loading: bool,
}

impl Session {
    pub fn new(repo: Arc<TaskRepository>, chrome: Arc<dyn Chrome>) -> Self {
        let session = Session {
            repo,
            chrome,
            nav: Navigator::new(),
            form: None,
            editing: None,
            filters: TaskFilters::default(),
            sort_key: SortKey::CreatedAt,
            sort_order: SortOrder::Desc,
            loading: true,
        };
        session.sync_chrome();
        session
    }

    /// Load the persisted collection. Runs once at startup; the list
    /// screen shows a spinner while `loading` is true.
    pub async fn init(&mut self) {
        self.repo.load().await;
        self.loading = false;
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn screen(&self) -> Screen {
        self.nav.current()
    }

    pub fn direction(&self) -> SlideDirection {
        self.nav.direction()
    }

    pub fn params(&self) -> Option<&ScreenParams> {
        self.nav.params()
    }

    pub fn filters(&self) -> TaskFilters {
        self.filters
    }

    pub fn set_filters(&mut self, filters: TaskFilters) {
        self.filters = filters;
    }

    pub fn set_sort(&mut self, key: SortKey, order: SortOrder) {
        self.sort_key = key;
        self.sort_order = order;
    }

    /// The list screen's view: current filters and sort applied to the
    /// repository snapshot.
    pub async fn visible_tasks(&self) -> Vec<Task> {
        let tasks = self.repo.tasks().await;
        query::project(&tasks, &self.filters, self.sort_key, self.sort_order, Utc::now())
    }

    /// Detail-screen lookup.
    pub async fn task(&self, id: &str) -> Option<Task> {
        self.repo.get(id).await
    }

    /// The active form, if the user is on the create screen.
    pub fn form(&self) -> Option<&TaskForm> {
        self.form.as_ref()
    }

    /// Edit the active form and re-sync chrome afterwards, since field
    /// changes can flip the main button's enabled state.
    pub fn with_form(&mut self, edit: impl FnOnce(&mut TaskForm)) {
        if let Some(form) = self.form.as_mut() {
            edit(form);
        }
        self.sync_chrome();
    }

    /// Open a fresh creation form.
    pub fn open_create(&mut self) {
        self.chrome.impact(HapticStrength::Medium);
        self.form = Some(TaskForm::new());
        self.editing = None;
        self.nav.navigate(Screen::TaskCreate, None);
        self.sync_chrome();
    }

    /// Open the creation form pre-filled from an existing task; on submit
    /// the task is updated in place instead of duplicated.
    pub async fn open_edit(&mut self, task_id: &str) {
        let Some(task) = self.repo.get(task_id).await else {
            warn!(id = task_id, "edit requested for unknown task");
            return;
        };
        self.form = Some(TaskForm::prefill(&crate::task::TaskDraft {
            title: task.title,
            description: task.description,
            priority: task.priority,
            deadline: task.deadline,
        }));
        self.editing = Some(task_id.to_string());
        self.nav.navigate(Screen::TaskCreate, Some(task_params(task_id)));
        self.sync_chrome();
    }

    /// Open the detail screen for a task.
    pub fn open_detail(&mut self, task_id: &str) {
        self.chrome.impact(HapticStrength::Light);
        self.nav.navigate(Screen::TaskDetail, Some(task_params(task_id)));
        self.sync_chrome();
    }

    /// Route the platform back button. While a form is active it regresses
    /// the form, cancelling out of it from step 1; otherwise it pops the
    /// navigation stack.
    pub fn back_pressed(&mut self) {
        if let Some(form) = self.form.as_mut() {
            match form.back() {
                FormBack::SteppedBack => {}
                FormBack::Cancelled => {
                    self.form = None;
                    self.editing = None;
                    self.nav.go_back();
                }
            }
        } else {
            self.nav.go_back();
        }
        self.sync_chrome();
    }

    /// Route the platform main button: advance the form, and on the final
    /// step persist the draft. A persistence failure keeps the form open
    /// and is returned for the host to alert on.
    pub async fn main_button_pressed(&mut self) -> Result<(), RepoError> {
        let Some(form) = self.form.as_mut() else {
            return Ok(());
        };
        if let Some(draft) = form.next() {
            let result = match &self.editing {
                Some(id) => self.repo.update(id, TaskPatch::from_draft(draft)).await,
                None => self.repo.create(draft).await.map(|task| {
                    debug!(id = %task.id, "task created from form");
                }),
            };
            if let Err(e) = result {
                self.sync_chrome();
                return Err(e);
            }
            self.form = None;
            self.editing = None;
            self.nav.go_back();
        }
        self.sync_chrome();
        Ok(())
    }

    /// Flip a task's status from the list or detail screen.
    pub async fn toggle_task(&mut self, id: &str) -> Result<(), RepoError> {
        self.chrome.impact(HapticStrength::Medium);
        self.repo.toggle_status(id).await
    }

    /// Delete a task and leave its detail screen.
    pub async fn delete_task(&mut self, id: &str) -> Result<(), RepoError> {
        self.repo.delete(id).await?;
        self.nav.go_back();
        self.sync_chrome();
        Ok(())
    }

    fn sync_chrome(&self) {
        self.chrome
            .set_back_button(self.form.is_some() || self.nav.can_go_back());
        match &self.form {
            Some(form) => {
                self.chrome
                    .set_main_button(form.main_button_label(), form.can_proceed(), true)
            }
            None => self.chrome.set_main_button("", false, false),
        }
    }
}

fn task_params(task_id: &str) -> ScreenParams {
    let mut params = ScreenParams::new();
    params.insert(TASK_ID_PARAM.to_string(), task_id.to_string());
    params
}
