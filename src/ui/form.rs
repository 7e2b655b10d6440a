//! Multi-step task creation form.
//!
//! Four steps, one field each: title, description, priority, deadline.
//! The platform main button advances (`next`), the platform back button
//! regresses (`back`) and cancels out of step 1. Only step 1 gates
//! advancement: a task needs a title, everything else is optional.

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::fields::Priority;
use crate::task::TaskDraft;

const FIRST_STEP: u8 = 1;
const LAST_STEP: u8 = 4;

/// What the platform back button did to the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormBack {
    /// Moved one step back.
    SteppedBack,
    /// Was already on step 1; the host should leave the form.
    Cancelled,
}

/// State of one creation (or edit) session. Construct a fresh form on
/// every entry so field values never leak between sessions.
#[derive(Debug, Clone)]
pub struct TaskForm {
    step: u8,
    title: String,
    description: String,
    priority: Priority,
    deadline: String,
}

impl TaskForm {
    pub fn new() -> Self {
        TaskForm {
            step: FIRST_STEP,
            title: String::new(),
            description: String::new(),
            priority: Priority::Medium,
            deadline: String::new(),
        }
    }

    /// Form pre-populated from an existing draft (the edit flow). Starts
    /// back at step 1 like any other session.
    pub fn prefill(draft: &TaskDraft) -> Self {
        TaskForm {
            step: FIRST_STEP,
            title: draft.title.clone(),
            description: draft.description.clone(),
            priority: draft.priority,
            deadline: draft.deadline.map(|d| d.to_rfc3339()).unwrap_or_default(),
        }
    }

    pub fn step(&self) -> u8 {
        self.step
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// Raw deadline input as typed; empty means no deadline.
    pub fn deadline_input(&self) -> &str {
        &self.deadline
    }

    pub fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    pub fn set_description(&mut self, description: &str) {
        self.description = description.to_string();
    }

    pub fn set_priority(&mut self, priority: Priority) {
        self.priority = priority;
    }

    pub fn set_deadline(&mut self, deadline: &str) {
        self.deadline = deadline.to_string();
    }

    /// Whether the main button should be enabled. Only step 1 gates:
    /// a whitespace-only title does not count.
    pub fn can_proceed(&self) -> bool {
        self.step != FIRST_STEP || !self.title.trim().is_empty()
    }

    /// Label for the platform main button at the current step.
    pub fn main_button_label(&self) -> &'static str {
        if self.step == LAST_STEP {
            "Create"
        } else {
            "Next"
        }
    }

    /// Advance one step, or submit from the last step. Returns the
    /// submitted draft exactly once, with title and description trimmed
    /// and an empty deadline normalized to absent. Blocked advancement is
    /// a no-op returning `None`.
    pub fn next(&mut self) -> Option<TaskDraft> {
        if !self.can_proceed() {
            return None;
        }
        if self.step < LAST_STEP {
            self.step += 1;
            return None;
        }
        // The title can have been cleared after step 1; refuse to submit
        // without one.
        if self.title.trim().is_empty() {
            return None;
        }
        Some(TaskDraft {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            priority: self.priority,
            deadline: self.parsed_deadline(),
        })
    }

    /// React to the platform back button: step back, or report that the
    /// host should cancel out of the form.
    pub fn back(&mut self) -> FormBack {
        if self.step > FIRST_STEP {
            self.step -= 1;
            FormBack::SteppedBack
        } else {
            FormBack::Cancelled
        }
    }

    fn parsed_deadline(&self) -> Option<DateTime<Utc>> {
        let raw = self.deadline.trim();
        if raw.is_empty() {
            return None;
        }
        match DateTime::parse_from_rfc3339(raw) {
            Ok(d) => Some(d.with_timezone(&Utc)),
            Err(e) => {
                warn!(input = raw, error = %e, "deadline input not a valid date, dropping it");
                None
            }
        }
    }
}

impl Default for TaskForm {
    fn default() -> Self {
        TaskForm::new()
    }
}
