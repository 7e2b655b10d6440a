//! Screen navigation state machine.
//!
//! A screen stack with browser-like back semantics: `navigate` pushes,
//! `go_back` pops but never past the root list screen. The history is
//! never empty and the current screen is always its last element.

use std::collections::HashMap;

/// Params attached to a navigation, e.g. the task id a detail screen
/// should show.
pub type ScreenParams = HashMap<String, String>;

/// The screens a session can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    TaskList,
    TaskCreate,
    TaskDetail,
}

impl Screen {
    /// Fixed ordering used only for deriving the slide direction.
    fn ordinal(self) -> u8 {
        match self {
            Screen::TaskList => 0,
            Screen::TaskCreate => 1,
            Screen::TaskDetail => 2,
        }
    }
}

/// Which way the transition animation should slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideDirection {
    Forward,
    Backward,
}

/// Screen stack owned by a session.
#[derive(Debug, Clone)]
pub struct Navigator {
    current: Screen,
    previous: Screen,
    history: Vec<Screen>,
    params: Option<ScreenParams>,
}

impl Navigator {
    /// A fresh navigator sitting on the task list.
    pub fn new() -> Self {
        Navigator {
            current: Screen::TaskList,
            previous: Screen::TaskList,
            history: vec![Screen::TaskList],
            params: None,
        }
    }

    pub fn current(&self) -> Screen {
        self.current
    }

    pub fn params(&self) -> Option<&ScreenParams> {
        self.params.as_ref()
    }

    /// Convenience lookup into the current params.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.as_ref().and_then(|p| p.get(key)).map(String::as_str)
    }

    pub fn can_go_back(&self) -> bool {
        self.history.len() > 1
    }

    /// Push `screen` and make it current, replacing any params.
    pub fn navigate(&mut self, screen: Screen, params: Option<ScreenParams>) {
        self.previous = self.current;
        self.history.push(screen);
        self.current = screen;
        self.params = params;
    }

    /// Pop the top screen. At the root this is a no-op and returns false;
    /// otherwise params are cleared and the new top becomes current.
    pub fn go_back(&mut self) -> bool {
        if self.history.len() <= 1 {
            return false;
        }
        self.previous = self.current;
        self.history.pop();
        if let Some(&top) = self.history.last() {
            self.current = top;
        }
        self.params = None;
        true
    }

    /// Return to the initial task-list state.
    pub fn reset(&mut self) {
        *self = Navigator::new();
    }

    /// Slide direction derived from the fixed per-screen ordinal: forward
    /// when the destination outranks the screen it replaced. A heuristic
    /// over the current 3-screen graph, not a stack-depth comparison.
    pub fn direction(&self) -> SlideDirection {
        if self.current.ordinal() > self.previous.ordinal() {
            SlideDirection::Forward
        } else {
            SlideDirection::Backward
        }
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Navigator::new()
    }
}
