//! Platform chrome boundary: back button, main button, haptics.
//!
//! The host client owns the actual widgets; the crate only pushes desired
//! state through this trait. Injected explicitly so sessions never reach
//! for SDK globals.

use std::sync::Mutex;

/// Haptic impact strength, mirroring the impacts the client exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HapticStrength {
    Light,
    Medium,
}

/// Chrome the session keeps in sync after every UI event.
pub trait Chrome: Send + Sync {
    /// Show or hide the platform back button.
    fn set_back_button(&self, visible: bool);

    /// Configure the primary-action button.
    fn set_main_button(&self, label: &str, enabled: bool, visible: bool);

    /// Fire a haptic impact.
    fn impact(&self, strength: HapticStrength);
}

/// Chrome that does nothing, for hosts without platform bindings.
#[derive(Debug, Default)]
pub struct NoopChrome;

impl Chrome for NoopChrome {
    fn set_back_button(&self, _visible: bool) {}

    fn set_main_button(&self, _label: &str, _enabled: bool, _visible: bool) {}

    fn impact(&self, _strength: HapticStrength) {}
}

/// One recorded chrome call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChromeEvent {
    BackButton { visible: bool },
    MainButton { label: String, enabled: bool, visible: bool },
    Impact(HapticStrength),
}

/// Chrome that records every call, for tests.
#[derive(Debug, Default)]
pub struct RecordingChrome {
    events: Mutex<Vec<ChromeEvent>>,
}

impl RecordingChrome {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything recorded so far, oldest first.
    pub fn events(&self) -> Vec<ChromeEvent> {
        self.events.lock().expect("chrome event log poisoned").clone()
    }

    /// The most recent main-button state, if one was ever set.
    pub fn last_main_button(&self) -> Option<ChromeEvent> {
        self.events()
            .into_iter()
            .rev()
            .find(|e| matches!(e, ChromeEvent::MainButton { .. }))
    }

    /// The most recent back-button visibility, if one was ever set.
    pub fn last_back_button(&self) -> Option<bool> {
        self.events().into_iter().rev().find_map(|e| match e {
            ChromeEvent::BackButton { visible } => Some(visible),
            _ => None,
        })
    }

    fn push(&self, event: ChromeEvent) {
        self.events.lock().expect("chrome event log poisoned").push(event);
    }
}

impl Chrome for RecordingChrome {
    fn set_back_button(&self, visible: bool) {
        self.push(ChromeEvent::BackButton { visible });
    }

    fn set_main_button(&self, label: &str, enabled: bool, visible: bool) {
        self.push(ChromeEvent::MainButton {
            label: label.to_string(),
            enabled,
            visible,
        });
    }

    fn impact(&self, strength: HapticStrength) {
        self.push(ChromeEvent::Impact(strength));
    }
}
