//! # Clarity — task-manager core for a Telegram Mini App
//!
//! Headless state management for a to-do Mini App: task CRUD over a
//! cloud key-value store, filter/sort projection, a screen-navigation
//! state machine and a four-step creation form, all wired together by a
//! [`Session`](ui::session::Session) that keeps the platform chrome
//! (back button, main button, haptics) in sync.
//!
//! Rendering and the concrete Telegram SDK bindings live in the host
//! shell; the crate reaches the platform only through two injected
//! traits, [`CloudStore`](store::CloudStore) for persistence and
//! [`Chrome`](ui::chrome::Chrome) for the navigation chrome. Both come
//! with in-crate fakes so every component is testable without a client.
//!
//! ## Quick start
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use clarity::repo::TaskRepository;
//! use clarity::store::MemoryStore;
//! use clarity::ui::chrome::NoopChrome;
//! use clarity::ui::session::Session;
//!
//! # async fn run() {
//! let repo = Arc::new(TaskRepository::new(Arc::new(MemoryStore::new())));
//! let mut session = Session::new(repo, Arc::new(NoopChrome));
//! session.init().await;
//!
//! // The host forwards platform events:
//! session.open_create();
//! session.with_form(|form| form.set_title("Buy milk"));
//! session.main_button_pressed().await.unwrap();
//! # }
//! ```
//!
//! ## Persistence contract
//!
//! The whole collection is stored as one JSON array under the key
//! `clarity_tasks`; every mutation rewrites it in full. Loads that hit a
//! missing, unreachable or corrupt blob fall back to an empty list and
//! report the failure through `tracing` instead of crashing the app.

pub mod fields;
pub mod query;
pub mod repo;
pub mod store;
pub mod task;
pub mod ui {
    pub mod chrome;
    pub mod form;
    pub mod nav;
    pub mod session;
}
