//! FormDraft Application
//!
//! The application shell: windowing, GPU setup, the egui interface and the
//! bridge that turns egui pointer and touch input into canvas events.

mod app;
mod event_handler;
mod gpu;
mod ui;

pub use app::{App, AppConfig};
pub use event_handler::EventHandler;
pub use ui::{UiAction, UiOutput, UiState, render_ui};

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::run_wasm;
