//! BoxCanvas application
//!
//! The application shell: windowing, input handling, the egui overlay and
//! the profile panel wired to the canvas.

mod app;
mod event_handler;
mod shortcuts;
mod ui;

pub use app::{App, AppConfig, AppError};
pub use event_handler::EventHandler;
pub use shortcuts::{Shortcut, ShortcutAction, ShortcutRegistry};
pub use ui::{UiAction, UiState, canvas_cursor, render_ui};
