pub mod app;
mod layout;
mod panels;
mod theme;
mod tooltip_view;
mod upload_view;
mod viewer;

pub use app::{restore_terminal, App, AskAiHook, CommandOutcome, DocumentStatus, PageStatus, Screen};
pub use theme::Theme;
