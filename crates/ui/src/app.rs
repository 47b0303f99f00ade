mod command;
mod document;
mod draw;
mod mouse;
mod run;
mod state;
mod types;

#[cfg(test)]
mod tests;

pub use run::restore_terminal;
pub use state::App;
pub use types::{AskAiHook, CommandOutcome, DocumentStatus, PageStatus, Screen};
