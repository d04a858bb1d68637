pub mod command;
pub mod renderer;

pub use command::{Command, HELP_TEXT};
pub use renderer::TerminalRenderer;
