//! CLI layer - Command-line interface
//!
//! Contains argument parsing, output formatting, the config subcommand,
//! and the console toast runner.

pub mod app;
pub mod args;
pub mod config_cmd;
pub mod presenter;

// Re-export commonly used types
pub use app::{run, RunOutcome, EXIT_ACTION_CLICKED, EXIT_ERROR, EXIT_SHORTCUT_CONFLICT, EXIT_SUCCESS};
pub use args::{strip_activation_flag, Cli, Commands, ConfigAction, ToastOptions};
pub use config_cmd::handle_config_command;
pub use presenter::Presenter;
