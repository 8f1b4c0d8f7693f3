//! CLI presenter for output formatting

use std::time::Duration;

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

use crate::application::UserInput;
use crate::domain::error::ToastError;

/// Presenter for CLI output formatting
pub struct Presenter {
    spinner: Option<ProgressBar>,
}

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self { spinner: None }
    }

    /// Start a spinner with message
    pub fn start_spinner(&mut self, message: &str) {
        let spinner = ProgressBar::new_spinner();
        match ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.cyan} {msg}")
        {
            Ok(style) => spinner.set_style(style),
            Err(e) => tracing::debug!("Falling back to the default spinner: {}", e),
        }
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(80));
        self.spinner = Some(spinner);
    }

    /// Mark spinner as success and finish
    pub fn spinner_success(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_with_message(format!("{} {}", "✓".green(), message));
        }
    }

    /// Mark spinner as failed and finish
    pub fn spinner_fail(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_with_message(format!("{} {}", "✗".red(), message));
        }
    }

    /// Stop spinner without status
    pub fn stop_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Print a toaster error with its numeric code
    pub fn toast_error(&self, context: &str, error: ToastError) {
        self.error(&format_toast_error(context, error));
    }

    /// Output text to stdout
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Print a key-value pair (for config list and user input)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }

    /// Print the values the user typed into the toast, if any
    pub fn user_input(&self, input: &UserInput) {
        for (key, value) in input {
            self.key_value(key, value);
        }
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}

/// `<context>: <description> (code N)`
pub fn format_toast_error(context: &str, error: ToastError) -> String {
    format!("{}: {} (code {})", context, error, error.code())
}

/// Human readable wait, e.g. `15s` or `1.5s`
pub fn format_wait(wait: Duration) -> String {
    let millis = wait.as_millis();
    if millis % 1000 == 0 {
        format!("{}s", millis / 1000)
    } else {
        format!("{:.1}s", wait.as_secs_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toast_error_includes_code() {
        let line = format_toast_error("Could not initialize", ToastError::ShellLinkNotCreated);
        assert!(line.starts_with("Could not initialize: "));
        assert!(line.ends_with("(code 4)"));
    }

    #[test]
    fn wait_in_whole_seconds() {
        assert_eq!(format_wait(Duration::from_secs(15)), "15s");
    }

    #[test]
    fn wait_with_fraction() {
        assert_eq!(format_wait(Duration::from_millis(1500)), "1.5s");
    }

    #[test]
    fn spinner_can_stop_without_start() {
        let mut presenter = Presenter::new();
        presenter.stop_spinner();
        presenter.spinner_success("done");
        presenter.spinner_fail("failed");
    }
}
