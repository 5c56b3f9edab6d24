//! User interface components.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for interactive terminal usage
//! - [`NonInteractiveUI`] for CI/headless environments
//! - [`MockUI`] for tests
//!
//! # Example
//!
//! ```
//! use easypack::ui::{create_ui, OutputMode};
//!
//! // Use non-interactive mode for testability
//! let mut ui = create_ui(false, OutputMode::Quiet);
//! ui.success("Build complete");
//! ```

pub mod mock;
pub mod non_interactive;
pub mod output;
pub mod prompts;
pub mod spinner;
pub mod terminal;
pub mod theme;

pub use mock::{MockSpinner, MockUI};
pub use non_interactive::NonInteractiveUI;
pub use output::OutputMode;
pub use prompts::select_on;
pub use spinner::ProgressSpinner;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, EasypackTheme};

use crate::error::Result;

/// Trait for user interface interactions.
///
/// Commands only talk to the user through this trait so tests can
/// swap in [`MockUI`].
pub trait UserInterface {
    /// Display a message to the user.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);

    /// Display a highlighted label followed by a (possibly multi-line) value.
    fn show_value(&mut self, label: &str, value: &str);

    /// Ask the user to pick one option; returns the chosen option's value.
    fn select(&mut self, prompt: &SelectPrompt) -> Result<String>;

    /// Start a spinner for an operation.
    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle>;
}

/// Handle for finishing a spinner.
pub trait SpinnerHandle {
    /// Mark the operation as successful.
    fn finish_success(&mut self, msg: &str);

    /// Mark the operation as failed.
    fn finish_error(&mut self, msg: &str);
}

/// A pick-one question.
#[derive(Debug, Clone)]
pub struct SelectPrompt {
    /// Key used for `EASYPACK_PROMPT_<KEY>` overrides and test lookup.
    pub key: String,
    pub question: String,
    pub options: Vec<SelectOption>,
    /// Value preselected in the list.
    pub default: Option<String>,
}

/// An option in a select prompt.
#[derive(Debug, Clone)]
pub struct SelectOption {
    /// Display label.
    pub label: String,
    /// Value returned when selected.
    pub value: String,
}

impl SelectPrompt {
    /// Index of the default option, or the first one.
    pub fn default_index(&self) -> usize {
        self.default
            .as_ref()
            .and_then(|d| self.options.iter().position(|o| o.value == *d))
            .unwrap_or(0)
    }
}
