//! Non-interactive UI for CI/headless environments.

use std::collections::HashMap;

use crate::error::{EasypackError, Result};

use super::{OutputMode, SelectPrompt, SpinnerHandle, UserInterface};

const PROMPT_ENV_PREFIX: &str = "EASYPACK_PROMPT_";

/// Plain-text UI used when stdout is not a terminal or CI is detected.
///
/// Select prompts resolve from `EASYPACK_PROMPT_<KEY>`, then from the
/// prompt's default, and fail otherwise. An answer that is not one of the
/// options is passed through unchanged so a repository URL can be given
/// where a boilerplate id is asked for.
pub struct NonInteractiveUI {
    mode: OutputMode,
    answers: HashMap<String, String>,
}

impl NonInteractiveUI {
    pub fn new(mode: OutputMode) -> Self {
        let answers = std::env::vars()
            .filter_map(|(k, v)| {
                k.strip_prefix(PROMPT_ENV_PREFIX)
                    .map(|key| (key.to_lowercase(), v))
            })
            .collect();
        Self::with_answers(mode, answers)
    }

    /// Create with explicit answers keyed by prompt key.
    pub fn with_answers(mode: OutputMode, answers: HashMap<String, String>) -> Self {
        Self { mode, answers }
    }
}

impl UserInterface for NonInteractiveUI {
    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", msg);
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("✓ {}", msg);
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            eprintln!("⚠ {}", msg);
        }
    }

    fn error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }

    fn show_value(&mut self, label: &str, value: &str) {
        println!("{}\n{}", label, value);
    }

    fn select(&mut self, prompt: &SelectPrompt) -> Result<String> {
        if let Some(answer) = self.answers.get(&prompt.key.to_lowercase()) {
            return Ok(answer.clone());
        }
        prompt
            .default
            .clone()
            .ok_or_else(|| EasypackError::ConfigValidationError {
                message: format!(
                    "Cannot prompt for '{}' in non-interactive mode; set {}{}",
                    prompt.key,
                    PROMPT_ENV_PREFIX,
                    prompt.key.to_uppercase()
                ),
            })
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_status() {
            println!("  {}", message);
        }
        Box::new(LineSpinner {
            show: self.mode.shows_status(),
        })
    }
}

/// Prints only the final line of an operation.
struct LineSpinner {
    show: bool,
}

impl SpinnerHandle for LineSpinner {
    fn finish_success(&mut self, msg: &str) {
        if self.show {
            println!("✓ {}", msg);
        }
    }

    fn finish_error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }
}
