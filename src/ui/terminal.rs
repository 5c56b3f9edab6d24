//! Interactive terminal UI.

use console::Term;
use std::io::Write;

use crate::error::Result;

use super::{
    select_on, EasypackTheme, NonInteractiveUI, OutputMode, ProgressSpinner, SelectPrompt,
    SpinnerHandle, UserInterface,
};

/// UI for a real terminal: colored lines on stdout, dialoguer prompts
/// and indicatif spinners.
pub struct TerminalUI {
    term: Term,
    theme: EasypackTheme,
    mode: OutputMode,
}

impl TerminalUI {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            term: Term::stdout(),
            theme: EasypackTheme::detect(),
            mode,
        }
    }

    fn status_line(&mut self, line: String) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", line).ok();
        }
    }
}

impl UserInterface for TerminalUI {
    fn message(&mut self, msg: &str) {
        self.status_line(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        let line = self.theme.format_success(msg);
        self.status_line(line);
    }

    fn warning(&mut self, msg: &str) {
        let line = self.theme.format_warning(msg);
        self.status_line(line);
    }

    fn error(&mut self, msg: &str) {
        // Errors go to stderr in every mode.
        eprintln!("{}", self.theme.format_error(msg));
    }

    fn show_value(&mut self, label: &str, value: &str) {
        writeln!(self.term, "{}\n{}", self.theme.format_label(label), value).ok();
    }

    fn select(&mut self, prompt: &SelectPrompt) -> Result<String> {
        select_on(prompt, &self.term)
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_status() {
            Box::new(ProgressSpinner::new(message))
        } else {
            Box::new(ProgressSpinner::hidden())
        }
    }
}

/// Terminal UI when interactive and stdout is a TTY, else [`NonInteractiveUI`].
pub fn create_ui(interactive: bool, mode: OutputMode) -> Box<dyn UserInterface> {
    if interactive && Term::stdout().is_term() {
        Box::new(TerminalUI::new(mode))
    } else {
        Box::new(NonInteractiveUI::new(mode))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_terminal_uses_hidden_spinner() {
        let mut ui = TerminalUI::new(OutputMode::Quiet);
        let mut spinner = ui.start_spinner("Cloning");
        spinner.finish_success("Cloned");
    }

    #[test]
    fn create_ui_non_interactive_still_reports() {
        let mut ui = create_ui(false, OutputMode::Quiet);
        ui.message("hidden in quiet mode");
        ui.error("always shown");
    }
}
