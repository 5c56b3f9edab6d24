//! Placeholder for reserved commands (`debug`, `test`, `cov`, `add`).

use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// A reserved command that does nothing.
pub struct UnimplementedCommand {
    name: &'static str,
}

impl UnimplementedCommand {
    pub fn new(name: &'static str) -> Self {
        Self { name }
    }
}

impl Command for UnimplementedCommand {
    fn execute(&self, _ui: &mut dyn UserInterface) -> Result<CommandResult> {
        tracing::debug!(command = self.name, "not implemented");
        Ok(CommandResult::unimplemented(self.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::dispatcher::Outcome;
    use crate::ui::MockUI;

    #[test]
    fn reports_unimplemented_without_output() {
        let mut ui = MockUI::new();
        let result = UnimplementedCommand::new("add").execute(&mut ui).unwrap();

        assert_eq!(result.exit_code, 0);
        assert_eq!(result.outcome, Outcome::Unimplemented("add".to_string()));
        assert!(ui.messages().is_empty());
        assert!(ui.warnings().is_empty());
    }
}
