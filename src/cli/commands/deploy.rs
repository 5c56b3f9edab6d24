//! Deploy command implementation.

use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// Placeholder deploy: reports progress and returns.
#[derive(Debug, Default)]
pub struct DeployCommand;

impl DeployCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for DeployCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        ui.message("doing.....");
        Ok(CommandResult::success())
    }
}
