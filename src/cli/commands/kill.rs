//! Kill command implementation.

use crate::cli::args::KillArgs;
use crate::error::Result;
use crate::tools::Toolkit;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// Ports killed when none are given.
pub const DEFAULT_PORTS: &str = "7001,9000,9001";

/// Kills processes listening on ports.
pub struct KillCommand<'a> {
    toolkit: &'a Toolkit,
    args: KillArgs,
}

impl<'a> KillCommand<'a> {
    pub fn new(toolkit: &'a Toolkit, args: KillArgs) -> Self {
        Self { toolkit, args }
    }
}

impl Command for KillCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let ports = self.args.ports.as_deref().unwrap_or(DEFAULT_PORTS);
        let killed = self.toolkit.system.kill_ports(ports)?;

        if killed.is_empty() {
            ui.message(&format!("No process listening on {}", ports));
        } else {
            let pids: Vec<String> = killed.iter().map(u32::to_string).collect();
            ui.success(&format!("Killed {} on {}", pids.join(", "), ports));
        }
        Ok(CommandResult::success())
    }
}
