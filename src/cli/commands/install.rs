//! Install command implementation.

use crate::cli::args::InstallArgs;
use crate::config::{build_configuration, Extra, InstallOverride, Overrides, ProgramDefaults};
use crate::error::Result;
use crate::tools::Toolkit;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The install command implementation.
///
/// Resolving the config with an install check makes the engine install
/// missing dependencies; the resolved config itself is discarded.
pub struct InstallCommand<'a> {
    defaults: &'a ProgramDefaults,
    toolkit: &'a Toolkit,
    args: InstallArgs,
}

impl<'a> InstallCommand<'a> {
    pub fn new(defaults: &'a ProgramDefaults, toolkit: &'a Toolkit, args: InstallArgs) -> Self {
        Self {
            defaults,
            toolkit,
            args,
        }
    }

    /// Overrides requesting the install check.
    pub fn overrides(&self) -> Overrides {
        Overrides {
            install: Some(InstallOverride {
                check: true,
                npm: self.args.mode.as_str().to_string(),
            }),
            ..Default::default()
        }
    }
}

impl Command for InstallCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = build_configuration(self.defaults, &self.overrides(), Extra::default());
        self.toolkit.engine.get_config(&config)?;
        ui.success("Dependencies installed");
        Ok(CommandResult::success())
    }
}
