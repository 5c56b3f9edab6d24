//! Dev command implementation (`dev` and `start`).

use crate::config::{build_configuration, Extra, Overrides, ProgramDefaults};
use crate::error::Result;
use crate::tools::Toolkit;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// Starts the long-running development server.
pub struct DevCommand<'a> {
    defaults: &'a ProgramDefaults,
    toolkit: &'a Toolkit,
}

impl<'a> DevCommand<'a> {
    pub fn new(defaults: &'a ProgramDefaults, toolkit: &'a Toolkit) -> Self {
        Self { defaults, toolkit }
    }
}

impl Command for DevCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = build_configuration(self.defaults, &Overrides::default(), Extra::default());
        ui.message("Starting development server...");
        self.toolkit.engine.run_server(&config)?;
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::mock::{Call, MockToolkit};
    use crate::ui::MockUI;

    #[test]
    fn runs_server_with_port_flag() {
        let mock = MockToolkit::new();
        let toolkit = mock.toolkit();
        let defaults = ProgramDefaults::new("/app").with_port(Some(9000));
        let mut ui = MockUI::new();

        DevCommand::new(&defaults, &toolkit).execute(&mut ui).unwrap();

        let calls = mock.calls();
        let [Call::RunServer(config)] = &calls[..] else {
            panic!("unexpected calls: {:?}", calls);
        };
        assert_eq!(config.config["port"], 9000);
    }
}
