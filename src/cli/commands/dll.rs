//! Dll command implementation.

use crate::cli::args::EnvArgs;
use crate::config::{build_configuration, Extra, Overrides, ProgramDefaults};
use crate::error::Result;
use crate::tools::Toolkit;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// Builds the dll bundle: the `dll` framework with the dll hint set.
pub struct DllCommand<'a> {
    defaults: &'a ProgramDefaults,
    toolkit: &'a Toolkit,
    args: EnvArgs,
}

impl<'a> DllCommand<'a> {
    pub fn new(defaults: &'a ProgramDefaults, toolkit: &'a Toolkit, args: EnvArgs) -> Self {
        Self {
            defaults,
            toolkit,
            args,
        }
    }
}

impl Command for DllCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let overrides = Overrides {
            env: self.args.env.clone(),
            framework: Some("dll".to_string()),
            ..Default::default()
        };
        let extra = Extra {
            dll: true,
            ..Default::default()
        };
        let config = build_configuration(self.defaults, &overrides, extra);

        self.toolkit.engine.run_build(&config)?;
        ui.success("Dll build complete");
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::mock::{Call, MockToolkit};
    use crate::ui::MockUI;

    #[test]
    fn dll_framework_overrides_flag() {
        let mock = MockToolkit::new();
        let toolkit = mock.toolkit();
        let defaults = ProgramDefaults::new("/app").with_framework(Some("vue".into()));
        let mut ui = MockUI::new();

        DllCommand::new(
            &defaults,
            &toolkit,
            EnvArgs {
                env: Some("prod".into()),
            },
        )
        .execute(&mut ui)
        .unwrap();

        let calls = mock.calls();
        let [Call::RunBuild(config)] = &calls[..] else {
            panic!("unexpected calls: {:?}", calls);
        };
        assert_eq!(config.config["framework"], "dll");
        assert_eq!(config.config["env"], "prod");
        assert!(config.cli.dll);
    }
}
