//! Build command implementation.
//!
//! The `easypack build` command runs the bundler and, with `--server`,
//! serves the web output once the build (including its completion hook)
//! has finished.

use crate::cli::args::BuildArgs;
use crate::config::{build_configuration, Extra, Overrides, ProgramDefaults};
use crate::error::Result;
use crate::server::ServeOptions;
use crate::tools::Toolkit;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The build command implementation.
pub struct BuildCommand<'a> {
    defaults: &'a ProgramDefaults,
    toolkit: &'a Toolkit,
    args: BuildArgs,
}

impl<'a> BuildCommand<'a> {
    /// Create a new build command.
    pub fn new(defaults: &'a ProgramDefaults, toolkit: &'a Toolkit, args: BuildArgs) -> Self {
        Self {
            defaults,
            toolkit,
            args,
        }
    }
}

impl Command for BuildCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let overrides = Overrides {
            env: self.args.env.clone(),
            cli_devtool: self.args.devtool.clone(),
            ..Default::default()
        };
        let extra = Extra {
            speed: self.args.speed,
            ..Default::default()
        };
        let config = build_configuration(self.defaults, &overrides, extra);

        let report = self.toolkit.engine.run_build(&config)?;
        ui.success("Build complete");

        let Some(toggle) = self.args.server else {
            return Ok(CommandResult::success());
        };

        let Some(dist) = report.web_unit().and_then(|unit| unit.output_path.clone()) else {
            tracing::debug!("no web compiler unit with an output path, server not started");
            return Ok(CommandResult::success());
        };

        let options = ServeOptions::new(dist, toggle.port());
        ui.message(&format!(
            "Serving {} on http://127.0.0.1:{}",
            options.dist.display(),
            options.port_or_default()
        ));
        self.toolkit.server.start(&options)?;

        Ok(CommandResult::success())
    }
}
