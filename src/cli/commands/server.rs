//! Server command implementation.

use std::path::PathBuf;

use crate::cli::args::ServerArgs;
use crate::config::ProgramDefaults;
use crate::error::Result;
use crate::server::ServeOptions;
use crate::tools::Toolkit;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// Directory served when `--dist` is omitted.
pub const DEFAULT_DIST: &str = "public";

/// Serves a directory with the static server.
pub struct ServerCommand<'a> {
    defaults: &'a ProgramDefaults,
    toolkit: &'a Toolkit,
    args: ServerArgs,
}

impl<'a> ServerCommand<'a> {
    pub fn new(defaults: &'a ProgramDefaults, toolkit: &'a Toolkit, args: ServerArgs) -> Self {
        Self {
            defaults,
            toolkit,
            args,
        }
    }

    /// Serve options from `--dist` (relative to the base dir) and `--port`.
    pub fn options(&self) -> ServeOptions {
        let dist = self
            .args
            .dist
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DIST));
        ServeOptions::new(self.defaults.base_dir().join(dist), self.defaults.port())
    }
}

impl Command for ServerCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let options = self.options();
        ui.message(&format!(
            "Serving {} on http://127.0.0.1:{}",
            options.dist.display(),
            options.port_or_default()
        ));
        self.toolkit.server.start(&options)?;
        Ok(CommandResult::success())
    }
}
