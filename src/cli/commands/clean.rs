//! Clean command implementation.
//!
//! - `easypack clean` removes the compile temp dir
//! - `easypack clean all` also removes the manifest and build output
//! - `easypack clean <path>` removes that path

use crate::cli::args::CleanArgs;
use crate::config::ProgramDefaults;
use crate::error::Result;
use crate::tools::Toolkit;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The clean command implementation.
pub struct CleanCommand<'a> {
    defaults: &'a ProgramDefaults,
    toolkit: &'a Toolkit,
    args: CleanArgs,
}

impl<'a> CleanCommand<'a> {
    /// Create a new clean command.
    pub fn new(defaults: &'a ProgramDefaults, toolkit: &'a Toolkit, args: CleanArgs) -> Self {
        Self {
            defaults,
            toolkit,
            args,
        }
    }
}

impl Command for CleanCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let base_dir = self.defaults.base_dir();
        let workspace = &self.toolkit.workspace;

        match self.args.dir.as_deref() {
            Some("all") => {
                workspace.clear_temp_dir(base_dir)?;
                workspace.clear_manifest(base_dir)?;
                workspace.clear_build_dir(base_dir)?;
                ui.success("Removed temp dir, manifest and build output");
            }
            Some(dir) => {
                let path = base_dir.join(dir);
                self.toolkit.system.remove_path(&path)?;
                ui.success(&format!("Removed {}", path.display()));
            }
            None => {
                workspace.clear_temp_dir(base_dir)?;
                ui.success("Removed temp dir");
            }
        }

        Ok(CommandResult::success())
    }
}
