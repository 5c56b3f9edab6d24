//! Zip and tar command implementation.

use crate::cli::args::ArchiveArgs;
use crate::config::{archive_options, ArchiveOverrides, ProgramDefaults};
use crate::error::Result;
use crate::tools::Toolkit;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// Archive format written by [`ArchiveCommand`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    Zip,
    Tar,
}

/// Packages the project with the archiver.
pub struct ArchiveCommand<'a> {
    defaults: &'a ProgramDefaults,
    toolkit: &'a Toolkit,
    format: ArchiveFormat,
    args: ArchiveArgs,
}

impl<'a> ArchiveCommand<'a> {
    pub fn new(
        defaults: &'a ProgramDefaults,
        toolkit: &'a Toolkit,
        format: ArchiveFormat,
        args: ArchiveArgs,
    ) -> Self {
        Self {
            defaults,
            toolkit,
            format,
            args,
        }
    }
}

impl Command for ArchiveCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let overrides = ArchiveOverrides {
            source: self.args.source.clone(),
            target: self.args.target.clone(),
            filename: self.args.filename.clone(),
            ignore: self.args.ignore.clone(),
        };
        let options = archive_options(self.defaults, &overrides);

        let mut spinner = ui.start_spinner(&format!("Archiving {}", options.source.display()));
        let written = match self.format {
            ArchiveFormat::Zip => self.toolkit.archiver.zip(&options),
            ArchiveFormat::Tar => self.toolkit.archiver.tar(&options),
        };

        match written {
            Ok(path) => {
                spinner.finish_success(&format!("Wrote {}", path.display()));
                ui.success(&format!("Archive written to {}", path.display()));
                Ok(CommandResult::success())
            }
            Err(e) => {
                spinner.finish_error("Archiving failed");
                Err(e)
            }
        }
    }
}
