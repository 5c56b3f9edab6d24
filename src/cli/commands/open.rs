//! Open command implementation.

use crate::cli::args::OpenArgs;
use crate::config::ProgramDefaults;
use crate::error::Result;
use crate::tools::Toolkit;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// Opens a directory, the compile temp dir by default, then ends the process.
pub struct OpenCommand<'a> {
    defaults: &'a ProgramDefaults,
    toolkit: &'a Toolkit,
    args: OpenArgs,
}

impl<'a> OpenCommand<'a> {
    pub fn new(defaults: &'a ProgramDefaults, toolkit: &'a Toolkit, args: OpenArgs) -> Self {
        Self {
            defaults,
            toolkit,
            args,
        }
    }
}

impl Command for OpenCommand<'_> {
    fn execute(&self, _ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let base_dir = self.defaults.base_dir();
        let path = match &self.args.dir {
            Some(dir) => base_dir.join(dir),
            None => self.toolkit.workspace.compile_temp_dir(base_dir),
        };

        tracing::debug!(path = %path.display(), "opening");
        self.toolkit.system.open_path(&path)?;
        Ok(CommandResult::terminate())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::dispatcher::Outcome;
    use crate::tools::mock::{mock_temp_dir, Call, MockToolkit};
    use crate::ui::MockUI;
    use std::path::{Path, PathBuf};

    #[test]
    fn opens_compile_temp_dir_and_terminates() {
        let mock = MockToolkit::new();
        let toolkit = mock.toolkit();
        let defaults = ProgramDefaults::new("/app");
        let mut ui = MockUI::new();

        let result = OpenCommand::new(&defaults, &toolkit, OpenArgs::default())
            .execute(&mut ui)
            .unwrap();

        assert_eq!(result.outcome, Outcome::Terminate);
        assert_eq!(
            mock.calls(),
            vec![Call::OpenPath(mock_temp_dir(Path::new("/app")))]
        );
    }

    #[test]
    fn opens_given_dir() {
        let mock = MockToolkit::new();
        let toolkit = mock.toolkit();
        let defaults = ProgramDefaults::new("/app");
        let mut ui = MockUI::new();
        let args = OpenArgs {
            dir: Some(PathBuf::from("public")),
        };

        let result = OpenCommand::new(&defaults, &toolkit, args)
            .execute(&mut ui)
            .unwrap();

        assert_eq!(result.outcome, Outcome::Terminate);
        assert_eq!(mock.calls(), vec![Call::OpenPath(PathBuf::from("/app/public"))]);
    }
}
