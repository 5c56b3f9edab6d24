//! Upgrade command implementation.

use crate::cli::args::UpgradeArgs;
use crate::config::ProgramDefaults;
use crate::error::Result;
use crate::tools::{Toolkit, UpgradeOptions};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// Upgrades easywebpack dependencies in `package.json`.
pub struct UpgradeCommand<'a> {
    defaults: &'a ProgramDefaults,
    toolkit: &'a Toolkit,
    args: UpgradeArgs,
}

impl<'a> UpgradeCommand<'a> {
    pub fn new(defaults: &'a ProgramDefaults, toolkit: &'a Toolkit, args: UpgradeArgs) -> Self {
        Self {
            defaults,
            toolkit,
            args,
        }
    }
}

impl Command for UpgradeCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let options = UpgradeOptions {
            to: self.args.to.clone(),
            dry_run: self.args.dry_run,
        };
        let report = self
            .toolkit
            .upgrader
            .upgrade(self.defaults.base_dir(), &options)?;

        if report.changes.is_empty() {
            ui.message("Dependencies are up to date");
            return Ok(CommandResult::success());
        }

        for change in &report.changes {
            ui.message(&format!("  {}: {} -> {}", change.name, change.from, change.to));
        }
        if report.written {
            ui.success("package.json updated, run `easypack install` to apply");
        } else {
            ui.warning("Dry run: package.json not modified");
        }
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::mock::{Call, MockToolkit};
    use crate::ui::MockUI;

    #[test]
    fn forwards_options() {
        let mock = MockToolkit::new();
        let toolkit = mock.toolkit();
        let defaults = ProgramDefaults::new("/app");
        let mut ui = MockUI::new();
        let args = UpgradeArgs {
            to: Some("^4.2.0".into()),
            dry_run: true,
        };

        UpgradeCommand::new(&defaults, &toolkit, args)
            .execute(&mut ui)
            .unwrap();

        assert_eq!(
            mock.calls(),
            vec![Call::Upgrade(UpgradeOptions {
                to: Some("^4.2.0".into()),
                dry_run: true,
            })]
        );
        assert!(ui.has_message("up to date"));
    }
}
