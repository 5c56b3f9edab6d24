//! Init command implementation.
//!
//! The `easypack init` command creates a project from a boilerplate. Without
//! an id it asks the user to pick one from the registry.

use crate::cli::args::InitArgs;
use crate::config::ProgramDefaults;
use crate::error::Result;
use crate::tools::{InitRequest, Toolkit};
use crate::ui::{SelectOption, SelectPrompt, UserInterface};

use super::dispatcher::{Command, CommandResult};

/// The init command implementation.
pub struct InitCommand<'a> {
    defaults: &'a ProgramDefaults,
    toolkit: &'a Toolkit,
    args: InitArgs,
}

impl<'a> InitCommand<'a> {
    /// Create a new init command.
    pub fn new(defaults: &'a ProgramDefaults, toolkit: &'a Toolkit, args: InitArgs) -> Self {
        Self {
            defaults,
            toolkit,
            args,
        }
    }

    fn choose_boilerplate(&self, ui: &mut dyn UserInterface) -> Result<String> {
        if let Some(id) = &self.args.boilerplate {
            return Ok(id.clone());
        }

        let options = self
            .toolkit
            .scaffolder
            .boilerplates()
            .iter()
            .map(|b| SelectOption {
                label: format!("{} - {}", b.id, b.description),
                value: b.id.to_string(),
            })
            .collect();

        let prompt = SelectPrompt {
            key: "boilerplate".to_string(),
            question: "Which boilerplate do you want to use?".to_string(),
            options,
            default: None,
        };
        ui.select(&prompt)
    }
}

impl Command for InitCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let boilerplate = self.choose_boilerplate(ui)?;

        let request = InitRequest {
            boilerplate,
            name: self.args.name.clone(),
            force: self.args.force,
        };

        let mut spinner = ui.start_spinner(&format!("Creating project from {}", request.boilerplate));
        match self.toolkit.scaffolder.init(self.defaults.base_dir(), &request) {
            Ok(path) => {
                spinner.finish_success(&format!("Created {}", path.display()));
                ui.success(&format!("Project ready at {}", path.display()));
                Ok(CommandResult::success())
            }
            Err(e) => {
                spinner.finish_error("Project creation failed");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::mock::{Call, MockToolkit};
    use crate::ui::MockUI;

    #[test]
    fn given_boilerplate_skips_prompt() {
        let mock = MockToolkit::new();
        let toolkit = mock.toolkit();
        let defaults = ProgramDefaults::new("/work");
        let mut ui = MockUI::new();
        let args = InitArgs {
            boilerplate: Some("egg-react".into()),
            name: Some("shop".into()),
            force: true,
        };

        InitCommand::new(&defaults, &toolkit, args).execute(&mut ui).unwrap();

        assert!(ui.prompts_shown().is_empty());
        assert_eq!(
            mock.calls(),
            vec![Call::Init(InitRequest {
                boilerplate: "egg-react".into(),
                name: Some("shop".into()),
                force: true,
            })]
        );
        assert!(ui.has_success("/work/shop"));
    }

    #[test]
    fn missing_boilerplate_is_prompted() {
        let mock = MockToolkit::new();
        let toolkit = mock.toolkit();
        let defaults = ProgramDefaults::new("/work");
        let mut ui = MockUI::new();
        ui.set_prompt_response("boilerplate", "vue");

        InitCommand::new(&defaults, &toolkit, InitArgs::default())
            .execute(&mut ui)
            .unwrap();

        assert_eq!(ui.prompts_shown(), &["boilerplate".to_string()]);
        let Call::Init(request) = &mock.calls()[0] else {
            panic!("expected init call");
        };
        assert_eq!(request.boilerplate, "vue");
    }

    #[test]
    fn scaffolder_error_propagates() {
        let mock = MockToolkit::new().fail_on("init");
        let toolkit = mock.toolkit();
        let defaults = ProgramDefaults::new("/work");
        let mut ui = MockUI::new();
        let args = InitArgs {
            boilerplate: Some("vue".into()),
            ..Default::default()
        };

        assert!(InitCommand::new(&defaults, &toolkit, args).execute(&mut ui).is_err());
    }

    #[test]
    fn unanswered_prompt_does_not_scaffold() {
        let mock = MockToolkit::new();
        let toolkit = mock.toolkit();
        let defaults = ProgramDefaults::new("/work");
        let mut ui = MockUI::new();

        let result = InitCommand::new(&defaults, &toolkit, InitArgs::default()).execute(&mut ui);

        assert!(result.is_err());
        assert!(mock.calls().is_empty());
    }
}
