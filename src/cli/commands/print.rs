//! Print command implementation.
//!
//! The `easypack print` command shows the resolved bundler config, or one
//! key path of it for every compiler unit.

use serde_json::Value;

use crate::cli::args::PrintArgs;
use crate::config::{build_configuration, lookup, Extra, Overrides, ProgramDefaults};
use crate::error::Result;
use crate::tools::Toolkit;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The print command implementation.
pub struct PrintCommand<'a> {
    defaults: &'a ProgramDefaults,
    toolkit: &'a Toolkit,
    args: PrintArgs,
}

impl<'a> PrintCommand<'a> {
    /// Create a new print command.
    pub fn new(defaults: &'a ProgramDefaults, toolkit: &'a Toolkit, args: PrintArgs) -> Self {
        Self {
            defaults,
            toolkit,
            args,
        }
    }

    fn label(&self, item: &Value, key: &str) -> String {
        let kind = self
            .defaults
            .kind()
            .or_else(|| item.get("target").and_then(Value::as_str))
            .unwrap_or_default();
        format!("webpack {} {} info:", kind, key)
    }
}

fn render(value: Option<&Value>) -> String {
    match value {
        Some(value) => serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string()),
        None => "undefined".to_string(),
    }
}

impl Command for PrintCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let overrides = Overrides {
            env: self.args.env.clone(),
            ..Default::default()
        };
        let config = build_configuration(self.defaults, &overrides, Extra::default());
        let resolved = self.toolkit.engine.get_config(&config)?;

        let items = resolved.items();
        if items.is_empty() {
            ui.warning("webpack config is empty");
            return Ok(CommandResult::success());
        }

        match &self.args.key {
            Some(key) => {
                for item in items {
                    ui.show_value(&self.label(item, key), &render(lookup(item, key)));
                }
            }
            None => {
                let all = resolved.to_value();
                ui.show_value("webpack config info:", &render(Some(&all)));
            }
        }

        Ok(CommandResult::success())
    }
}
