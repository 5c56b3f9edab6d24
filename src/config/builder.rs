//! Configuration construction.
//!
//! Every command builds a fresh [`Configuration`] from the shared
//! [`ProgramDefaults`] snapshot, a typed [`Overrides`] record and the
//! [`Extra`] bundler hints. The defaults are only read.

use serde::Serialize;
use serde_json::Value;
use std::path::PathBuf;

use super::defaults::ProgramDefaults;
use super::merger::merge_configs;
use super::path::lookup;

/// Dependency install check requested by `install`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallOverride {
    /// Install missing dependencies before resolving the config.
    pub check: bool,
    /// Package manager executable.
    pub npm: String,
}

/// Record key holding the `--devtool` flag.
pub const CLI_DEVTOOL_KEY: &str = "cliDevtool";

/// Command-specific configuration overrides.
///
/// Unset fields are left out of the overlay, so they never mask a value
/// coming from the project record.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Overrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env: Option<String>,
    /// `--devtool`. Stored under [`CLI_DEVTOOL_KEY`] beside the project's
    /// own `devtool`; the engine lets it win over every unit's value.
    #[serde(rename = "cliDevtool", skip_serializing_if = "Option::is_none")]
    pub cli_devtool: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub framework: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub install: Option<InstallOverride>,
}

impl Overrides {
    fn to_value(&self) -> Value {
        // Serializing a struct of strings, numbers and bools cannot fail.
        serde_json::to_value(self).unwrap_or_else(|_| Value::Object(Default::default()))
    }
}

/// Bundler hints that live beside the record rather than inside it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Extra {
    /// Build the dll bundle.
    pub dll: bool,
    /// Trade output quality for build speed.
    pub speed: bool,
}

/// Flags handed to the bundler next to the record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CliSettings {
    pub size: bool,
    pub watch: bool,
    pub hash: bool,
    pub compress: bool,
    pub dll: bool,
    pub speed: bool,
}

/// A merged configuration for one command invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Configuration {
    /// Project base directory.
    pub base_dir: PathBuf,
    /// Bundler flags.
    pub cli: CliSettings,
    /// Merged configuration record.
    pub config: Value,
}

impl Configuration {
    /// Look up a nested value in the record by key path.
    pub fn get(&self, path: &str) -> Option<&Value> {
        lookup(&self.config, path)
    }

    /// String value at `path`, if present and a string.
    pub fn get_str(&self, path: &str) -> Option<&str> {
        self.get(path).and_then(Value::as_str)
    }

    /// The install check requested by `install`, if any.
    pub fn install_check(&self) -> Option<InstallOverride> {
        let check = self.get("install.check").and_then(Value::as_bool)?;
        if !check {
            return None;
        }
        let npm = self.get_str("install.npm").unwrap_or("npm").to_string();
        Some(InstallOverride { check, npm })
    }
}

/// Build a configuration.
///
/// Layers, later winning: project record, global flag overlay, overrides.
pub fn build_configuration(
    defaults: &ProgramDefaults,
    overrides: &Overrides,
    extra: Extra,
) -> Configuration {
    let config = merge_configs(&[
        defaults.project().clone(),
        defaults.program_overlay(),
        overrides.to_value(),
    ]);

    let flags = defaults.flags();
    let cli = CliSettings {
        size: flags.size,
        watch: flags.watch,
        hash: flags.hash,
        compress: flags.compress,
        dll: extra.dll,
        speed: extra.speed,
    };

    tracing::debug!(?cli, "built configuration");

    Configuration {
        base_dir: defaults.base_dir().to_path_buf(),
        cli,
        config,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BundleFlags;
    use serde_json::json;

    fn defaults() -> ProgramDefaults {
        ProgramDefaults::new("/app").with_project(json!({
            "framework": "vue",
            "env": "dev",
            "output": { "path": "public" }
        }))
    }

    #[test]
    fn install_override_round_trips() {
        let overrides = Overrides {
            install: Some(InstallOverride {
                check: true,
                npm: "yarn".into(),
            }),
            ..Default::default()
        };
        let config = build_configuration(&defaults(), &overrides, Extra::default());

        assert_eq!(config.config["install"], json!({ "check": true, "npm": "yarn" }));
        assert_eq!(
            config.install_check(),
            Some(InstallOverride {
                check: true,
                npm: "yarn".into()
            })
        );
    }

    #[test]
    fn overrides_win_over_project_and_flags() {
        let defaults = defaults().with_framework(Some("react".into()));
        let overrides = Overrides {
            framework: Some("dll".into()),
            ..Default::default()
        };
        let config = build_configuration(&defaults, &overrides, Extra::default());
        assert_eq!(config.config["framework"], "dll");
    }

    #[test]
    fn flags_win_over_project() {
        let defaults = defaults().with_framework(Some("react".into()));
        let config = build_configuration(&defaults, &Overrides::default(), Extra::default());
        assert_eq!(config.config["framework"], "react");
    }

    #[test]
    fn unset_overrides_keep_project_values() {
        let config = build_configuration(&defaults(), &Overrides::default(), Extra::default());
        assert_eq!(config.config["env"], "dev");
        assert_eq!(config.get_str("output.path"), Some("public"));
    }

    #[test]
    fn construction_does_not_mutate_defaults() {
        let defaults = defaults();
        let before = defaults.project().clone();

        let prod = build_configuration(
            &defaults,
            &Overrides {
                env: Some("prod".into()),
                ..Default::default()
            },
            Extra::default(),
        );
        let plain = build_configuration(&defaults, &Overrides::default(), Extra::default());

        assert_eq!(defaults.project(), &before);
        assert_eq!(prod.config["env"], "prod");
        assert_eq!(plain.config["env"], "dev");
    }

    #[test]
    fn cli_settings_combine_flags_and_extra() {
        let defaults = defaults().with_flags(BundleFlags {
            watch: true,
            ..Default::default()
        });
        let config = build_configuration(
            &defaults,
            &Overrides::default(),
            Extra {
                dll: true,
                speed: false,
            },
        );
        assert!(config.cli.watch);
        assert!(config.cli.dll);
        assert!(!config.cli.speed);
        assert_eq!(config.base_dir, PathBuf::from("/app"));
    }

    #[test]
    fn install_check_absent_without_override() {
        let config = build_configuration(&defaults(), &Overrides::default(), Extra::default());
        assert_eq!(config.install_check(), None);
    }
}
