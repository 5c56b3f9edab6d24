//! Engine that drives an external bundler process.
//!
//! Compiler units are derived from the configuration record, written to
//! `<compile temp dir>/webpack.config.json`, and handed to the bundler
//! command (`npx webpack` unless the record sets `bundler.build` /
//! `bundler.dev`). Custom commands find the file through `EASYPACK_CONFIG`.

use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{deep_merge, Configuration, CLI_DEVTOOL_KEY};
use crate::error::Result;
use crate::shell::{execute, CommandOptions};
use crate::tools::workspace::compile_temp_dir;

use super::{BuildEngine, BuildReport, ResolvedConfig, WEB_TARGET};

/// File name of the generated bundler config.
pub const GENERATED_CONFIG_FILE: &str = "webpack.config.json";

/// Default engine: runs the bundler as a child process.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEngine;

impl ProcessEngine {
    pub fn new() -> Self {
        Self
    }
}

/// Targets listed under `type` (string or list); `web` when absent.
pub fn targets(config: &Configuration) -> Vec<String> {
    match config.config.get("type") {
        Some(Value::String(kind)) => vec![kind.clone()],
        Some(Value::Array(kinds)) => {
            let kinds: Vec<String> = kinds
                .iter()
                .filter_map(Value::as_str)
                .map(String::from)
                .collect();
            if kinds.is_empty() {
                vec![WEB_TARGET.to_string()]
            } else {
                kinds
            }
        }
        _ => vec![WEB_TARGET.to_string()],
    }
}

fn default_output(target: &str) -> &'static str {
    match target {
        "web" => "public",
        "node" => "app/view",
        _ => "dist",
    }
}

/// `--devtool` if given, else the record's `devtool`.
fn effective_devtool(config: &Configuration) -> Option<&str> {
    config
        .get_str(CLI_DEVTOOL_KEY)
        .or_else(|| config.get_str("devtool"))
}

/// One record per target.
///
/// Each unit is the shared record with every target section removed, the
/// unit's own section merged on top, `target` set and `output.path` made
/// absolute. A `--devtool` flag replaces the unit's `devtool`.
pub fn compiler_units(config: &Configuration) -> Vec<Value> {
    let targets = targets(config);

    let mut shared = config.config.clone();
    let mut cli_devtool = None;
    if let Value::Object(map) = &mut shared {
        for key in targets.iter().map(String::as_str).chain(["web", "node"]) {
            map.remove(key);
        }
        cli_devtool = map.remove(CLI_DEVTOOL_KEY);
    }

    targets
        .iter()
        .map(|target| {
            let section = config
                .config
                .get(target)
                .filter(|v| v.is_object())
                .cloned()
                .unwrap_or_else(|| Value::Object(Map::new()));
            let mut unit = deep_merge(&shared, &section);

            let output = unit
                .get("output")
                .and_then(|o| o.get("path"))
                .and_then(Value::as_str)
                .unwrap_or_else(|| default_output(target))
                .to_string();
            let output = config.base_dir.join(output);

            if let Value::Object(map) = &mut unit {
                map.insert("target".to_string(), Value::String(target.clone()));
                if let Some(devtool) = &cli_devtool {
                    map.insert("devtool".to_string(), devtool.clone());
                }
                let entry = map
                    .entry("output".to_string())
                    .or_insert_with(|| Value::Object(Map::new()));
                if !entry.is_object() {
                    *entry = Value::Object(Map::new());
                }
                if let Value::Object(out) = entry {
                    out.insert(
                        "path".to_string(),
                        Value::String(output.to_string_lossy().to_string()),
                    );
                }
            }
            unit
        })
        .collect()
}

fn write_units(config: &Configuration, units: &[Value]) -> Result<PathBuf> {
    let dir = compile_temp_dir(&config.base_dir);
    fs::create_dir_all(&dir)?;
    let file = dir.join(GENERATED_CONFIG_FILE);
    fs::write(&file, serde_json::to_string_pretty(units)?)?;
    tracing::debug!(path = %file.display(), units = units.len(), "wrote bundler config");
    Ok(file)
}

fn bundler_options(config: &Configuration, config_file: &Path) -> CommandOptions {
    let flag = |b: bool| if b { "true" } else { "false" }.to_string();

    let mut env = HashMap::new();
    env.insert(
        "EASYPACK_CONFIG".to_string(),
        config_file.to_string_lossy().to_string(),
    );
    env.insert(
        "EASYPACK_BASE_DIR".to_string(),
        config.base_dir.to_string_lossy().to_string(),
    );
    if let Some(value) = config.get_str("env") {
        env.insert("EASYPACK_ENV".to_string(), value.to_string());
    }
    if let Some(value) = effective_devtool(config) {
        env.insert("EASYPACK_DEVTOOL".to_string(), value.to_string());
    }
    env.insert("EASYPACK_SPEED".to_string(), flag(config.cli.speed));
    env.insert("EASYPACK_DLL".to_string(), flag(config.cli.dll));
    env.insert("EASYPACK_WATCH".to_string(), flag(config.cli.watch));

    CommandOptions {
        cwd: Some(config.base_dir.clone()),
        env,
        ..Default::default()
    }
}

impl BuildEngine for ProcessEngine {
    fn get_config(&self, config: &Configuration) -> Result<ResolvedConfig> {
        if let Some(install) = config.install_check() {
            let command = format!("{} install", install.npm);
            tracing::info!(%command, "installing dependencies");
            execute(&command, &CommandOptions::inherit_in(&config.base_dir))?
                .into_checked(&command)?;
        }

        Ok(ResolvedConfig::from_units(compiler_units(config)))
    }

    fn run_server(&self, config: &Configuration) -> Result<()> {
        let units = compiler_units(config);
        let file = write_units(config, &units)?;

        let command = match config.get_str("bundler.dev") {
            Some(custom) => custom.to_string(),
            None => {
                let mut command = format!("npx webpack serve --config \"{}\"", file.display());
                if let Some(port) = config.get("port").and_then(Value::as_u64) {
                    command.push_str(&format!(" --port {}", port));
                }
                command
            }
        };

        tracing::info!(%command, "starting dev server");
        execute(&command, &bundler_options(config, &file))?.into_checked(&command)?;
        Ok(())
    }

    fn run_build(&self, config: &Configuration) -> Result<BuildReport> {
        let units = compiler_units(config);
        let file = write_units(config, &units)?;
        let options = bundler_options(config, &file);

        let command = match config.get_str("bundler.build") {
            Some(custom) => custom.to_string(),
            None => {
                let mut command = format!("npx webpack --config \"{}\"", file.display());
                if config.cli.watch {
                    command.push_str(" --watch");
                }
                command
            }
        };

        tracing::info!(%command, "building");
        execute(&command, &options)?.into_checked(&command)?;

        if let Some(hook) = config.get_str("done") {
            tracing::debug!(%hook, "running completion hook");
            execute(hook, &options)?.into_checked(hook)?;
        }

        Ok(BuildReport::from_values(&units))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{build_configuration, Extra, Overrides, ProgramDefaults};
    use crate::error::EasypackError;
    use serde_json::json;

    fn configuration(base: &Path, project: Value) -> Configuration {
        let defaults = ProgramDefaults::new(base).with_project(project);
        build_configuration(&defaults, &Overrides::default(), Extra::default())
    }

    #[test]
    fn targets_default_to_web() {
        let config = configuration(Path::new("/app"), json!({}));
        assert_eq!(targets(&config), vec!["web"]);
    }

    #[test]
    fn targets_accept_string_and_list() {
        let config = configuration(Path::new("/app"), json!({"type": "node"}));
        assert_eq!(targets(&config), vec!["node"]);

        let config = configuration(Path::new("/app"), json!({"type": ["web", "node"]}));
        assert_eq!(targets(&config), vec!["web", "node"]);
    }

    #[test]
    fn units_get_default_output_paths() {
        let config = configuration(Path::new("/app"), json!({"type": ["web", "node"]}));
        let units = compiler_units(&config);

        assert_eq!(units.len(), 2);
        assert_eq!(units[0]["target"], "web");
        assert_eq!(
            PathBuf::from(units[0]["output"]["path"].as_str().unwrap()),
            Path::new("/app").join("public")
        );
        assert_eq!(
            PathBuf::from(units[1]["output"]["path"].as_str().unwrap()),
            Path::new("/app").join("app/view")
        );
    }

    #[test]
    fn target_sections_merge_into_their_unit_only() {
        let config = configuration(
            Path::new("/app"),
            json!({
                "type": ["web", "node"],
                "framework": "vue",
                "web": { "output": { "path": "static" }, "devtool": "source-map" },
                "node": { "externals": ["vue"] }
            }),
        );
        let units = compiler_units(&config);

        assert_eq!(units[0]["framework"], "vue");
        assert_eq!(units[0]["devtool"], "source-map");
        assert!(units[0].get("web").is_none());
        assert!(units[0].get("externals").is_none());
        assert_eq!(
            PathBuf::from(units[0]["output"]["path"].as_str().unwrap()),
            Path::new("/app").join("static")
        );
        assert_eq!(units[1]["externals"], json!(["vue"]));
        assert!(units[1].get("devtool").is_none());
    }

    #[test]
    fn devtool_flag_wins_over_record_and_sections() {
        let defaults = ProgramDefaults::new("/app").with_project(json!({
            "type": ["web", "node"],
            "devtool": "eval",
            "web": { "devtool": "source-map" }
        }));
        let overrides = Overrides {
            cli_devtool: Some("hidden-source-map".into()),
            ..Default::default()
        };
        let config = build_configuration(&defaults, &overrides, Extra::default());

        assert_eq!(config.config["devtool"], "eval");
        let units = compiler_units(&config);
        assert!(units.iter().all(|u| u["devtool"] == "hidden-source-map"));
        assert!(units.iter().all(|u| u.get(CLI_DEVTOOL_KEY).is_none()));

        let options = bundler_options(&config, Path::new("/tmp/webpack.config.json"));
        assert_eq!(options.env["EASYPACK_DEVTOOL"], "hidden-source-map");
    }

    #[test]
    fn record_devtool_is_kept_without_flag() {
        let config = configuration(Path::new("/app"), json!({ "devtool": "eval" }));
        assert_eq!(compiler_units(&config)[0]["devtool"], "eval");
        let options = bundler_options(&config, Path::new("/tmp/webpack.config.json"));
        assert_eq!(options.env["EASYPACK_DEVTOOL"], "eval");
    }

    #[test]
    fn get_config_without_install_resolves_units() {
        let engine = ProcessEngine::new();
        let config = configuration(Path::new("/app"), json!({}));
        let resolved = engine.get_config(&config).unwrap();
        assert!(matches!(resolved, ResolvedConfig::Single(_)));
    }

    #[cfg(unix)]
    #[test]
    fn run_build_runs_bundler_then_hook() {
        let temp = tempfile::TempDir::new().unwrap();
        let config = configuration(
            temp.path(),
            json!({
                "bundler": { "build": "test -f \"$EASYPACK_CONFIG\" && touch built.marker" },
                "done": "test -f built.marker && touch done.marker"
            }),
        );

        let report = ProcessEngine::new().run_build(&config).unwrap();

        assert!(temp.path().join("built.marker").exists());
        assert!(temp.path().join("done.marker").exists());
        assert!(report.web_unit().is_some());
    }

    #[cfg(unix)]
    #[test]
    fn failed_build_skips_hook() {
        let temp = tempfile::TempDir::new().unwrap();
        let config = configuration(
            temp.path(),
            json!({
                "bundler": { "build": "exit 2" },
                "done": "touch done.marker"
            }),
        );

        let err = ProcessEngine::new().run_build(&config).unwrap_err();

        assert!(matches!(err, EasypackError::CommandFailed { code: Some(2), .. }));
        assert!(!temp.path().join("done.marker").exists());
    }
}
