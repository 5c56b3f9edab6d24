//! Project configuration file discovery and loading.
//!
//! The project record is read from the base directory and becomes the
//! lowest layer of every [`Configuration`](super::Configuration).

use crate::config::merger::merge_configs;
use crate::error::{EasypackError, Result};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// Candidate project config file names, in lookup order.
pub const CONFIG_FILE_NAMES: [&str; 3] = [
    "easypack.config.yml",
    "easypack.config.yaml",
    "easypack.config.json",
];

/// Local override file, merged on top of the project config.
pub const LOCAL_CONFIG_FILE_NAME: &str = "easypack.config.local.yml";

/// Paths to configuration files in priority order (later overrides earlier).
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    /// Project config: easypack.config.{yml,yaml,json}
    pub project: Option<PathBuf>,

    /// Local overrides: easypack.config.local.yml
    pub project_local: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover config files for the given base directory.
    pub fn discover(base_dir: &Path) -> Self {
        let project = CONFIG_FILE_NAMES
            .iter()
            .map(|name| base_dir.join(name))
            .find(|path| path.is_file());

        let local = base_dir.join(LOCAL_CONFIG_FILE_NAME);

        Self {
            project,
            project_local: local.is_file().then_some(local),
        }
    }

    /// Returns all existing config paths in merge order.
    pub fn all_existing(&self) -> Vec<&PathBuf> {
        self.project.iter().chain(self.project_local.iter()).collect()
    }
}

/// Load one config file as a record.
///
/// YAML is a superset of JSON, so both formats go through `serde_yaml`.
/// An empty file yields an empty record.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the content is invalid.
/// Returns `ConfigValidationError` if the top level is not a mapping.
pub fn load_config_value(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            EasypackError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            EasypackError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse config file content into a record.
pub fn parse_config(content: &str, source_path: &Path) -> Result<Value> {
    let value: Value =
        serde_yaml::from_str(content).map_err(|e| EasypackError::ConfigParseError {
            path: source_path.to_path_buf(),
            message: e.to_string(),
        })?;

    match value {
        Value::Null => Ok(Value::Object(Map::new())),
        Value::Object(_) => Ok(value),
        _ => Err(EasypackError::ConfigValidationError {
            message: format!(
                "{} must contain a mapping at the top level",
                source_path.display()
            ),
        }),
    }
}

/// Load the project record.
///
/// With an explicit path only that file is read. Otherwise the discovered
/// project and local files are merged; no file at all yields an empty record.
pub fn load_project_config(base_dir: &Path, config_override: Option<&Path>) -> Result<Value> {
    if let Some(path) = config_override {
        let path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            base_dir.join(path)
        };
        tracing::debug!(path = %path.display(), "loading explicit config file");
        return load_config_value(&path);
    }

    let paths = ConfigPaths::discover(base_dir);
    let mut configs = Vec::new();
    for path in paths.all_existing() {
        tracing::debug!(path = %path.display(), "loading config file");
        configs.push(load_config_value(path)?);
    }

    Ok(merge_configs(&configs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn discover_prefers_yml() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("easypack.config.yml"), "port: 1").unwrap();
        fs::write(temp.path().join("easypack.config.json"), "{}").unwrap();

        let paths = ConfigPaths::discover(temp.path());
        assert_eq!(
            paths.project,
            Some(temp.path().join("easypack.config.yml"))
        );
    }

    #[test]
    fn discover_finds_local_overrides() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("easypack.config.yml"), "").unwrap();
        fs::write(temp.path().join(LOCAL_CONFIG_FILE_NAME), "").unwrap();

        let paths = ConfigPaths::discover(temp.path());
        assert!(paths.project_local.is_some());
        assert_eq!(paths.all_existing().len(), 2);
    }

    #[test]
    fn missing_files_yield_empty_record() {
        let temp = TempDir::new().unwrap();
        let value = load_project_config(temp.path(), None).unwrap();
        assert_eq!(value, serde_json::json!({}));
    }

    #[test]
    fn local_overrides_win() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("easypack.config.yml"),
            "framework: vue\nport: 9000\n",
        )
        .unwrap();
        fs::write(temp.path().join(LOCAL_CONFIG_FILE_NAME), "port: 9100\n").unwrap();

        let value = load_project_config(temp.path(), None).unwrap();
        assert_eq!(value["framework"], "vue");
        assert_eq!(value["port"], 9100);
    }

    #[test]
    fn json_config_is_accepted() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("easypack.config.json"),
            r#"{"output": {"path": "dist"}}"#,
        )
        .unwrap();

        let value = load_project_config(temp.path(), None).unwrap();
        assert_eq!(value["output"]["path"], "dist");
    }

    #[test]
    fn explicit_missing_path_is_not_found() {
        let temp = TempDir::new().unwrap();
        let err = load_project_config(temp.path(), Some(Path::new("nope.yml"))).unwrap_err();
        assert!(matches!(err, EasypackError::ConfigNotFound { .. }));
    }

    #[test]
    fn invalid_yaml_is_parse_error() {
        let err = parse_config("port: [unclosed", Path::new("bad.yml")).unwrap_err();
        assert!(matches!(err, EasypackError::ConfigParseError { .. }));
    }

    #[test]
    fn non_mapping_is_rejected() {
        let err = parse_config("- web\n- node\n", Path::new("list.yml")).unwrap_err();
        assert!(matches!(err, EasypackError::ConfigValidationError { .. }));
    }
}
