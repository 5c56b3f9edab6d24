//! Dependency upgrade of `easywebpack` packages in `package.json`.

use regex::Regex;
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use crate::error::{EasypackError, Result};

use super::{DependencyChange, UpgradeOptions, UpgradeReport, Upgrader};

/// Version range written when none is given.
pub const DEFAULT_RANGE: &str = "^4.0.0";

static PACKAGE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^easywebpack(-[a-z0-9][a-z0-9._-]*)?$").expect("valid regex")
});

const SECTIONS: [&str; 2] = ["dependencies", "devDependencies"];

/// Whether a package belongs to the upgraded family.
pub fn is_upgradable(name: &str) -> bool {
    PACKAGE_NAME.is_match(name)
}

/// Rewrite matching dependency ranges in a `package.json` document.
pub fn rewrite_dependencies(package: &mut Value, range: &str) -> Vec<DependencyChange> {
    let mut changes = Vec::new();
    for section in SECTIONS {
        let Some(Value::Object(deps)) = package.get_mut(section) else {
            continue;
        };
        for (name, version) in deps.iter_mut() {
            if !is_upgradable(name) {
                continue;
            }
            let from = version.as_str().unwrap_or_default().to_string();
            if from == range {
                continue;
            }
            *version = Value::String(range.to_string());
            changes.push(DependencyChange {
                name: name.clone(),
                from,
                to: range.to_string(),
            });
        }
    }
    changes
}

/// Default [`Upgrader`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PackageUpgrader;

impl PackageUpgrader {
    pub fn new() -> Self {
        Self
    }
}

impl Upgrader for PackageUpgrader {
    fn upgrade(&self, base_dir: &Path, options: &UpgradeOptions) -> Result<UpgradeReport> {
        let path = base_dir.join("package.json");
        if !path.exists() {
            return Err(EasypackError::ConfigNotFound { path });
        }

        let content = fs::read_to_string(&path)?;
        let mut package: Value =
            serde_json::from_str(&content).map_err(|e| EasypackError::ConfigParseError {
                path: path.clone(),
                message: e.to_string(),
            })?;

        let range = options.to.as_deref().unwrap_or(DEFAULT_RANGE);
        let changes = rewrite_dependencies(&mut package, range);

        let written = !options.dry_run && !changes.is_empty();
        if written {
            let mut output = serde_json::to_string_pretty(&package)?;
            output.push('\n');
            fs::write(&path, output)?;
        }
        tracing::debug!(changes = changes.len(), written, "upgrade finished");

        Ok(UpgradeReport { changes, written })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn project(package: &Value) -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("package.json"),
            serde_json::to_string_pretty(package).unwrap(),
        )
        .unwrap();
        temp
    }

    #[test]
    fn matches_family_only() {
        assert!(is_upgradable("easywebpack"));
        assert!(is_upgradable("easywebpack-vue"));
        assert!(is_upgradable("easywebpack-cli"));
        assert!(!is_upgradable("easywebpackx"));
        assert!(!is_upgradable("webpack"));
    }

    #[test]
    fn rewrites_both_sections_in_order() {
        let temp = project(&json!({
            "name": "shop",
            "dependencies": { "vue": "^2.5.0", "easywebpack-vue": "^3.0.0" },
            "devDependencies": { "easywebpack-cli": "^3.5.0", "eslint": "^4.0.0" }
        }));

        let report = PackageUpgrader::new()
            .upgrade(temp.path(), &UpgradeOptions::default())
            .unwrap();

        assert!(report.written);
        assert_eq!(report.changes.len(), 2);
        assert_eq!(report.changes[0].from, "^3.0.0");

        let content = fs::read_to_string(temp.path().join("package.json")).unwrap();
        let package: Value = serde_json::from_str(&content).unwrap();
        assert_eq!(package["dependencies"]["easywebpack-vue"], "^4.0.0");
        assert_eq!(package["devDependencies"]["easywebpack-cli"], "^4.0.0");
        assert_eq!(package["dependencies"]["vue"], "^2.5.0");

        let keys: Vec<_> = package["dependencies"].as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["vue", "easywebpack-vue"]);
    }

    #[test]
    fn dry_run_leaves_file_untouched() {
        let package = json!({ "dependencies": { "easywebpack-react": "^3.0.0" } });
        let temp = project(&package);
        let before = fs::read_to_string(temp.path().join("package.json")).unwrap();

        let report = PackageUpgrader::new()
            .upgrade(
                temp.path(),
                &UpgradeOptions {
                    to: Some("^4.1.0".to_string()),
                    dry_run: true,
                },
            )
            .unwrap();

        assert!(!report.written);
        assert_eq!(report.changes[0].to, "^4.1.0");
        assert_eq!(
            fs::read_to_string(temp.path().join("package.json")).unwrap(),
            before
        );
    }

    #[test]
    fn up_to_date_project_is_not_rewritten() {
        let temp = project(&json!({ "dependencies": { "easywebpack": "^4.0.0" } }));
        let report = PackageUpgrader::new()
            .upgrade(temp.path(), &UpgradeOptions::default())
            .unwrap();
        assert!(report.changes.is_empty());
        assert!(!report.written);
    }

    #[test]
    fn missing_package_json() {
        let temp = TempDir::new().unwrap();
        let err = PackageUpgrader::new()
            .upgrade(temp.path(), &UpgradeOptions::default())
            .unwrap_err();
        assert!(matches!(err, EasypackError::ConfigNotFound { .. }));
    }
}
