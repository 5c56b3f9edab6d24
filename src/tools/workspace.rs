//! Project workspace paths: compile temp dir, manifest, build output.

use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

use super::Workspace;

/// Build output directories, relative to the base dir.
pub const BUILD_DIRS: [&str; 2] = ["public", "app/view"];

/// Manifest file, relative to the base dir.
pub const MANIFEST_FILE: &str = "config/manifest.json";

/// Project name: `package.json` `name`, else the directory name.
pub fn project_name(base_dir: &Path) -> String {
    let from_package = fs::read_to_string(base_dir.join("package.json"))
        .ok()
        .and_then(|content| serde_json::from_str::<Value>(&content).ok())
        .and_then(|pkg| pkg.get("name").and_then(Value::as_str).map(String::from));

    let name = from_package.unwrap_or_else(|| {
        base_dir
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "project".to_string())
    });

    // Scoped package names contain a slash.
    name.replace(['/', '\\', '@'], "_")
}

/// `<system temp>/easypack/<project name>-<hash>` for a base dir.
pub fn compile_temp_dir(base_dir: &Path) -> PathBuf {
    let hash = hex::encode(Sha256::digest(base_dir.to_string_lossy().as_bytes()));
    std::env::temp_dir()
        .join("easypack")
        .join(format!("{}-{}", project_name(base_dir), &hash[..8]))
}

fn remove(path: &Path) -> Result<()> {
    if path.is_dir() {
        fs::remove_dir_all(path)?;
        tracing::debug!(path = %path.display(), "removed directory");
    } else if path.exists() {
        fs::remove_file(path)?;
        tracing::debug!(path = %path.display(), "removed file");
    }
    Ok(())
}

/// Default [`Workspace`] over the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectWorkspace;

impl ProjectWorkspace {
    pub fn new() -> Self {
        Self
    }
}

impl Workspace for ProjectWorkspace {
    fn compile_temp_dir(&self, base_dir: &Path) -> PathBuf {
        compile_temp_dir(base_dir)
    }

    fn clear_temp_dir(&self, base_dir: &Path) -> Result<()> {
        remove(&compile_temp_dir(base_dir))
    }

    fn clear_manifest(&self, base_dir: &Path) -> Result<()> {
        remove(&base_dir.join(MANIFEST_FILE))
    }

    fn clear_build_dir(&self, base_dir: &Path) -> Result<()> {
        for dir in BUILD_DIRS {
            remove(&base_dir.join(dir))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn project_name_prefers_package_json() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("package.json"), r#"{"name": "@shop/web"}"#).unwrap();
        assert_eq!(project_name(temp.path()), "_shop_web");
    }

    #[test]
    fn project_name_falls_back_to_dir() {
        assert_eq!(project_name(Path::new("/work/storefront")), "storefront");
    }

    #[test]
    fn temp_dir_is_stable_and_distinct() {
        let a = compile_temp_dir(Path::new("/work/a/site"));
        let b = compile_temp_dir(Path::new("/work/b/site"));

        assert_eq!(a, compile_temp_dir(Path::new("/work/a/site")));
        assert_ne!(a, b);
        assert!(a.starts_with(std::env::temp_dir().join("easypack")));
        let name = a.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("site-"));
        assert_eq!(name.len(), "site-".len() + 8);
    }

    #[test]
    fn clear_build_dir_removes_outputs() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("public/js")).unwrap();
        fs::create_dir_all(temp.path().join("app/view")).unwrap();
        fs::write(temp.path().join("app/view/index.html"), "").unwrap();
        fs::create_dir_all(temp.path().join("app/controller")).unwrap();

        ProjectWorkspace::new().clear_build_dir(temp.path()).unwrap();

        assert!(!temp.path().join("public").exists());
        assert!(!temp.path().join("app/view").exists());
        assert!(temp.path().join("app/controller").exists());
    }

    #[test]
    fn clear_manifest_removes_only_the_file() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("config")).unwrap();
        fs::write(temp.path().join("config/manifest.json"), "{}").unwrap();
        fs::write(temp.path().join("config/config.default.js"), "").unwrap();

        ProjectWorkspace::new().clear_manifest(temp.path()).unwrap();

        assert!(!temp.path().join("config/manifest.json").exists());
        assert!(temp.path().join("config/config.default.js").exists());
    }

    #[test]
    fn clearing_missing_paths_is_ok() {
        let temp = TempDir::new().unwrap();
        let workspace = ProjectWorkspace::new();
        workspace.clear_manifest(temp.path()).unwrap();
        workspace.clear_build_dir(temp.path()).unwrap();
        workspace.clear_temp_dir(temp.path()).unwrap();
    }

    #[test]
    fn clear_temp_dir_removes_compiled_config() {
        let temp = TempDir::new().unwrap();
        let dir = compile_temp_dir(temp.path());
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("webpack.config.json"), "[]").unwrap();

        ProjectWorkspace::new().clear_temp_dir(temp.path()).unwrap();

        assert!(!dir.exists());
    }
}
