//! Archive option construction for `zip` and `tar`.

use serde_json::Value;
use std::path::{Path, PathBuf};

use super::defaults::ProgramDefaults;

/// Entries left out of archives unless configured otherwise.
pub const DEFAULT_IGNORE: [&str; 2] = [".git", "node_modules"];

/// Resolved options for one archive run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveOptions {
    /// Directory whose contents are archived.
    pub source: PathBuf,
    /// Directory the archive is written to.
    pub target: PathBuf,
    /// Archive file name without extension.
    pub filename: String,
    /// Entries to exclude, relative to `source`.
    pub ignore: Vec<String>,
}

impl ArchiveOptions {
    /// Full path of the archive with the given extension.
    pub fn output_path(&self, extension: &str) -> PathBuf {
        self.target.join(format!("{}.{}", self.filename, extension))
    }
}

/// Archive settings given on the command line.
#[derive(Debug, Clone, Default)]
pub struct ArchiveOverrides {
    pub source: Option<PathBuf>,
    pub target: Option<PathBuf>,
    pub filename: Option<String>,
    pub ignore: Vec<String>,
}

/// Resolve archive options.
///
/// Each field comes from the command line, then the project `archive`
/// section, then the default. Relative paths resolve against the base dir.
pub fn archive_options(defaults: &ProgramDefaults, overrides: &ArchiveOverrides) -> ArchiveOptions {
    let base_dir = defaults.base_dir();
    let section = defaults.project().get("archive");
    let section_str = |key: &str| section.and_then(|s| s.get(key)).and_then(Value::as_str);

    let source = overrides
        .source
        .clone()
        .or_else(|| section_str("source").map(PathBuf::from))
        .map(|p| resolve(base_dir, &p))
        .unwrap_or_else(|| base_dir.to_path_buf());

    let target = overrides
        .target
        .clone()
        .or_else(|| section_str("target").map(PathBuf::from))
        .map(|p| resolve(base_dir, &p))
        .unwrap_or_else(|| base_dir.to_path_buf());

    let filename = overrides
        .filename
        .clone()
        .or_else(|| section_str("filename").map(String::from))
        .unwrap_or_else(|| dir_name(&source));

    let ignore = if !overrides.ignore.is_empty() {
        overrides.ignore.clone()
    } else if let Some(list) = section.and_then(|s| s.get("ignore")).and_then(Value::as_array) {
        list.iter()
            .filter_map(Value::as_str)
            .map(String::from)
            .collect()
    } else {
        DEFAULT_IGNORE.iter().map(|s| s.to_string()).collect()
    };

    ArchiveOptions {
        source,
        target,
        filename,
        ignore,
    }
}

fn resolve(base_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

fn dir_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "archive".to_string())
}
