//! Program-wide defaults.
//!
//! [`ProgramDefaults`] is the immutable snapshot every command builds its
//! configuration from: the base directory, the global CLI flags and the
//! project record loaded from disk.

use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

use crate::error::Result;

use super::loader::load_project_config;

/// Global bundler switches taken from the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BundleFlags {
    /// Emit a bundle size report.
    pub size: bool,
    /// Rebuild on file changes.
    pub watch: bool,
    /// Hash output file names.
    pub hash: bool,
    /// Minify output.
    pub compress: bool,
}

/// Immutable program defaults for one process.
#[derive(Debug, Clone)]
pub struct ProgramDefaults {
    base_dir: PathBuf,
    kind: Option<String>,
    framework: Option<String>,
    port: Option<u16>,
    flags: BundleFlags,
    project: Value,
}

impl ProgramDefaults {
    /// Defaults rooted at `base_dir` with no flags and an empty project record.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            kind: None,
            framework: None,
            port: None,
            flags: BundleFlags::default(),
            project: Value::Object(Map::new()),
        }
    }

    /// Load the project record from `base_dir` (or the explicit config file).
    pub fn load(base_dir: impl Into<PathBuf>, config_file: Option<&Path>) -> Result<Self> {
        let base_dir = base_dir.into();
        let project = load_project_config(&base_dir, config_file)?;
        Ok(Self::new(base_dir).with_project(project))
    }

    /// Replace the project record.
    pub fn with_project(mut self, project: Value) -> Self {
        self.project = project;
        self
    }

    /// Set the `--type` flag.
    pub fn with_kind(mut self, kind: Option<String>) -> Self {
        self.kind = kind;
        self
    }

    /// Set the `--framework` flag.
    pub fn with_framework(mut self, framework: Option<String>) -> Self {
        self.framework = framework;
        self
    }

    /// Set the `--port` flag.
    pub fn with_port(mut self, port: Option<u16>) -> Self {
        self.port = port;
        self
    }

    /// Set the bundler switches.
    pub fn with_flags(mut self, flags: BundleFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Project base directory.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// The `--type` flag, if given.
    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    /// The `--port` flag, if given.
    pub fn port(&self) -> Option<u16> {
        self.port
    }

    /// Bundler switches.
    pub fn flags(&self) -> BundleFlags {
        self.flags
    }

    /// The project record as loaded from disk.
    pub fn project(&self) -> &Value {
        &self.project
    }

    /// Record holding the global flags that map onto configuration keys.
    pub fn program_overlay(&self) -> Value {
        let mut overlay = Map::new();
        if let Some(kind) = &self.kind {
            overlay.insert("type".to_string(), Value::String(kind.clone()));
        }
        if let Some(framework) = &self.framework {
            overlay.insert("framework".to_string(), Value::String(framework.clone()));
        }
        if let Some(port) = self.port {
            overlay.insert("port".to_string(), Value::from(port));
        }
        Value::Object(overlay)
    }
}
