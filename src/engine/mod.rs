//! Build and dev-server engine.
//!
//! The dispatcher never runs the bundler itself; it hands a
//! [`Configuration`] to a [`BuildEngine`]. A build is a two-phase contract:
//! [`BuildEngine::run_build`] returns once the build (and any configured
//! completion hook) has finished, with a [`BuildReport`] describing the
//! compiler units it produced. Callers inspect the report to decide what
//! happens next.

pub mod process;

pub use process::ProcessEngine;

use serde_json::Value;
use std::path::PathBuf;

use crate::config::Configuration;
use crate::error::Result;

/// Target name of the browser compiler unit.
pub const WEB_TARGET: &str = "web";

/// Bundler configuration(s) resolved for a [`Configuration`].
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedConfig {
    /// One compiler unit.
    Single(Value),
    /// Several compiler units, in build order.
    Multiple(Vec<Value>),
    /// Nothing to build.
    Empty,
}

impl ResolvedConfig {
    /// Wrap a list of units, collapsing to `Single`/`Empty` where possible.
    pub fn from_units(mut units: Vec<Value>) -> Self {
        match units.len() {
            0 => Self::Empty,
            1 => Self::Single(units.remove(0)),
            _ => Self::Multiple(units),
        }
    }

    /// The units as an ordered list.
    pub fn items(&self) -> Vec<&Value> {
        match self {
            Self::Single(value) => vec![value],
            Self::Multiple(values) => values.iter().collect(),
            Self::Empty => Vec::new(),
        }
    }

    /// Whether there is nothing to build.
    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }

    /// The resolved value as one JSON document.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Single(value) => value.clone(),
            Self::Multiple(values) => Value::Array(values.clone()),
            Self::Empty => Value::Null,
        }
    }
}

/// One target-specific unit of a finished build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerUnit {
    /// Build target (`web`, `node`, ...).
    pub target: Option<String>,
    /// Resolved output directory.
    pub output_path: Option<PathBuf>,
}

impl CompilerUnit {
    /// Read target and `output.path` from a unit record.
    pub fn from_value(value: &Value) -> Self {
        Self {
            target: value.get("target").and_then(Value::as_str).map(String::from),
            output_path: value
                .get("output")
                .and_then(|o| o.get("path"))
                .and_then(Value::as_str)
                .map(PathBuf::from),
        }
    }
}

/// Outcome of a completed build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub units: Vec<CompilerUnit>,
}

impl BuildReport {
    /// Report for the given unit records.
    pub fn from_values<'a>(values: impl IntoIterator<Item = &'a Value>) -> Self {
        Self {
            units: values.into_iter().map(CompilerUnit::from_value).collect(),
        }
    }

    /// The unit whose target is exactly `web`.
    pub fn web_unit(&self) -> Option<&CompilerUnit> {
        self.units
            .iter()
            .find(|unit| unit.target.as_deref() == Some(WEB_TARGET))
    }
}

/// Bundler collaborator.
pub trait BuildEngine {
    /// Resolve the bundler configuration(s) without building.
    fn get_config(&self, config: &Configuration) -> Result<ResolvedConfig>;

    /// Start the long-running dev server.
    fn run_server(&self, config: &Configuration) -> Result<()>;

    /// Build, run the completion hook, and report the compiler units.
    fn run_build(&self, config: &Configuration) -> Result<BuildReport>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_units_collapses() {
        assert_eq!(ResolvedConfig::from_units(vec![]), ResolvedConfig::Empty);
        assert_eq!(
            ResolvedConfig::from_units(vec![json!({"target": "web"})]),
            ResolvedConfig::Single(json!({"target": "web"}))
        );
        assert!(matches!(
            ResolvedConfig::from_units(vec![json!({}), json!({})]),
            ResolvedConfig::Multiple(_)
        ));
    }

    #[test]
    fn items_preserve_order() {
        let resolved = ResolvedConfig::Multiple(vec![
            json!({"target": "web"}),
            json!({"target": "node"}),
        ]);
        let targets: Vec<_> = resolved
            .items()
            .iter()
            .map(|v| v["target"].as_str().unwrap())
            .collect();
        assert_eq!(targets, vec!["web", "node"]);
        assert!(ResolvedConfig::Empty.is_empty());
    }

    #[test]
    fn web_unit_matches_exact_target() {
        let report = BuildReport::from_values(&[
            json!({"target": "node", "output": {"path": "/app/app/view"}}),
            json!({"target": "webworker", "output": {"path": "/app/worker"}}),
            json!({"target": "web", "output": {"path": "/app/public"}}),
        ]);
        let web = report.web_unit().unwrap();
        assert_eq!(web.output_path, Some(PathBuf::from("/app/public")));
    }

    #[test]
    fn web_unit_absent_is_none() {
        let report = BuildReport::from_values(&[json!({"target": "node"})]);
        assert!(report.web_unit().is_none());
    }

    #[test]
    fn compiler_unit_without_output() {
        let unit = CompilerUnit::from_value(&json!({"target": "web"}));
        assert_eq!(unit.target.as_deref(), Some("web"));
        assert_eq!(unit.output_path, None);
    }
}
