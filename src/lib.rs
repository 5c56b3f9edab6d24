//! easypack - Build, serve and package webpack projects.
//!
//! easypack maps CLI subcommands onto a bundler configuration and a small
//! set of collaborators: a build engine, a static file server, and OS tools
//! for archiving, cleaning, killing ports and opening files.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface, argument parsing and dispatch
//! - [`config`] - Project config loading, program defaults and configuration construction
//! - [`engine`] - Build engine seam and the process-backed bundler driver
//! - [`error`] - Error types and result aliases
//! - [`server`] - Static HTTP file server
//! - [`shell`] - Shell command execution
//! - [`tools`] - Archiver, system tools, workspace, scaffolder and upgrader
//! - [`ui`] - Interactive prompts, spinners, and terminal output
//!
//! # Example
//!
//! ```
//! use easypack::config::{build_configuration, Extra, Overrides, ProgramDefaults};
//! use serde_json::json;
//!
//! let defaults = ProgramDefaults::new("/app").with_project(json!({ "env": "dev" }));
//! let prod = Overrides { env: Some("prod".into()), ..Default::default() };
//!
//! let config = build_configuration(&defaults, &prod, Extra::default());
//! assert_eq!(config.get_str("env"), Some("prod"));
//! assert_eq!(defaults.project()["env"], "dev");
//! ```

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod server;
pub mod shell;
pub mod tools;
pub mod ui;

pub use error::{EasypackError, Result};
