//! Configuration loading and construction.
//!
//! - Project file discovery and loading in [`loader`]
//! - The immutable program snapshot in [`defaults`]
//! - Deep merging in [`merger`]
//! - Per-command configuration construction in [`builder`]
//! - Key path lookup in [`path`]
//! - Archive options in [`archive`]
//!
//! # Example
//!
//! ```
//! use easypack::config::{build_configuration, Extra, InstallOverride, Overrides, ProgramDefaults};
//!
//! let defaults = ProgramDefaults::new("/app");
//! let overrides = Overrides {
//!     install: Some(InstallOverride { check: true, npm: "yarn".into() }),
//!     ..Default::default()
//! };
//! let config = build_configuration(&defaults, &overrides, Extra::default());
//! assert_eq!(config.get_str("install.npm"), Some("yarn"));
//! ```
//!
//! # Configuration File Locations
//!
//! 1. Project config (`easypack.config.yml`, `.yaml` or `.json`)
//! 2. Local overrides (`easypack.config.local.yml`)
//!
//! `--config <file>` replaces both.

pub mod archive;
pub mod builder;
pub mod defaults;
pub mod loader;
pub mod merger;
pub mod path;

pub use archive::{archive_options, ArchiveOptions, ArchiveOverrides};
pub use builder::{
    build_configuration, CliSettings, Configuration, Extra, InstallOverride, Overrides,
    CLI_DEVTOOL_KEY,
};
pub use defaults::{BundleFlags, ProgramDefaults};
pub use loader::{load_config_value, load_project_config, parse_config, ConfigPaths};
pub use merger::{deep_merge, merge_configs};
pub use path::lookup;
