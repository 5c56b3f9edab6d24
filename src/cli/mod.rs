//! Command-line interface for easypack.
//!
//! This module provides the CLI argument parsing using clap's derive macros
//! and command implementations.
//!
//! # Architecture
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{
    ArchiveArgs, BuildArgs, CleanArgs, Cli, Commands, CompletionsArgs, EnvArgs, InitArgs,
    InstallArgs, KillArgs, NpmClient, OpenArgs, PrintArgs, ServerArgs, ServerToggle, UpgradeArgs,
};
pub use commands::{Command, CommandDispatcher, CommandResult, Outcome};
