//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. Every command builds what it needs
//! from the shared [`ProgramDefaults`](crate::config::ProgramDefaults)
//! snapshot and calls one collaborator from the
//! [`Toolkit`](crate::tools::Toolkit).

pub mod archive;
pub mod build;
pub mod clean;
pub mod completions;
pub mod deploy;
pub mod dev;
pub mod dispatcher;
pub mod dll;
pub mod init;
pub mod install;
pub mod kill;
pub mod open;
pub mod print;
pub mod server;
pub mod unimplemented;
pub mod upgrade;

pub use dispatcher::{Command, CommandDispatcher, CommandResult, Outcome};
