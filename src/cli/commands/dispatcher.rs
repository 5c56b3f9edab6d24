//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use crate::cli::args::{Cli, Commands};
use crate::config::ProgramDefaults;
use crate::error::Result;
use crate::tools::Toolkit;
use crate::ui::UserInterface;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output and prompts
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure, exit code and what
    /// the caller should do next.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// What the process should do after a command returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Normal completion.
    Completed,
    /// The command exists but does nothing yet.
    Unimplemented(String),
    /// Exit right away.
    Terminate,
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,

    /// Follow-up requested by the command.
    pub outcome: Outcome,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
            outcome: Outcome::Completed,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
            outcome: Outcome::Completed,
        }
    }

    /// Successful no-op for a command that is not implemented.
    pub fn unimplemented(name: &str) -> Self {
        Self {
            outcome: Outcome::Unimplemented(name.to_string()),
            ..Self::success()
        }
    }

    /// Success that ends the process immediately.
    pub fn terminate() -> Self {
        Self {
            outcome: Outcome::Terminate,
            ..Self::success()
        }
    }
}

/// Dispatches CLI commands to their implementations.
///
/// Holds the program defaults snapshot and the collaborators; every
/// command reads the former and calls exactly one entry point of the latter.
pub struct CommandDispatcher {
    defaults: ProgramDefaults,
    toolkit: Toolkit,
}

impl CommandDispatcher {
    /// Create a new dispatcher.
    pub fn new(defaults: ProgramDefaults, toolkit: Toolkit) -> Self {
        Self { defaults, toolkit }
    }

    /// The program defaults snapshot.
    pub fn defaults(&self) -> &ProgramDefaults {
        &self.defaults
    }

    /// Dispatch and execute a command.
    ///
    /// Routes the CLI subcommand to the appropriate command implementation
    /// and executes it.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        self.dispatch_command(&cli.command, ui)
    }

    /// Dispatch a subcommand without the surrounding [`Cli`].
    pub fn dispatch_command(
        &self,
        command: &Commands,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        let defaults = &self.defaults;
        let toolkit = &self.toolkit;
        tracing::debug!(?command, base_dir = %defaults.base_dir().display(), "dispatching");

        match command {
            Commands::Init(args) => {
                super::init::InitCommand::new(defaults, toolkit, args.clone()).execute(ui)
            }
            Commands::Install(args) => {
                super::install::InstallCommand::new(defaults, toolkit, args.clone()).execute(ui)
            }
            Commands::Dev => super::dev::DevCommand::new(defaults, toolkit).execute(ui),
            Commands::Build(args) => {
                super::build::BuildCommand::new(defaults, toolkit, args.clone()).execute(ui)
            }
            Commands::Dll(args) => {
                super::dll::DllCommand::new(defaults, toolkit, args.clone()).execute(ui)
            }
            Commands::Print(args) => {
                super::print::PrintCommand::new(defaults, toolkit, args.clone()).execute(ui)
            }
            Commands::Server(args) => {
                super::server::ServerCommand::new(defaults, toolkit, args.clone()).execute(ui)
            }
            Commands::Zip(args) => super::archive::ArchiveCommand::new(
                defaults,
                toolkit,
                super::archive::ArchiveFormat::Zip,
                args.clone(),
            )
            .execute(ui),
            Commands::Tar(args) => super::archive::ArchiveCommand::new(
                defaults,
                toolkit,
                super::archive::ArchiveFormat::Tar,
                args.clone(),
            )
            .execute(ui),
            Commands::Deploy => super::deploy::DeployCommand::new().execute(ui),
            Commands::Upgrade(args) => {
                super::upgrade::UpgradeCommand::new(defaults, toolkit, args.clone()).execute(ui)
            }
            Commands::Clean(args) => {
                super::clean::CleanCommand::new(defaults, toolkit, args.clone()).execute(ui)
            }
            Commands::Kill(args) => {
                super::kill::KillCommand::new(toolkit, args.clone()).execute(ui)
            }
            Commands::Open(args) => {
                super::open::OpenCommand::new(defaults, toolkit, args.clone()).execute(ui)
            }
            Commands::Debug => super::unimplemented::UnimplementedCommand::new("debug").execute(ui),
            Commands::Test => super::unimplemented::UnimplementedCommand::new("test").execute(ui),
            Commands::Cov => super::unimplemented::UnimplementedCommand::new("cov").execute(ui),
            Commands::Add => super::unimplemented::UnimplementedCommand::new("add").execute(ui),
            Commands::Completions(args) => {
                super::completions::CompletionsCommand::new(args.clone()).execute(ui)
            }
        }
    }
}
