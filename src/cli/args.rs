//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::config::{BundleFlags, ProgramDefaults};
use crate::error::Result;
use crate::ui::OutputMode;

/// easypack - Build, serve and package webpack projects.
#[derive(Debug, Parser)]
#[command(name = "easypack")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true, arg_required_else_help = true)]
pub struct Cli {
    /// Path to config file (overrides easypack.config.yml discovery)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to project root (overrides current directory)
    #[arg(short = 'C', long, global = true)]
    pub project: Option<PathBuf>,

    /// Build target(s): web, node
    #[arg(short = 't', long = "type", global = true)]
    pub kind: Option<String>,

    /// Framework (vue, react, ...)
    #[arg(short, long, global = true)]
    pub framework: Option<String>,

    /// Port for dev and static servers
    #[arg(short, long, global = true)]
    pub port: Option<u16>,

    /// Report bundle sizes
    #[arg(long, global = true)]
    pub size: bool,

    /// Rebuild on file changes
    #[arg(short, long, global = true)]
    pub watch: bool,

    /// Hash output file names
    #[arg(long, global = true)]
    pub hash: bool,

    /// Minify output
    #[arg(long, global = true)]
    pub compress: bool,

    /// Show debug logs
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Output mode selected by `--quiet`.
    pub fn output_mode(&self) -> OutputMode {
        if self.quiet {
            OutputMode::Quiet
        } else {
            OutputMode::Normal
        }
    }

    /// Whether debug logs are wanted (`--debug` or `--verbose`).
    pub fn debug_logging(&self) -> bool {
        self.debug || self.verbose
    }

    /// Bundler switches from the global flags.
    pub fn bundle_flags(&self) -> BundleFlags {
        BundleFlags {
            size: self.size,
            watch: self.watch,
            hash: self.hash,
            compress: self.compress,
        }
    }

    /// Absolute `--project` directory, or the current directory.
    ///
    /// The compile temp dir is keyed on this path, so `-C .` and no flag
    /// must give the same value.
    pub fn base_dir(&self) -> Result<PathBuf> {
        match &self.project {
            Some(project) => Ok(std::path::absolute(project)?),
            None => Ok(std::env::current_dir()?),
        }
    }

    /// Load the program defaults snapshot for this invocation.
    pub fn program_defaults(&self) -> Result<ProgramDefaults> {
        let defaults = ProgramDefaults::load(self.base_dir()?, self.config.as_deref())?
            .with_kind(self.kind.clone())
            .with_framework(self.framework.clone())
            .with_port(self.port)
            .with_flags(self.bundle_flags());
        Ok(defaults)
    }
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a project from a boilerplate
    Init(InitArgs),

    /// Install project dependencies
    Install(InstallArgs),

    /// Start the development server
    #[command(visible_alias = "start")]
    Dev,

    /// Build the project
    Build(BuildArgs),

    /// Build the dll bundle
    Dll(EnvArgs),

    /// Print the resolved webpack config
    Print(PrintArgs),

    /// Serve a directory over HTTP
    Server(ServerArgs),

    /// Package the project as a zip archive
    Zip(ArchiveArgs),

    /// Package the project as a tar.gz archive
    Tar(ArchiveArgs),

    /// Deploy the project
    Deploy,

    /// Upgrade easywebpack dependencies
    Upgrade(UpgradeArgs),

    /// Remove build caches and output
    Clean(CleanArgs),

    /// Kill processes listening on ports
    Kill(KillArgs),

    /// Open a directory (default: the compile temp dir)
    Open(OpenArgs),

    /// Not implemented
    #[command(hide = true)]
    Debug,

    /// Not implemented
    #[command(hide = true)]
    Test,

    /// Not implemented
    #[command(hide = true)]
    Cov,

    /// Not implemented
    #[command(hide = true)]
    Add,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `init` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct InitArgs {
    /// Boilerplate id or git repository (prompted when omitted)
    pub boilerplate: Option<String>,

    /// Project directory name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Replace an existing non-empty directory
    #[arg(long)]
    pub force: bool,
}

/// Package manager used by `install`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum NpmClient {
    #[default]
    Npm,
    Yarn,
    Pnpm,
    Cnpm,
}

impl NpmClient {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::Yarn => "yarn",
            Self::Pnpm => "pnpm",
            Self::Cnpm => "cnpm",
        }
    }
}

/// Arguments for the `install` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct InstallArgs {
    /// Package manager
    #[arg(long, value_enum, default_value_t = NpmClient::Npm)]
    pub mode: NpmClient,
}

/// `--server` on `build`: bare flag, or `--server=<port>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerToggle {
    DefaultPort,
    Port(u16),
}

impl ServerToggle {
    pub fn port(&self) -> Option<u16> {
        match self {
            Self::DefaultPort => None,
            Self::Port(port) => Some(*port),
        }
    }
}

fn parse_server_toggle(value: &str) -> std::result::Result<ServerToggle, String> {
    match value.trim() {
        "" | "true" => Ok(ServerToggle::DefaultPort),
        other => other
            .parse::<u16>()
            .map(ServerToggle::Port)
            .map_err(|_| format!("'{}' is not a port number", other)),
    }
}

/// Arguments for the `build` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct BuildArgs {
    /// Environment (dev, test, prod)
    pub env: Option<String>,

    /// Source map style
    #[arg(long)]
    pub devtool: Option<String>,

    /// Favour build speed over output quality
    #[arg(long)]
    pub speed: bool,

    /// Serve the web output after the build (optionally --server=<port>)
    #[arg(
        long,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_parser = parse_server_toggle
    )]
    pub server: Option<ServerToggle>,
}

/// Arguments carrying only an environment selector.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct EnvArgs {
    /// Environment (dev, test, prod)
    pub env: Option<String>,
}

/// Arguments for the `print` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct PrintArgs {
    /// Environment (dev, test, prod)
    pub env: Option<String>,

    /// Key path to print (e.g. output.path, module.rules[0])
    #[arg(short, long, visible_alias = "node")]
    pub key: Option<String>,
}

/// Arguments for the `server` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ServerArgs {
    /// Directory to serve (default: public)
    #[arg(short, long)]
    pub dist: Option<PathBuf>,
}

/// Arguments for the `zip` and `tar` commands.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ArchiveArgs {
    /// Directory to archive
    #[arg(long)]
    pub source: Option<PathBuf>,

    /// Directory the archive is written to
    #[arg(long)]
    pub target: Option<PathBuf>,

    /// Archive name without extension
    #[arg(long)]
    pub filename: Option<String>,

    /// Entries to leave out (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub ignore: Vec<String>,
}

/// Arguments for the `upgrade` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct UpgradeArgs {
    /// Version range to upgrade to
    #[arg(long)]
    pub to: Option<String>,

    /// Show changes without writing package.json
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the `clean` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CleanArgs {
    /// `all`, or a path to remove (default: the compile temp dir)
    pub dir: Option<String>,
}

/// Arguments for the `kill` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct KillArgs {
    /// Comma-separated ports (default: 7001,9000,9001)
    pub ports: Option<String>,
}

/// Arguments for the `open` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct OpenArgs {
    /// Directory to open
    pub dir: Option<PathBuf>,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
