//! Collaborators the dispatcher reaches through traits.
//!
//! Each trait has one default implementation backed by the local system.
//! [`Toolkit`] bundles them (with the build engine and static server) so
//! commands receive a single handle, and [`mock::MockToolkit`] swaps every
//! one of them for a recorder in tests.

pub mod archive;
pub mod mock;
pub mod scaffold;
pub mod system;
pub mod upgrade;
pub mod workspace;

pub use archive::ShellArchiver;
pub use scaffold::GitScaffolder;
pub use system::OsTools;
pub use upgrade::PackageUpgrader;
pub use workspace::ProjectWorkspace;

use std::path::{Path, PathBuf};

use crate::config::ArchiveOptions;
use crate::engine::{BuildEngine, ProcessEngine};
use crate::error::Result;
use crate::server::{HttpStaticServer, StaticServer};

/// Archive writer.
pub trait Archiver {
    /// Write `<target>/<filename>.zip`, returning its path.
    fn zip(&self, options: &ArchiveOptions) -> Result<PathBuf>;
    /// Write `<target>/<filename>.tar.gz`, returning its path.
    fn tar(&self, options: &ArchiveOptions) -> Result<PathBuf>;
}

/// Operating system helpers.
pub trait SystemTools {
    /// Remove a file or directory tree. A missing path is not an error.
    fn remove_path(&self, path: &Path) -> Result<()>;
    /// Kill processes listening on a comma separated port list. Returns the killed pids.
    fn kill_ports(&self, ports: &str) -> Result<Vec<u32>>;
    /// Open a path with the platform's default handler.
    fn open_path(&self, path: &Path) -> Result<()>;
}

/// Well-known project paths.
pub trait Workspace {
    fn compile_temp_dir(&self, base_dir: &Path) -> PathBuf;
    fn clear_temp_dir(&self, base_dir: &Path) -> Result<()>;
    fn clear_manifest(&self, base_dir: &Path) -> Result<()>;
    fn clear_build_dir(&self, base_dir: &Path) -> Result<()>;
}

/// A registered project template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Boilerplate {
    pub id: &'static str,
    pub description: &'static str,
    pub repository: &'static str,
}

/// What `init` should create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitRequest {
    /// Registry id or repository location.
    pub boilerplate: String,
    /// Directory name; defaults to the boilerplate id.
    pub name: Option<String>,
    /// Replace an existing non-empty directory.
    pub force: bool,
}

/// Project creation from boilerplates.
pub trait Scaffolder {
    fn boilerplates(&self) -> Vec<Boilerplate>;
    /// Create the project and return its directory.
    fn init(&self, base_dir: &Path, request: &InitRequest) -> Result<PathBuf>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpgradeOptions {
    /// Target version range.
    pub to: Option<String>,
    /// Report without writing.
    pub dry_run: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyChange {
    pub name: String,
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpgradeReport {
    pub changes: Vec<DependencyChange>,
    /// Whether `package.json` was rewritten.
    pub written: bool,
}

/// Project dependency upgrade.
pub trait Upgrader {
    fn upgrade(&self, base_dir: &Path, options: &UpgradeOptions) -> Result<UpgradeReport>;
}

/// Every collaborator a command may call.
pub struct Toolkit {
    pub engine: Box<dyn BuildEngine>,
    pub server: Box<dyn StaticServer>,
    pub archiver: Box<dyn Archiver>,
    pub system: Box<dyn SystemTools>,
    pub workspace: Box<dyn Workspace>,
    pub scaffolder: Box<dyn Scaffolder>,
    pub upgrader: Box<dyn Upgrader>,
}

impl Toolkit {
    /// Toolkit backed by the local system.
    pub fn system_default() -> Self {
        Self {
            engine: Box::new(ProcessEngine::new()),
            server: Box::new(HttpStaticServer::new()),
            archiver: Box::new(ShellArchiver::new()),
            system: Box::new(OsTools::new()),
            workspace: Box::new(ProjectWorkspace::new()),
            scaffolder: Box::new(GitScaffolder::new()),
            upgrader: Box::new(PackageUpgrader::new()),
        }
    }
}

impl Default for Toolkit {
    fn default() -> Self {
        Self::system_default()
    }
}
