//! Recording collaborators for tests.
//!
//! Every collaborator in a [`MockToolkit`] shares one call log, so a test
//! can assert the exact order of calls across the engine, server and tools.
//!
//! ```
//! use easypack::tools::mock::{Call, MockToolkit};
//!
//! let mock = MockToolkit::new();
//! let toolkit = mock.toolkit();
//! toolkit.system.kill_ports("3000").unwrap();
//! assert_eq!(mock.calls(), vec![Call::KillPorts("3000".into())]);
//! ```

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::config::{ArchiveOptions, Configuration};
use crate::engine::{BuildEngine, BuildReport, ResolvedConfig};
use crate::error::{EasypackError, Result};
use crate::server::{ServeOptions, StaticServer};

use super::scaffold::BOILERPLATES;
use super::{
    Archiver, Boilerplate, InitRequest, Scaffolder, SystemTools, Toolkit, UpgradeOptions,
    UpgradeReport, Upgrader, Workspace,
};

/// One recorded collaborator call.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    GetConfig(Configuration),
    RunServer(Configuration),
    RunBuild(Configuration),
    StartServer(ServeOptions),
    Zip(ArchiveOptions),
    Tar(ArchiveOptions),
    RemovePath(PathBuf),
    KillPorts(String),
    OpenPath(PathBuf),
    ClearTempDir(PathBuf),
    ClearManifest(PathBuf),
    ClearBuildDir(PathBuf),
    Init(InitRequest),
    Upgrade(UpgradeOptions),
}

impl Call {
    /// Short name used by [`MockToolkit::fail_on`] and [`MockToolkit::call_names`].
    pub fn name(&self) -> &'static str {
        match self {
            Call::GetConfig(_) => "get_config",
            Call::RunServer(_) => "run_server",
            Call::RunBuild(_) => "run_build",
            Call::StartServer(_) => "start_server",
            Call::Zip(_) => "zip",
            Call::Tar(_) => "tar",
            Call::RemovePath(_) => "remove_path",
            Call::KillPorts(_) => "kill_ports",
            Call::OpenPath(_) => "open_path",
            Call::ClearTempDir(_) => "clear_temp_dir",
            Call::ClearManifest(_) => "clear_manifest",
            Call::ClearBuildDir(_) => "clear_build_dir",
            Call::Init(_) => "init",
            Call::Upgrade(_) => "upgrade",
        }
    }
}

#[derive(Debug, Default)]
struct MockState {
    calls: Vec<Call>,
    resolved: Option<ResolvedConfig>,
    report: BuildReport,
    fail_on: Option<&'static str>,
}

/// Handle on a set of recording collaborators.
#[derive(Debug, Clone, Default)]
pub struct MockToolkit {
    state: Rc<RefCell<MockState>>,
}

impl MockToolkit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value returned by `get_config` (default: `Empty`).
    pub fn with_resolved(self, resolved: ResolvedConfig) -> Self {
        self.state.borrow_mut().resolved = Some(resolved);
        self
    }

    /// Report returned by `run_build` (default: no units).
    pub fn with_report(self, report: BuildReport) -> Self {
        self.state.borrow_mut().report = report;
        self
    }

    /// Make the named call fail after it is recorded.
    pub fn fail_on(self, name: &'static str) -> Self {
        self.state.borrow_mut().fail_on = Some(name);
        self
    }

    /// A [`Toolkit`] whose collaborators all record into this handle.
    pub fn toolkit(&self) -> Toolkit {
        let recorder = || Recorder {
            state: Rc::clone(&self.state),
        };
        Toolkit {
            engine: Box::new(recorder()),
            server: Box::new(recorder()),
            archiver: Box::new(recorder()),
            system: Box::new(recorder()),
            workspace: Box::new(recorder()),
            scaffolder: Box::new(recorder()),
            upgrader: Box::new(recorder()),
        }
    }

    /// Recorded calls, oldest first.
    pub fn calls(&self) -> Vec<Call> {
        self.state.borrow().calls.clone()
    }

    pub fn call_names(&self) -> Vec<&'static str> {
        self.state.borrow().calls.iter().map(Call::name).collect()
    }
}

/// Path `compile_temp_dir` reports for a base dir.
pub fn mock_temp_dir(base_dir: &Path) -> PathBuf {
    base_dir.join(".easypack-tmp")
}

struct Recorder {
    state: Rc<RefCell<MockState>>,
}

impl Recorder {
    fn record(&self, call: Call) -> Result<()> {
        let name = call.name();
        let mut state = self.state.borrow_mut();
        state.calls.push(call);
        if state.fail_on == Some(name) {
            return Err(EasypackError::Other(anyhow::anyhow!("{} failed", name)));
        }
        Ok(())
    }
}

impl BuildEngine for Recorder {
    fn get_config(&self, config: &Configuration) -> Result<ResolvedConfig> {
        self.record(Call::GetConfig(config.clone()))?;
        Ok(self
            .state
            .borrow()
            .resolved
            .clone()
            .unwrap_or(ResolvedConfig::Empty))
    }

    fn run_server(&self, config: &Configuration) -> Result<()> {
        self.record(Call::RunServer(config.clone()))
    }

    fn run_build(&self, config: &Configuration) -> Result<BuildReport> {
        self.record(Call::RunBuild(config.clone()))?;
        Ok(self.state.borrow().report.clone())
    }
}

impl StaticServer for Recorder {
    fn start(&self, options: &ServeOptions) -> Result<()> {
        self.record(Call::StartServer(options.clone()))
    }
}

impl Archiver for Recorder {
    fn zip(&self, options: &ArchiveOptions) -> Result<PathBuf> {
        self.record(Call::Zip(options.clone()))?;
        Ok(options.output_path("zip"))
    }

    fn tar(&self, options: &ArchiveOptions) -> Result<PathBuf> {
        self.record(Call::Tar(options.clone()))?;
        Ok(options.output_path("tar.gz"))
    }
}

impl SystemTools for Recorder {
    fn remove_path(&self, path: &Path) -> Result<()> {
        self.record(Call::RemovePath(path.to_path_buf()))
    }

    fn kill_ports(&self, ports: &str) -> Result<Vec<u32>> {
        self.record(Call::KillPorts(ports.to_string()))?;
        Ok(Vec::new())
    }

    fn open_path(&self, path: &Path) -> Result<()> {
        self.record(Call::OpenPath(path.to_path_buf()))
    }
}

impl Workspace for Recorder {
    fn compile_temp_dir(&self, base_dir: &Path) -> PathBuf {
        mock_temp_dir(base_dir)
    }

    fn clear_temp_dir(&self, base_dir: &Path) -> Result<()> {
        self.record(Call::ClearTempDir(base_dir.to_path_buf()))
    }

    fn clear_manifest(&self, base_dir: &Path) -> Result<()> {
        self.record(Call::ClearManifest(base_dir.to_path_buf()))
    }

    fn clear_build_dir(&self, base_dir: &Path) -> Result<()> {
        self.record(Call::ClearBuildDir(base_dir.to_path_buf()))
    }
}

impl Scaffolder for Recorder {
    fn boilerplates(&self) -> Vec<Boilerplate> {
        BOILERPLATES.to_vec()
    }

    fn init(&self, base_dir: &Path, request: &InitRequest) -> Result<PathBuf> {
        self.record(Call::Init(request.clone()))?;
        Ok(base_dir.join(request.name.as_deref().unwrap_or(&request.boilerplate)))
    }
}

impl Upgrader for Recorder {
    fn upgrade(&self, _base_dir: &Path, options: &UpgradeOptions) -> Result<UpgradeReport> {
        self.record(Call::Upgrade(options.clone()))?;
        Ok(UpgradeReport::default())
    }
}
