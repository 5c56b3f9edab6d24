//! Static file serving for built output.

pub mod http;
pub mod static_files;

pub use static_files::HttpStaticServer;

use std::path::PathBuf;

use crate::error::Result;

/// Port used when none is given.
pub const DEFAULT_PORT: u16 = 8888;

/// What to serve and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServeOptions {
    /// Directory served as the document root.
    pub dist: PathBuf,
    /// Listen port; [`DEFAULT_PORT`] when `None`.
    pub port: Option<u16>,
}

impl ServeOptions {
    pub fn new(dist: impl Into<PathBuf>, port: Option<u16>) -> Self {
        Self {
            dist: dist.into(),
            port,
        }
    }

    /// The port actually listened on.
    pub fn port_or_default(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }
}

/// Static HTTP server collaborator. `start` blocks while serving.
pub trait StaticServer {
    fn start(&self, options: &ServeOptions) -> Result<()>;
}
