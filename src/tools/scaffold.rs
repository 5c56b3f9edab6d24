//! Project scaffolding from git boilerplates.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{EasypackError, Result};
use crate::shell::execute_quiet;

use super::{Boilerplate, InitRequest, Scaffolder};

/// Built-in boilerplates.
pub const BOILERPLATES: &[Boilerplate] = &[
    Boilerplate {
        id: "egg-vue",
        description: "Egg + Vue server side render application",
        repository: "https://github.com/easy-team/egg-vue-webpack-boilerplate.git",
    },
    Boilerplate {
        id: "egg-react",
        description: "Egg + React server side render application",
        repository: "https://github.com/easy-team/egg-react-webpack-boilerplate.git",
    },
    Boilerplate {
        id: "egg-vue-ts",
        description: "Egg + Vue + TypeScript application",
        repository: "https://github.com/easy-team/egg-vue-typescript-boilerplate.git",
    },
    Boilerplate {
        id: "vue",
        description: "Vue client side render application",
        repository: "https://github.com/easy-team/easywebpack-vue-boilerplate.git",
    },
    Boilerplate {
        id: "react",
        description: "React client side render application",
        repository: "https://github.com/easy-team/easywebpack-react-boilerplate.git",
    },
];

/// Whether a boilerplate argument is a repository location rather than an id.
pub fn is_repository(value: &str) -> bool {
    value.starts_with("https://")
        || value.starts_with("http://")
        || value.starts_with("git@")
        || value.starts_with("file://")
        || value.ends_with(".git")
}

/// Directory name derived from a repository location.
fn repository_name(repository: &str) -> String {
    let last = repository
        .trim_end_matches('/')
        .rsplit(['/', ':'])
        .next()
        .unwrap_or(repository);
    last.trim_end_matches(".git").to_string()
}

/// Default [`Scaffolder`]: shallow `git clone` of a registered boilerplate.
#[derive(Debug, Clone, Copy, Default)]
pub struct GitScaffolder;

impl GitScaffolder {
    pub fn new() -> Self {
        Self
    }

    fn resolve(&self, id: &str) -> Result<(String, String)> {
        if let Some(boilerplate) = BOILERPLATES.iter().find(|b| b.id == id) {
            return Ok((boilerplate.repository.to_string(), boilerplate.id.to_string()));
        }
        if is_repository(id) {
            return Ok((id.to_string(), repository_name(id)));
        }
        Err(EasypackError::UnknownBoilerplate {
            name: id.to_string(),
        })
    }
}

impl Scaffolder for GitScaffolder {
    fn boilerplates(&self) -> Vec<Boilerplate> {
        BOILERPLATES.to_vec()
    }

    fn init(&self, base_dir: &Path, request: &InitRequest) -> Result<PathBuf> {
        let (repository, default_name) = self.resolve(&request.boilerplate)?;
        let target = base_dir.join(request.name.as_deref().unwrap_or(&default_name));

        let occupied = fs::read_dir(&target)
            .map(|mut entries| entries.next().is_some())
            .unwrap_or(false);
        if occupied {
            if !request.force {
                return Err(EasypackError::ConfigValidationError {
                    message: format!(
                        "{} already exists and is not empty (use --force to replace it)",
                        target.display()
                    ),
                });
            }
            fs::remove_dir_all(&target)?;
        }

        let command = format!(
            "git clone --depth 1 \"{}\" \"{}\"",
            repository,
            target.display()
        );
        tracing::info!(%repository, target = %target.display(), "cloning boilerplate");
        execute_quiet(&command, Some(base_dir))?.into_checked(&command)?;

        let git_dir = target.join(".git");
        if git_dir.exists() {
            fs::remove_dir_all(&git_dir)?;
        }
        Ok(target)
    }
}
