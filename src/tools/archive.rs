//! Archiving through the system `zip` and `tar` programs.

use std::fs;
use std::path::PathBuf;

use crate::config::ArchiveOptions;
use crate::error::Result;
use crate::shell::{execute_quiet, CommandResult};

use super::Archiver;

fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

/// Command line for `zip`, run from inside the source directory.
pub fn zip_command(options: &ArchiveOptions) -> String {
    let mut command = format!(
        "zip -r -q {} .",
        quote(&options.output_path("zip").to_string_lossy())
    );
    for entry in &options.ignore {
        command.push_str(&format!(" -x {} {}", quote(entry), quote(&format!("{}/*", entry))));
    }
    command
}

/// Command line for `tar`.
pub fn tar_command(options: &ArchiveOptions) -> String {
    let mut command = format!(
        "tar -czf {}",
        quote(&options.output_path("tar.gz").to_string_lossy())
    );
    for entry in &options.ignore {
        command.push_str(&format!(" --exclude={}", quote(entry)));
    }
    // Keep a previous archive written into the source tree out of the new one.
    command.push_str(&format!(" --exclude={}", quote(&format!("{}.tar.gz", options.filename))));
    command.push_str(&format!(
        " -C {} .",
        quote(&options.source.to_string_lossy())
    ));
    command
}

/// Default [`Archiver`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellArchiver;

impl ShellArchiver {
    pub fn new() -> Self {
        Self
    }

    fn run(&self, command: &str, options: &ArchiveOptions, output: PathBuf) -> Result<PathBuf> {
        fs::create_dir_all(&options.target)?;
        if output.exists() {
            fs::remove_file(&output)?;
        }
        let result: CommandResult = execute_quiet(command, Some(&options.source))?;
        if !result.success && !result.stderr.is_empty() {
            tracing::debug!(stderr = %result.stderr.trim(), "archiver failed");
        }
        result.into_checked(command)?;
        tracing::debug!(path = %output.display(), "archive written");
        Ok(output)
    }
}

impl Archiver for ShellArchiver {
    fn zip(&self, options: &ArchiveOptions) -> Result<PathBuf> {
        self.run(&zip_command(options), options, options.output_path("zip"))
    }

    fn tar(&self, options: &ArchiveOptions) -> Result<PathBuf> {
        self.run(&tar_command(options), options, options.output_path("tar.gz"))
    }
}
