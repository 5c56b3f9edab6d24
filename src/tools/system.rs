//! Operating system helpers: path removal, port killing, opening files.

use std::fs;
use std::path::Path;

use crate::error::{EasypackError, Result};
use crate::shell::execute_quiet;

use super::SystemTools;

/// Parse a comma separated port list. Blank entries are skipped.
pub fn parse_ports(ports: &str) -> Result<Vec<u16>> {
    ports
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| match p.parse::<u16>() {
            Ok(port) if port > 0 => Ok(port),
            _ => Err(EasypackError::InvalidPort {
                value: p.to_string(),
            }),
        })
        .collect()
}

/// Whether `pid` names a single process. `0` and values that wrap to a
/// negative `pid_t` address process groups in `kill(2)`.
pub fn is_signalable(pid: u32) -> bool {
    pid > 0 && i32::try_from(pid).is_ok()
}

/// Pids listening on `port`, read from `lsof` output.
pub fn parse_lsof_pids(output: &str) -> Vec<u32> {
    output
        .lines()
        .filter_map(|line| line.trim().parse().ok())
        .filter(|pid| is_signalable(*pid))
        .collect()
}

/// Pids listening on `port`, read from `netstat -ano` output.
pub fn parse_netstat_pids(output: &str, port: u16) -> Vec<u32> {
    let suffix = format!(":{}", port);
    let mut pids: Vec<u32> = output
        .lines()
        .filter_map(|line| {
            let cols: Vec<&str> = line.split_whitespace().collect();
            if cols.len() < 5 || !cols[1].ends_with(&suffix) || cols[3] != "LISTENING" {
                return None;
            }
            cols[4].parse().ok()
        })
        .filter(|pid| is_signalable(*pid))
        .collect();
    pids.sort_unstable();
    pids.dedup();
    pids
}

/// Default [`SystemTools`].
#[derive(Debug, Clone, Copy, Default)]
pub struct OsTools;

impl OsTools {
    pub fn new() -> Self {
        Self
    }

    fn listening_pids(&self, port: u16) -> Result<Vec<u32>> {
        if cfg!(target_os = "windows") {
            let result = execute_quiet("netstat -ano -p tcp", None)?;
            Ok(parse_netstat_pids(&result.stdout, port))
        } else {
            // lsof exits 1 when nothing matches.
            let result = execute_quiet(&format!("lsof -ti tcp:{} -sTCP:LISTEN", port), None)?;
            Ok(parse_lsof_pids(&result.stdout))
        }
    }
}

#[cfg(unix)]
fn kill_pid(pid: u32) -> Result<()> {
    let target = libc::pid_t::try_from(pid)
        .ok()
        .filter(|p| *p > 0)
        .ok_or_else(|| anyhow::anyhow!("refusing to signal pid {}", pid))?;
    let rc = unsafe { libc::kill(target, libc::SIGKILL) };
    if rc == 0 {
        Ok(())
    } else {
        Err(std::io::Error::last_os_error().into())
    }
}

#[cfg(not(unix))]
fn kill_pid(pid: u32) -> Result<()> {
    let command = format!("taskkill /F /PID {}", pid);
    execute_quiet(&command, None)?.into_checked(&command)?;
    Ok(())
}

impl SystemTools for OsTools {
    fn remove_path(&self, path: &Path) -> Result<()> {
        if path.is_dir() {
            fs::remove_dir_all(path)?;
        } else if path.exists() {
            fs::remove_file(path)?;
        } else {
            tracing::debug!(path = %path.display(), "nothing to remove");
        }
        Ok(())
    }

    fn kill_ports(&self, ports: &str) -> Result<Vec<u32>> {
        let mut killed = Vec::new();
        for port in parse_ports(ports)? {
            for pid in self.listening_pids(port)? {
                if pid == std::process::id() {
                    continue;
                }
                match kill_pid(pid) {
                    Ok(()) => {
                        tracing::debug!(port, pid, "killed");
                        killed.push(pid);
                    }
                    Err(e) => tracing::warn!(port, pid, error = %e, "kill failed"),
                }
            }
        }
        Ok(killed)
    }

    fn open_path(&self, path: &Path) -> Result<()> {
        open::that(path).map_err(|e| {
            anyhow::anyhow!(
                "Failed to open {}. You can open it manually.\n\nError: {}",
                path.display(),
                e
            )
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn parse_default_port_list() {
        assert_eq!(parse_ports("7001,9000,9001").unwrap(), vec![7001, 9000, 9001]);
    }

    #[test]
    fn parse_ports_trims_and_skips_blanks() {
        assert_eq!(parse_ports(" 3000 , ,8080,").unwrap(), vec![3000, 8080]);
    }

    #[test]
    fn parse_ports_rejects_garbage() {
        let err = parse_ports("3000,http").unwrap_err();
        assert!(matches!(err, EasypackError::InvalidPort { value } if value == "http"));
        assert!(parse_ports("70000").is_err());
        assert!(parse_ports("0").is_err());
    }

    #[test]
    fn lsof_output_lines_are_pids() {
        assert_eq!(parse_lsof_pids("1234\n5678\n\n"), vec![1234, 5678]);
        assert!(parse_lsof_pids("").is_empty());
    }

    #[test]
    fn lsof_output_drops_group_pids() {
        assert_eq!(parse_lsof_pids("4294967295\n0\n2147483648\n42\n"), vec![42]);
    }

    #[cfg(unix)]
    #[test]
    fn kill_pid_refuses_wrapping_pid() {
        assert!(kill_pid(u32::MAX).is_err());
        assert!(kill_pid(0).is_err());
    }

    #[test]
    fn netstat_output_filters_listening_port() {
        let output = "\
Active Connections

  Proto  Local Address          Foreign Address        State           PID
  TCP    0.0.0.0:7001           0.0.0.0:0              LISTENING       4321
  TCP    127.0.0.1:17001        0.0.0.0:0              LISTENING       99
  TCP    127.0.0.1:7001         127.0.0.1:50000        ESTABLISHED     4321
  TCP    [::]:7001              [::]:0                 LISTENING       4321
";
        assert_eq!(parse_netstat_pids(output, 7001), vec![4321]);
    }

    #[test]
    fn remove_path_handles_files_dirs_and_missing() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("dist");
        fs::create_dir_all(dir.join("js")).unwrap();
        let file = temp.path().join("stats.json");
        fs::write(&file, "{}").unwrap();

        let tools = OsTools::new();
        tools.remove_path(&dir).unwrap();
        tools.remove_path(&file).unwrap();
        tools.remove_path(&temp.path().join("missing")).unwrap();

        assert!(!dir.exists());
        assert!(!file.exists());
    }
}
