//! Locations of the kernel pseudo-filesystems and platform constants.
//!
//! All readers resolve their files through [`ProcFs`] so tests can point
//! them at a fixture tree instead of the live `/proc` and `/sys`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{HostmonError, Result};

/// Fallback when `sysconf(_SC_CLK_TCK)` is unavailable
pub const DEFAULT_CLOCK_TICKS: u64 = 100;
/// Fallback when `sysconf(_SC_PAGESIZE)` is unavailable
pub const DEFAULT_PAGE_SIZE: u64 = 4096;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcFs {
    proc_root: PathBuf,
    sys_root: PathBuf,
}

impl Default for ProcFs {
    fn default() -> Self {
        Self::new("/proc", "/sys")
    }
}

impl ProcFs {
    pub fn new<P: Into<PathBuf>, S: Into<PathBuf>>(proc_root: P, sys_root: S) -> Self {
        Self {
            proc_root: proc_root.into(),
            sys_root: sys_root.into(),
        }
    }

    pub fn proc_root(&self) -> &Path {
        &self.proc_root
    }

    pub fn proc_path<P: AsRef<Path>>(&self, relative: P) -> PathBuf {
        self.proc_root.join(relative)
    }

    pub fn pid_path(&self, pid: u32, file: &str) -> PathBuf {
        self.proc_root.join(pid.to_string()).join(file)
    }

    pub fn sys_path<P: AsRef<Path>>(&self, relative: P) -> PathBuf {
        self.sys_root.join(relative)
    }
}

/// Read a whole pseudo-file, mapping any failure to `SourceUnavailable`.
pub fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| HostmonError::source_unavailable(path, e))
}

/// Read the first line of a pseudo-file without its trailing newline.
pub fn read_first_line(path: &Path) -> Result<String> {
    let content = read_source(path)?;
    Ok(content.lines().next().unwrap_or_default().to_string())
}

/// Clock ticks per second used by the kernel's CPU time accounting
#[cfg(unix)]
pub fn clock_ticks_per_second() -> u64 {
    // SAFETY: sysconf has no preconditions and only reads a configuration value.
    let ticks = unsafe { libc::sysconf(libc::_SC_CLK_TCK) };
    if ticks > 0 {
        ticks as u64
    } else {
        DEFAULT_CLOCK_TICKS
    }
}

#[cfg(not(unix))]
pub fn clock_ticks_per_second() -> u64 {
    DEFAULT_CLOCK_TICKS
}

/// Size in bytes of one memory page
#[cfg(unix)]
pub fn page_size() -> u64 {
    // SAFETY: see clock_ticks_per_second.
    let size = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };
    if size > 0 {
        size as u64
    } else {
        DEFAULT_PAGE_SIZE
    }
}

#[cfg(not(unix))]
pub fn page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}
