//! Root filesystem usage from statvfs plus the mount table.

use log::debug;
use std::path::Path;

use crate::core::system_monitor::metrics::{DiskSnapshot, Sampled, UNKNOWN_DEVICE};
use crate::core::system_monitor::source::{read_source, ProcFs};
use crate::error::{HostmonError, Result};

pub const ROOT_MOUNT: &str = "/";

/// The statvfs fields the snapshot is derived from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FsStats {
    pub blocks: u64,
    pub blocks_free: u64,
    pub blocks_available: u64,
    pub fragment_size: u64,
}

impl FsStats {
    /// Used space counts reserved blocks as free, matching `df`'s "Used" column.
    pub fn to_snapshot(&self, device: String, mount_point: &str) -> DiskSnapshot {
        let total = self.blocks.saturating_mul(self.fragment_size);
        let free = self.blocks_free.saturating_mul(self.fragment_size);
        DiskSnapshot {
            device,
            mount_point: mount_point.to_string(),
            total_bytes: total,
            free_bytes: free,
            available_bytes: self.blocks_available.saturating_mul(self.fragment_size),
            used_bytes: total.saturating_sub(free),
        }
    }
}

/// Backing device of the entry mounted exactly at `/`.
///
/// The last matching line wins since later mounts shadow earlier ones
/// (e.g. `rootfs` followed by the real root device).
pub fn parse_root_device(mounts: &str) -> Option<String> {
    mounts
        .lines()
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            let device = fields.next()?;
            let mount_point = fields.next()?;
            (mount_point == ROOT_MOUNT).then(|| device.to_string())
        })
        .last()
}

pub fn read_root_device(fs: &ProcFs) -> String {
    read_source(&fs.proc_path("mounts"))
        .ok()
        .and_then(|content| parse_root_device(&content))
        .unwrap_or_else(|| UNKNOWN_DEVICE.to_string())
}

#[cfg(unix)]
pub fn statvfs(path: &Path) -> Result<FsStats> {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let c_path = CString::new(path.as_os_str().as_bytes())
        .map_err(|_| HostmonError::parse(format!("path contains NUL byte: {:?}", path)))?;
    let mut stat: libc::statvfs = unsafe { std::mem::zeroed() };
    // SAFETY: c_path is a valid NUL-terminated string and stat is a writable statvfs.
    let rc = unsafe { libc::statvfs(c_path.as_ptr(), &mut stat) };
    if rc != 0 {
        return Err(HostmonError::source_unavailable(
            path,
            std::io::Error::last_os_error(),
        ));
    }

    Ok(FsStats {
        blocks: stat.f_blocks as u64,
        blocks_free: stat.f_bfree as u64,
        blocks_available: stat.f_bavail as u64,
        fragment_size: stat.f_frsize as u64,
    })
}

#[cfg(not(unix))]
pub fn statvfs(path: &Path) -> Result<FsStats> {
    Err(HostmonError::source_unavailable(
        path,
        std::io::Error::new(std::io::ErrorKind::Unsupported, "statvfs is unix-only"),
    ))
}

pub fn read_root_disk(fs: &ProcFs) -> Sampled<DiskSnapshot> {
    match statvfs(Path::new(ROOT_MOUNT)) {
        Ok(stats) => Sampled::available(stats.to_snapshot(read_root_device(fs), ROOT_MOUNT)),
        Err(e) => {
            debug!("{}", e);
            Sampled::unavailable()
        }
    }
}
