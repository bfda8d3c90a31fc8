use serde::{Deserialize, Serialize};
use std::fmt;
use sysinfo::System;

use super::readers::cpu::read_cpu_model;
use super::source::ProcFs;

const UNKNOWN: &str = "Unknown";

/// Operating system family the binary was built for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OsFamily {
    Windows,
    MacOs,
    Linux,
    FreeBsd,
    Unix,
    Other,
}

impl OsFamily {
    pub const fn current() -> Self {
        if cfg!(target_os = "windows") {
            OsFamily::Windows
        } else if cfg!(target_os = "macos") {
            OsFamily::MacOs
        } else if cfg!(target_os = "linux") {
            OsFamily::Linux
        } else if cfg!(target_os = "freebsd") {
            OsFamily::FreeBsd
        } else if cfg!(unix) {
            OsFamily::Unix
        } else {
            OsFamily::Other
        }
    }
}

impl fmt::Display for OsFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OsFamily::Windows => "Windows",
            OsFamily::MacOs => "Mac OSX",
            OsFamily::Linux => "Linux",
            OsFamily::FreeBsd => "FreeBSD",
            OsFamily::Unix => "Unix",
            OsFamily::Other => "Other",
        };
        f.write_str(name)
    }
}

/// Facts that change at most once per boot or login session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub os: OsFamily,
    pub hostname: String,
    pub username: String,
    pub cpu_model: String,
}

impl Identity {
    /// Read every identity fact once. Caching is left to the caller.
    pub fn probe(fs: &ProcFs) -> Self {
        Self {
            os: OsFamily::current(),
            hostname: hostname(),
            username: username_from(|key| std::env::var(key).ok()),
            cpu_model: read_cpu_model(fs),
        }
    }
}

pub fn hostname() -> String {
    System::host_name()
        .filter(|h| !h.is_empty())
        .unwrap_or_else(|| UNKNOWN.to_string())
}

/// Username from `USER`, then `USERNAME`
pub fn username_from<F: Fn(&str) -> Option<String>>(lookup: F) -> String {
    ["USER", "USERNAME"]
        .iter()
        .find_map(|key| lookup(key).filter(|v| !v.is_empty()))
        .unwrap_or_else(|| UNKNOWN.to_string())
}
