//! Fake `/proc` and `/sys` trees for driving the readers.

use std::fs;
use std::path::{Path, PathBuf};

use hostmon::core::system_monitor::{CollectorConfig, ProcFs, ProcessCpuConfig};
use tempfile::TempDir;

pub struct Fixture {
    dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("proc")).unwrap();
        fs::create_dir_all(dir.path().join("sys")).unwrap();
        Self { dir }
    }

    pub fn proc_root(&self) -> PathBuf {
        self.dir.path().join("proc")
    }

    pub fn sys_root(&self) -> PathBuf {
        self.dir.path().join("sys")
    }

    pub fn procfs(&self) -> ProcFs {
        ProcFs::new(self.proc_root(), self.sys_root())
    }

    pub fn collector_config(&self) -> CollectorConfig {
        CollectorConfig {
            proc_root: self.proc_root(),
            sys_root: self.sys_root(),
            process_cpu: ProcessCpuConfig {
                min_interval_secs: 2.5,
                clock_ticks_per_sec: 100,
            },
            ..Default::default()
        }
    }

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    pub fn proc_file(&self, relative: &str, content: &str) {
        Self::write(&self.proc_root(), relative, content);
    }

    pub fn sys_file(&self, relative: &str, content: &str) {
        Self::write(&self.sys_root(), relative, content);
    }

    pub fn uptime(&self, secs: f64) {
        self.proc_file("uptime", &format!("{:.2} 0.00\n", secs));
    }

    pub fn cpu(&self, user: u64, idle: u64) {
        self.proc_file(
            "stat",
            &format!("cpu  {} 0 0 {} 0 0 0 0 0 0\ncpu0 0 0 0 0\nintr 0\n", user, idle),
        );
    }

    /// A process with the given user/system ticks and resident pages
    pub fn process(&self, pid: u32, name: &str, state: char, utime: u64, stime: u64, rss: u64) {
        self.proc_file(&format!("{}/comm", pid), &format!("{}\n", name));
        self.proc_file(
            &format!("{}/stat", pid),
            &format!(
                "{pid} ({name}) {state} 1 {pid} {pid} 0 -1 4194560 100 0 0 0 {utime} {stime} 0 0 20 0 1 0 100 8192000 {rss} 18446744073709551615 0 0 0\n"
            ),
        );
    }

    pub fn remove_process(&self, pid: u32) {
        fs::remove_dir_all(self.proc_root().join(pid.to_string())).unwrap();
    }
}
