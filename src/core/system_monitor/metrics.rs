use serde::{Deserialize, Serialize};
use std::fmt;

/// A reader result tagged with whether its source could be read at all.
///
/// `available == false` means the sensor or pseudo-file was absent and
/// `value` holds the type's default, so "absent" and "reports zero" stay
/// distinguishable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sampled<T> {
    pub value: T,
    pub available: bool,
}

impl<T> Sampled<T> {
    pub fn available(value: T) -> Self {
        Self {
            value,
            available: true,
        }
    }

    pub fn into_value(self) -> T {
        self.value
    }
}

impl<T: Default> Sampled<T> {
    pub fn unavailable() -> Self {
        Self {
            value: T::default(),
            available: false,
        }
    }
}

/// Complete system metrics snapshot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SystemMetrics {
    pub timestamp: i64, // Unix timestamp
    pub cpu_usage_percent: f64,
    pub memory: MemorySnapshot,
    pub disk: DiskSnapshot,
    pub processes: Vec<ProcessUsage>,
    pub process_counts: ProcessStateCounts,
    pub network: Vec<NetworkInterfaceSample>,
    pub thermal: Vec<ThermalReading>,
    pub fans: Vec<FanReading>,
}

/// Aggregate CPU time buckets from the `cpu` line, in clock ticks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CpuTimes {
    pub user: u64,
    pub nice: u64,
    pub system: u64,
    pub idle: u64,
    pub iowait: u64,
    pub irq: u64,
    pub softirq: u64,
    pub steal: u64,
    pub guest: u64,
    pub guest_nice: u64,
}

impl CpuTimes {
    pub fn idle_ticks(&self) -> u64 {
        self.idle.saturating_add(self.iowait)
    }

    pub fn busy_ticks(&self) -> u64 {
        [
            self.user,
            self.nice,
            self.system,
            self.irq,
            self.softirq,
            self.steal,
        ]
        .iter()
        .fold(0u64, |acc, v| acc.saturating_add(*v))
    }

    /// Ticks used as the rate denominator. Guest time is already folded into
    /// user/nice by the kernel, so it is not added again.
    pub fn total_ticks(&self) -> u64 {
        self.idle_ticks().saturating_add(self.busy_ticks())
    }
}

/// Kernel scheduler state of a process
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProcessState {
    Running,
    Sleeping,
    DiskSleep,
    Zombie,
    Stopped,
    TracingStop,
    Dead,
    #[default]
    Unknown,
}

impl ProcessState {
    pub const ALL: [ProcessState; 8] = [
        ProcessState::Running,
        ProcessState::Sleeping,
        ProcessState::DiskSleep,
        ProcessState::Zombie,
        ProcessState::Stopped,
        ProcessState::TracingStop,
        ProcessState::Dead,
        ProcessState::Unknown,
    ];

    /// Map the single-character code from a stat line.
    ///
    /// `I` (idle kernel thread) is counted as sleeping, as `top` does.
    pub fn from_code(code: char) -> Self {
        match code {
            'R' => ProcessState::Running,
            'S' | 'I' => ProcessState::Sleeping,
            'D' => ProcessState::DiskSleep,
            'Z' => ProcessState::Zombie,
            'T' => ProcessState::Stopped,
            't' => ProcessState::TracingStop,
            'X' | 'x' => ProcessState::Dead,
            _ => ProcessState::Unknown,
        }
    }

    pub fn code(&self) -> char {
        match self {
            ProcessState::Running => 'R',
            ProcessState::Sleeping => 'S',
            ProcessState::DiskSleep => 'D',
            ProcessState::Zombie => 'Z',
            ProcessState::Stopped => 'T',
            ProcessState::TracingStop => 't',
            ProcessState::Dead => 'X',
            ProcessState::Unknown => '?',
        }
    }
}

impl fmt::Display for ProcessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProcessState::Running => "running",
            ProcessState::Sleeping => "sleeping",
            ProcessState::DiskSleep => "disk-wait",
            ProcessState::Zombie => "zombie",
            ProcessState::Stopped => "stopped",
            ProcessState::TracingStop => "tracing-stop",
            ProcessState::Dead => "dead",
            ProcessState::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// One process as seen by a single inventory pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessRecord {
    pub pid: u32,
    pub name: String,
    pub state: ProcessState,
    /// Virtual memory size in bytes
    pub vsize: u64,
    /// Resident set size in pages
    pub rss: u64,
    /// User-mode time in clock ticks
    pub utime: u64,
    /// Kernel-mode time in clock ticks
    pub stime: u64,
}

impl ProcessRecord {
    pub fn cpu_ticks(&self) -> u64 {
        self.utime.saturating_add(self.stime)
    }

    pub fn is_degraded(&self) -> bool {
        self.state == ProcessState::Unknown
            && self.vsize == 0
            && self.rss == 0
            && self.utime == 0
            && self.stime == 0
    }
}

/// A process record with the rates computed for it in one pass
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessUsage {
    pub record: ProcessRecord,
    pub cpu_percent: f64,
    pub memory_percent: f64,
}

/// Process totals per state, as summarised by `top`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessStateCounts {
    pub running: usize,
    pub sleeping: usize,
    pub disk_sleep: usize,
    pub zombie: usize,
    pub stopped: usize,
    pub tracing_stop: usize,
    pub dead: usize,
    pub unknown: usize,
}

impl ProcessStateCounts {
    pub fn get(&self, state: ProcessState) -> usize {
        match state {
            ProcessState::Running => self.running,
            ProcessState::Sleeping => self.sleeping,
            ProcessState::DiskSleep => self.disk_sleep,
            ProcessState::Zombie => self.zombie,
            ProcessState::Stopped => self.stopped,
            ProcessState::TracingStop => self.tracing_stop,
            ProcessState::Dead => self.dead,
            ProcessState::Unknown => self.unknown,
        }
    }

    pub fn increment(&mut self, state: ProcessState) {
        let slot = match state {
            ProcessState::Running => &mut self.running,
            ProcessState::Sleeping => &mut self.sleeping,
            ProcessState::DiskSleep => &mut self.disk_sleep,
            ProcessState::Zombie => &mut self.zombie,
            ProcessState::Stopped => &mut self.stopped,
            ProcessState::TracingStop => &mut self.tracing_stop,
            ProcessState::Dead => &mut self.dead,
            ProcessState::Unknown => &mut self.unknown,
        };
        *slot += 1;
    }

    /// Total tasks with a known state
    pub fn total(&self) -> usize {
        ProcessState::ALL
            .iter()
            .filter(|s| **s != ProcessState::Unknown)
            .map(|s| self.get(*s))
            .sum()
    }

    /// `top` folds disk-wait into sleeping and tracing-stop into stopped
    pub fn top_style_sleeping(&self) -> usize {
        self.sleeping + self.disk_sleep
    }

    pub fn top_style_stopped(&self) -> usize {
        self.stopped + self.tracing_stop
    }
}

/// Physical memory and swap, all in bytes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemorySnapshot {
    pub total_bytes: u64,
    pub free_bytes: u64,
    pub available_bytes: u64,
    pub used_bytes: u64,
    pub swap_total_bytes: u64,
    pub swap_free_bytes: u64,
    pub swap_used_bytes: u64,
}

impl MemorySnapshot {
    pub fn usage_percent(&self) -> f64 {
        percent_of(self.used_bytes, self.total_bytes)
    }

    pub fn swap_percent(&self) -> f64 {
        percent_of(self.swap_used_bytes, self.swap_total_bytes)
    }
}

/// Root filesystem usage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiskSnapshot {
    pub device: String,
    pub mount_point: String,
    pub total_bytes: u64,
    /// Free bytes including blocks reserved for the superuser
    pub free_bytes: u64,
    /// Free bytes usable by unprivileged users
    pub available_bytes: u64,
    pub used_bytes: u64,
}

impl Default for DiskSnapshot {
    fn default() -> Self {
        Self {
            device: UNKNOWN_DEVICE.to_string(),
            mount_point: "/".to_string(),
            total_bytes: 0,
            free_bytes: 0,
            available_bytes: 0,
            used_bytes: 0,
        }
    }
}

pub const UNKNOWN_DEVICE: &str = "Unknown";

impl DiskSnapshot {
    pub fn usage_percent(&self) -> f64 {
        percent_of(self.used_bytes, self.total_bytes)
    }
}

/// Receive-side counters of one interface, in `/proc/net/dev` column order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RxCounters {
    pub bytes: u64,
    pub packets: u64,
    pub errs: u64,
    pub drop: u64,
    pub fifo: u64,
    pub frame: u64,
    pub compressed: u64,
    pub multicast: u64,
}

/// Transmit-side counters of one interface, in `/proc/net/dev` column order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxCounters {
    pub bytes: u64,
    pub packets: u64,
    pub errs: u64,
    pub drop: u64,
    pub fifo: u64,
    pub colls: u64,
    pub carrier: u64,
    pub compressed: u64,
}

/// Cumulative counters for one network interface
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkInterfaceSample {
    pub name: String,
    pub ipv4: Option<String>,
    pub rx: RxCounters,
    pub tx: TxCounters,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThermalReading {
    pub label: String,
    pub celsius: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FanReading {
    pub label: String,
    pub rpm: u64,
}

pub(crate) fn percent_of(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}
