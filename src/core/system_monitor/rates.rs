//! Turning cumulative counters into instantaneous percentages.
//!
//! State lives in explicit objects owned by the caller. Every rate follows
//! the same contract: the first observation of an entity seeds the state and
//! yields 0, later observations yield the rate over the elapsed interval.
//! Results are always finite and within `[0, 100]`.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use super::metrics::{percent_of, CpuTimes, MemorySnapshot, ProcessRecord, Sampled};
use super::source::{clock_ticks_per_second, page_size};

fn clamp_percent(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// System-wide busy percentage between two aggregate samples.
///
/// Returns 0 when no time elapsed or the counters went backwards.
pub fn cpu_usage_between(previous: &CpuTimes, current: &CpuTimes) -> f64 {
    let total_delta = current.total_ticks() as i128 - previous.total_ticks() as i128;
    let idle_delta = current.idle_ticks() as i128 - previous.idle_ticks() as i128;
    if total_delta <= 0 {
        return 0.0;
    }
    clamp_percent((total_delta - idle_delta) as f64 / total_delta as f64 * 100.0)
}

/// Previous aggregate CPU sample for the whole machine
#[derive(Debug, Clone, Default)]
pub struct CpuUsageState {
    previous: Option<CpuTimes>,
}

impl CpuUsageState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_seeded(&self) -> bool {
        self.previous.is_some()
    }

    /// Feed a new sample and get usage since the previous one.
    ///
    /// Unavailable samples are ignored and leave the stored sample in place.
    pub fn update(&mut self, sample: &Sampled<CpuTimes>) -> f64 {
        if !sample.available {
            return 0.0;
        }
        match self.previous.replace(sample.value) {
            Some(previous) => cpu_usage_between(&previous, &sample.value),
            None => 0.0,
        }
    }

    pub fn reset(&mut self) {
        self.previous = None;
    }
}

/// Tunables for per-process CPU rates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProcessCpuConfig {
    /// Samples closer together than this return the cached percentage
    pub min_interval_secs: f64,
    pub clock_ticks_per_sec: u64,
}

impl ProcessCpuConfig {
    pub const DEFAULT_MIN_INTERVAL_SECS: f64 = 2.5;
}

impl Default for ProcessCpuConfig {
    fn default() -> Self {
        Self {
            min_interval_secs: Self::DEFAULT_MIN_INTERVAL_SECS,
            clock_ticks_per_sec: clock_ticks_per_second(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ProcessCpuEntry {
    ticks: u64,
    uptime_secs: f64,
    percent: f64,
}

/// Previous CPU time per pid.
///
/// Percentages are single-core equivalents: 100 means one core fully busy,
/// and multi-threaded processes are clamped at 100.
#[derive(Debug, Clone, Default)]
pub struct ProcessCpuTracker {
    config: ProcessCpuConfig,
    entries: HashMap<u32, ProcessCpuEntry>,
}

impl ProcessCpuTracker {
    pub fn new() -> Self {
        Self::with_config(ProcessCpuConfig::default())
    }

    pub fn with_config(config: ProcessCpuConfig) -> Self {
        Self {
            config,
            entries: HashMap::new(),
        }
    }

    pub fn config(&self) -> &ProcessCpuConfig {
        &self.config
    }

    /// CPU percentage of `record` given the system uptime at sampling time.
    pub fn update(&mut self, record: &ProcessRecord, uptime_secs: f64) -> f64 {
        let ticks = record.cpu_ticks();
        let seed = ProcessCpuEntry {
            ticks,
            uptime_secs,
            percent: 0.0,
        };

        let Some(entry) = self.entries.get_mut(&record.pid) else {
            self.entries.insert(record.pid, seed);
            return 0.0;
        };

        // A smaller tick count means the pid was reused by a new process.
        if ticks < entry.ticks {
            *entry = seed;
            return 0.0;
        }

        let elapsed = uptime_secs - entry.uptime_secs;
        if elapsed.is_nan() || elapsed < self.config.min_interval_secs {
            return entry.percent;
        }

        let ticks_per_sec = self.config.clock_ticks_per_sec.max(1) as f64;
        let busy_secs = (ticks - entry.ticks) as f64 / ticks_per_sec;
        let percent = clamp_percent(busy_secs / elapsed * 100.0);
        *entry = ProcessCpuEntry {
            ticks,
            uptime_secs,
            percent,
        };
        percent
    }

    /// Last computed percentage for a pid, if it has been observed
    pub fn cached(&self, pid: u32) -> Option<f64> {
        self.entries.get(&pid).map(|e| e.percent)
    }

    /// Drop state for every pid not in `live`. Returns how many were evicted.
    pub fn prune<I: IntoIterator<Item = u32>>(&mut self, live: I) -> usize {
        let live: HashSet<u32> = live.into_iter().collect();
        let before = self.entries.len();
        self.entries.retain(|pid, _| live.contains(pid));
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Share of physical memory resident for one process
pub fn process_memory_percent(record: &ProcessRecord, memory: &MemorySnapshot) -> f64 {
    process_memory_percent_with_page_size(record, memory, page_size())
}

pub fn process_memory_percent_with_page_size(
    record: &ProcessRecord,
    memory: &MemorySnapshot,
    page_size: u64,
) -> f64 {
    clamp_percent(percent_of(
        record.rss.saturating_mul(page_size),
        memory.total_bytes,
    ))
}
