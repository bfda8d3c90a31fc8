use std::path::PathBuf;

use log::debug;

use super::identity::Identity;
use super::inventory::{build_inventory, count_by_state};
use super::metrics::*;
use super::rates::{process_memory_percent, CpuUsageState, ProcessCpuConfig, ProcessCpuTracker};
use super::readers::{
    read_cpu_times, read_fans, read_interfaces, read_memory, read_root_disk, read_thermal,
    read_uptime,
};
use super::source::ProcFs;

/// Configuration for metrics collection
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    pub proc_root: PathBuf,
    pub sys_root: PathBuf,
    pub process_cpu: ProcessCpuConfig,
    pub max_thermal_zones: usize,
    pub max_hwmon_devices: usize,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            proc_root: PathBuf::from("/proc"),
            sys_root: PathBuf::from("/sys"),
            process_cpu: ProcessCpuConfig::default(),
            max_thermal_zones: 10,
            max_hwmon_devices: 10,
        }
    }
}

/// Pull-based sampler owning the rate state for one polling session.
///
/// Every accessor performs fresh reads. Wrap in a mutex to share across
/// threads; the `&mut self` methods already serialize access to rate state.
pub struct MetricsCollector {
    fs: ProcFs,
    config: CollectorConfig,
    cpu_state: CpuUsageState,
    process_cpu: ProcessCpuTracker,
}

impl MetricsCollector {
    /// Create a new MetricsCollector with default configuration
    pub fn new() -> Self {
        Self::with_config(CollectorConfig::default())
    }

    /// Create a new MetricsCollector with custom configuration
    pub fn with_config(config: CollectorConfig) -> Self {
        Self {
            fs: ProcFs::new(&config.proc_root, &config.sys_root),
            process_cpu: ProcessCpuTracker::with_config(config.process_cpu),
            cpu_state: CpuUsageState::new(),
            config,
        }
    }

    pub fn source(&self) -> &ProcFs {
        &self.fs
    }

    pub fn process_cpu_state(&self) -> &ProcessCpuTracker {
        &self.process_cpu
    }

    /// System-wide CPU busy percentage since the previous call (0 on the first)
    pub fn cpu_usage(&mut self) -> f64 {
        let sample = read_cpu_times(&self.fs);
        self.cpu_state.update(&sample)
    }

    pub fn memory(&self) -> Sampled<MemorySnapshot> {
        read_memory(&self.fs)
    }

    pub fn disk(&self) -> Sampled<DiskSnapshot> {
        read_root_disk(&self.fs)
    }

    pub fn network(&self) -> Sampled<Vec<NetworkInterfaceSample>> {
        read_interfaces(&self.fs)
    }

    pub fn thermal(&self) -> Sampled<Vec<ThermalReading>> {
        read_thermal(&self.fs, self.config.max_thermal_zones)
    }

    pub fn fans(&self) -> Sampled<Vec<FanReading>> {
        read_fans(&self.fs, self.config.max_hwmon_devices)
    }

    pub fn identity(&self) -> Identity {
        Identity::probe(&self.fs)
    }

    /// Enumerate processes and compute CPU and memory shares for each.
    ///
    /// Rate state for pids missing from this pass is evicted afterwards.
    pub fn processes(&mut self) -> Sampled<Vec<ProcessUsage>> {
        let inventory = build_inventory(&self.fs);
        if !inventory.available {
            return Sampled::unavailable();
        }

        let uptime = read_uptime(&self.fs);
        let memory = read_memory(&self.fs).into_value();

        let usages: Vec<ProcessUsage> = inventory
            .into_value()
            .into_iter()
            .map(|record| {
                // A degraded record has zeroed counters; feeding it would reseed the entry.
                let cpu_percent = if !uptime.available {
                    0.0
                } else if record.is_degraded() {
                    self.process_cpu.cached(record.pid).unwrap_or(0.0)
                } else {
                    self.process_cpu.update(&record, uptime.value)
                };
                let memory_percent = process_memory_percent(&record, &memory);
                ProcessUsage {
                    record,
                    cpu_percent,
                    memory_percent,
                }
            })
            .collect();

        let evicted = self
            .process_cpu
            .prune(usages.iter().map(|usage| usage.record.pid));
        if evicted > 0 {
            debug!("Evicted CPU state for {} exited processes", evicted);
        }

        Sampled::available(usages)
    }

    /// Collect every metric family into one snapshot
    pub fn collect(&mut self) -> SystemMetrics {
        let processes = self.processes().into_value();
        let process_counts = count_by_state(processes.iter().map(|usage| &usage.record));

        SystemMetrics {
            timestamp: chrono::Utc::now().timestamp(),
            cpu_usage_percent: self.cpu_usage(),
            memory: self.memory().into_value(),
            disk: self.disk().into_value(),
            processes,
            process_counts,
            network: self.network().into_value(),
            thermal: self.thermal().into_value(),
            fans: self.fans().into_value(),
        }
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

/// Highest CPU consumers first, ties broken by memory share
pub fn top_processes(processes: &[ProcessUsage], count: usize) -> Vec<ProcessUsage> {
    let mut sorted = processes.to_vec();
    sorted.sort_by(|a, b| {
        b.cpu_percent
            .partial_cmp(&a.cpu_percent)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(
                b.memory_percent
                    .partial_cmp(&a.memory_percent)
                    .unwrap_or(std::cmp::Ordering::Equal),
            )
    });
    sorted.truncate(count);
    sorted
}
