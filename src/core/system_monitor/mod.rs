//! System monitoring core functionality.
//!
//! This module samples host metrics from the kernel's text interfaces and
//! turns cumulative counters into instantaneous rates. It is pull-based:
//! callers invoke the accessors on their own schedule and own all rate state.

mod collector;
pub mod identity;
pub mod inventory;
mod metrics;
pub mod rates;
pub mod readers;
pub mod schedule;
pub mod source;

pub use collector::{top_processes, CollectorConfig, MetricsCollector};
pub use identity::{Identity, OsFamily};
pub use inventory::{build_inventory, count_by_state};
pub use metrics::{
    CpuTimes, DiskSnapshot, FanReading, MemorySnapshot, NetworkInterfaceSample, ProcessRecord,
    ProcessState, ProcessStateCounts, ProcessUsage, RxCounters, Sampled, SystemMetrics,
    ThermalReading, TxCounters, UNKNOWN_DEVICE,
};
pub use rates::{CpuUsageState, ProcessCpuConfig, ProcessCpuTracker};
pub use schedule::{MetricFamily, SamplingSchedule};
pub use source::ProcFs;
