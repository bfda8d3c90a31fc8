//! Stateless readers for kernel-exposed text interfaces.
//!
//! Each reader pairs a pure `parse_*` function with a `read_*` function that
//! resolves the file through [`ProcFs`](super::source::ProcFs) and never fails:
//! absent sources come back as [`Sampled::unavailable`](super::metrics::Sampled).

pub mod cpu;
pub mod disk;
pub mod memory;
pub mod network;
pub mod process;
pub mod sensors;

pub use cpu::{
    parse_cpu_model, parse_cpu_times, parse_uptime, read_cpu_model, read_cpu_times, read_uptime,
};
pub use disk::{parse_root_device, read_root_disk, FsStats};
pub use memory::{parse_meminfo, read_memory};
pub use network::{parse_net_dev, read_interfaces};
pub use process::{parse_stat, read_process_state, read_stat};
pub use sensors::{parse_ibm_thermal, read_fans, read_thermal};
