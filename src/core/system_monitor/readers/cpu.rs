//! Aggregate CPU counters, uptime and CPU model string.

use log::debug;

use crate::core::system_monitor::metrics::{CpuTimes, Sampled};
use crate::core::system_monitor::source::{read_source, ProcFs};

pub const UNKNOWN_CPU: &str = "Unknown CPU";

/// Parse the aggregate `cpu` line of `/proc/stat`.
///
/// Only the first line is considered. Missing trailing buckets are zero.
/// Returns `None` when the line does not start with the `cpu` marker.
pub fn parse_cpu_times(content: &str) -> Option<CpuTimes> {
    let line = content.lines().next()?;
    let mut tokens = line.split_whitespace();
    if tokens.next()? != "cpu" {
        return None;
    }

    let mut buckets = [0u64; 10];
    for (slot, token) in buckets.iter_mut().zip(tokens) {
        match token.parse() {
            Ok(v) => *slot = v,
            Err(_) => break,
        }
    }

    let [user, nice, system, idle, iowait, irq, softirq, steal, guest, guest_nice] = buckets;
    Some(CpuTimes {
        user,
        nice,
        system,
        idle,
        iowait,
        irq,
        softirq,
        steal,
        guest,
        guest_nice,
    })
}

pub fn read_cpu_times(fs: &ProcFs) -> Sampled<CpuTimes> {
    let path = fs.proc_path("stat");
    match read_source(&path) {
        Ok(content) => match parse_cpu_times(&content) {
            Some(times) => Sampled::available(times),
            None => {
                debug!("No aggregate cpu line in {:?}", path);
                Sampled::unavailable()
            }
        },
        Err(e) => {
            debug!("{}", e);
            Sampled::unavailable()
        }
    }
}

/// Seconds since boot, the first field of `/proc/uptime`
pub fn parse_uptime(content: &str) -> Option<f64> {
    content.split_whitespace().next()?.parse().ok()
}

pub fn read_uptime(fs: &ProcFs) -> Sampled<f64> {
    match read_source(&fs.proc_path("uptime")) {
        Ok(content) => parse_uptime(&content)
            .map(Sampled::available)
            .unwrap_or_else(Sampled::unavailable),
        Err(e) => {
            debug!("{}", e);
            Sampled::unavailable()
        }
    }
}

/// Value of the first `model name` line of `/proc/cpuinfo`
pub fn parse_cpu_model(content: &str) -> Option<String> {
    content
        .lines()
        .find(|line| line.starts_with("model name"))
        .and_then(|line| line.split_once(':'))
        .map(|(_, value)| value.trim_start().to_string())
}

pub fn read_cpu_model(fs: &ProcFs) -> String {
    read_source(&fs.proc_path("cpuinfo"))
        .ok()
        .and_then(|content| parse_cpu_model(&content))
        .unwrap_or_else(|| UNKNOWN_CPU.to_string())
}
