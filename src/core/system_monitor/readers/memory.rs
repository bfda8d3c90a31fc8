use log::debug;

use crate::core::system_monitor::metrics::{MemorySnapshot, Sampled};
use crate::core::system_monitor::source::{read_source, ProcFs};

/// Raw `/proc/meminfo` counters of interest, in kB
#[derive(Debug, Default, Clone, Copy)]
struct MemInfoKb {
    total: u64,
    free: u64,
    available: Option<u64>,
    buffers: u64,
    cached: u64,
    reclaimable: u64,
    swap_total: u64,
    swap_free: u64,
}

/// Parse `/proc/meminfo` into a byte-based snapshot.
///
/// When `MemAvailable` is present used memory is `total - available`.
/// Older kernels without it fall back to subtracting free, buffers, page
/// cache and reclaimable slab from the total.
pub fn parse_meminfo(content: &str) -> MemorySnapshot {
    let mut kb = MemInfoKb::default();

    for line in content.lines() {
        let Some((key, rest)) = line.split_once(':') else {
            continue;
        };
        let Some(value) = rest.split_whitespace().next().and_then(|v| v.parse().ok()) else {
            continue;
        };
        match key.trim() {
            "MemTotal" => kb.total = value,
            "MemFree" => kb.free = value,
            "MemAvailable" => kb.available = Some(value),
            "Buffers" => kb.buffers = value,
            "Cached" => kb.cached = value,
            "SReclaimable" => kb.reclaimable = value,
            "SwapTotal" => kb.swap_total = value,
            "SwapFree" => kb.swap_free = value,
            _ => {}
        }
    }

    let available = kb.available.unwrap_or_else(|| {
        kb.free
            .saturating_add(kb.buffers)
            .saturating_add(kb.cached)
            .saturating_add(kb.reclaimable)
    });

    MemorySnapshot {
        total_bytes: kb.total * 1024,
        free_bytes: kb.free * 1024,
        available_bytes: available * 1024,
        used_bytes: kb.total.saturating_sub(available) * 1024,
        swap_total_bytes: kb.swap_total * 1024,
        swap_free_bytes: kb.swap_free * 1024,
        swap_used_bytes: kb.swap_total.saturating_sub(kb.swap_free) * 1024,
    }
}

pub fn read_memory(fs: &ProcFs) -> Sampled<MemorySnapshot> {
    match read_source(&fs.proc_path("meminfo")) {
        Ok(content) => Sampled::available(parse_meminfo(&content)),
        Err(e) => {
            debug!("{}", e);
            Sampled::unavailable()
        }
    }
}
