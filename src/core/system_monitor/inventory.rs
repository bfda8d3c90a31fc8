//! Enumeration of live processes.

use log::debug;
use std::fs;

use super::metrics::{ProcessRecord, ProcessStateCounts, Sampled};
use super::readers::process::{read_comm, read_stat};
use super::source::ProcFs;

/// Pids of every numeric entry under the proc root, in directory order
pub fn list_pids(fs: &ProcFs) -> Sampled<Vec<u32>> {
    let entries = match fs::read_dir(fs.proc_root()) {
        Ok(entries) => entries,
        Err(e) => {
            debug!("Cannot list {:?}: {}", fs.proc_root(), e);
            return Sampled::unavailable();
        }
    };

    let pids = entries
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| {
            let name = entry.file_name();
            let name = name.to_str()?;
            if name.is_empty() || !name.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            name.parse().ok()
        })
        .collect();

    Sampled::available(pids)
}

/// Build one record for a pid, or `None` if the process is already gone.
pub fn read_process(fs: &ProcFs, pid: u32) -> Option<ProcessRecord> {
    let mut record = match read_stat(fs, pid) {
        Ok(record) => record,
        Err(e) => {
            debug!("Skipping pid {}: {}", pid, e);
            return None;
        }
    };

    // comm is authoritative; the stat name is kept if comm vanished meanwhile
    if let Ok(name) = read_comm(fs, pid) {
        record.name = name;
    }
    Some(record)
}

/// Full process list for one pass. No ordering is guaranteed.
pub fn build_inventory(fs: &ProcFs) -> Sampled<Vec<ProcessRecord>> {
    let pids = list_pids(fs);
    let available = pids.available;
    let records = pids
        .into_value()
        .into_iter()
        .filter_map(|pid| read_process(fs, pid))
        .collect();

    Sampled {
        value: records,
        available,
    }
}

pub fn count_by_state<'a, I>(records: I) -> ProcessStateCounts
where
    I: IntoIterator<Item = &'a ProcessRecord>,
{
    let mut counts = ProcessStateCounts::default();
    for record in records {
        counts.increment(record.state);
    }
    counts
}
