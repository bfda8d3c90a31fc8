//! Per-process `stat` and `comm` files.

use log::debug;

use crate::core::system_monitor::metrics::{ProcessRecord, ProcessState};
use crate::core::system_monitor::source::{read_first_line, read_source, ProcFs};
use crate::error::Result;

/// Minimum number of fields (1-indexed, whole line) a usable stat line has
pub const MIN_STAT_FIELDS: usize = 24;

// Positions are 1-indexed over the whole line; the state is field 3, the
// first field after the parenthesised name.
const FIELD_STATE: usize = 3;
const FIELD_UTIME: usize = 14;
const FIELD_STIME: usize = 15;
const FIELD_VSIZE: usize = 23;
const FIELD_RSS: usize = 24;

fn after_name(field: usize) -> usize {
    field - FIELD_STATE
}

/// Record used when a stat line cannot be interpreted
pub fn degraded_record(pid: u32, name: String) -> ProcessRecord {
    ProcessRecord {
        pid,
        name,
        ..Default::default()
    }
}

/// Parse one `/proc/<pid>/stat` line.
///
/// The command name may itself contain spaces and parentheses, so the line
/// is split at the last `)`. Anything short or unparsable yields the
/// degraded record rather than an error.
pub fn parse_stat(pid: u32, line: &str) -> ProcessRecord {
    let Some(close) = line.rfind(')') else {
        debug!("pid {}: stat line has no name terminator", pid);
        return degraded_record(pid, String::new());
    };

    let name = line[..close]
        .find('(')
        .map(|open| line[open + 1..close].to_string())
        .unwrap_or_default();

    let rest: Vec<&str> = line[close + 1..].split_whitespace().collect();
    if rest.len() < after_name(MIN_STAT_FIELDS) + 1 {
        debug!("pid {}: stat line has only {} fields", pid, rest.len() + 2);
        return degraded_record(pid, name);
    }

    let state = rest[0]
        .chars()
        .next()
        .map(ProcessState::from_code)
        .unwrap_or_default();

    let field = |n: usize| rest[after_name(n)].parse::<u64>();
    match (
        field(FIELD_UTIME),
        field(FIELD_STIME),
        field(FIELD_VSIZE),
        field(FIELD_RSS),
    ) {
        (Ok(utime), Ok(stime), Ok(vsize), Ok(rss)) => ProcessRecord {
            pid,
            name,
            state,
            vsize,
            rss,
            utime,
            stime,
        },
        _ => {
            debug!("pid {}: non-numeric stat field", pid);
            degraded_record(pid, name)
        }
    }
}

/// Read and parse the stat file of one process.
///
/// Errors only when the file cannot be opened, which normally means the
/// process exited after the directory listing.
pub fn read_stat(fs: &ProcFs, pid: u32) -> Result<ProcessRecord> {
    let content = read_source(&fs.pid_path(pid, "stat"))?;
    Ok(parse_stat(pid, content.lines().next().unwrap_or_default()))
}

pub fn read_comm(fs: &ProcFs, pid: u32) -> Result<String> {
    read_first_line(&fs.pid_path(pid, "comm"))
}

/// Freshly re-read the state of a single process
pub fn read_process_state(fs: &ProcFs, pid: u32) -> ProcessState {
    read_stat(fs, pid)
        .map(|record| record.state)
        .unwrap_or(ProcessState::Unknown)
}
