use chrono::{DateTime, Local, TimeZone};

/// Format a byte count in human-readable format (B, KB, MB, GB, TB)
pub fn format_size(size: u64) -> String {
    const KB: f64 = 1024.0;
    let size_f = size as f64;
    if size < 1024 {
        format!("{}B", size)
    } else if size_f < KB * KB {
        format!("{:.1}KB", size_f / KB)
    } else if size_f < KB * KB * KB {
        format!("{:.1}MB", size_f / (KB * KB))
    } else if size_f < KB * KB * KB * KB {
        format!("{:.1}GB", size_f / (KB * KB * KB))
    } else {
        format!("{:.1}TB", size_f / (KB * KB * KB * KB))
    }
}

/// Format a percentage with one decimal
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Format a unix timestamp in local time (YYYY-MM-DD HH:MM:SS)
pub fn format_timestamp(timestamp: i64) -> String {
    match Local.timestamp_opt(timestamp, 0).single() {
        Some(datetime) => {
            let datetime: DateTime<Local> = datetime;
            datetime.format("%Y-%m-%d %H:%M:%S").to_string()
        }
        None => timestamp.to_string(),
    }
}
