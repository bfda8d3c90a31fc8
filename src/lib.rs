// hostmon Library - Public API

// Re-export error types
pub mod error;
pub use error::{HostmonError, Result};

// Module declarations
pub mod commands;
pub mod core;
pub mod ui;

// Re-export commonly used types
pub use core::config::Config;
pub use core::system_monitor::{MetricsCollector, SystemMetrics};

// Initialize logging
pub fn init_logging() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
