// Command handlers module
pub mod config;
pub mod info;
pub mod snapshot;
pub mod watch;

// Re-exports for cleaner imports
pub use info::execute as info;
pub use snapshot::execute as snapshot;
pub use watch::execute as watch;
