use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::system_monitor::{CollectorConfig, ProcessCpuConfig, SamplingSchedule};

/// Persisted sampler settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Root of the process pseudo-filesystem (normally `/proc`)
    #[serde(default = "default_proc_root")]
    pub proc_root: PathBuf,
    /// Root of the sysfs tree (normally `/sys`)
    #[serde(default = "default_sys_root")]
    pub sys_root: PathBuf,
    /// Per-process CPU samples closer together than this reuse the cached value
    #[serde(default = "default_min_process_interval")]
    pub min_process_cpu_interval_secs: f64,
    #[serde(default = "default_sensor_slots")]
    pub max_thermal_zones: usize,
    #[serde(default = "default_sensor_slots")]
    pub max_hwmon_devices: usize,
    /// Base sampling interval for fast-moving metric families
    #[serde(default = "default_sample_interval_ms")]
    pub sample_interval_ms: u64,
    #[serde(default = "default_identity_interval_secs")]
    pub identity_interval_secs: u64,
    #[serde(default = "default_top_processes")]
    pub top_processes: usize,
}

fn default_proc_root() -> PathBuf {
    PathBuf::from("/proc")
}

fn default_sys_root() -> PathBuf {
    PathBuf::from("/sys")
}

fn default_min_process_interval() -> f64 {
    ProcessCpuConfig::DEFAULT_MIN_INTERVAL_SECS
}

fn default_sensor_slots() -> usize {
    10
}

fn default_sample_interval_ms() -> u64 {
    1000
}

fn default_identity_interval_secs() -> u64 {
    60
}

fn default_top_processes() -> usize {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            proc_root: default_proc_root(),
            sys_root: default_sys_root(),
            min_process_cpu_interval_secs: default_min_process_interval(),
            max_thermal_zones: default_sensor_slots(),
            max_hwmon_devices: default_sensor_slots(),
            sample_interval_ms: default_sample_interval_ms(),
            identity_interval_secs: default_identity_interval_secs(),
            top_processes: default_top_processes(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Load from an explicit path. Missing, empty or unreadable content yields defaults.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Config::default());
        }

        let data = fs::read(config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

        if data.is_empty() {
            return Ok(Config::default());
        }

        Ok(serde_json::from_slice(&data).unwrap_or_else(|e| {
            warn!("Ignoring corrupt config file {:?}: {}", config_path, e);
            Config::default()
        }))
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let data = serde_json::to_vec_pretty(self).with_context(|| "Failed to serialize config")?;

        fs::write(config_path, data)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;

        Ok(())
    }

    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir =
            dirs::config_dir().with_context(|| "Could not determine config directory")?;

        Ok(config_dir.join("hostmon").join("config.json"))
    }

    /// Set the base sampling interval, never finer than the schedule floor
    pub fn set_sample_interval_ms(&mut self, interval_ms: u64) {
        let floor = SamplingSchedule::MIN_INTERVAL.as_millis() as u64;
        self.sample_interval_ms = interval_ms.max(floor);
    }

    pub fn collector_config(&self) -> CollectorConfig {
        CollectorConfig {
            proc_root: self.proc_root.clone(),
            sys_root: self.sys_root.clone(),
            process_cpu: ProcessCpuConfig {
                min_interval_secs: self.min_process_cpu_interval_secs,
                ..ProcessCpuConfig::default()
            },
            max_thermal_zones: self.max_thermal_zones,
            max_hwmon_devices: self.max_hwmon_devices,
        }
    }

    /// Pause between the seeding and the measuring pass of a one-shot snapshot.
    ///
    /// Out-of-range values from a hand-edited file fall back to the default.
    pub fn settle_interval(&self) -> Duration {
        let process = Duration::try_from_secs_f64(self.min_process_cpu_interval_secs)
            .unwrap_or_else(|_| {
                warn!(
                    "Invalid min_process_cpu_interval_secs {}, using default",
                    self.min_process_cpu_interval_secs
                );
                Duration::from_secs_f64(ProcessCpuConfig::DEFAULT_MIN_INTERVAL_SECS)
            });
        process.max(self.schedule().cpu)
    }

    pub fn schedule(&self) -> SamplingSchedule {
        SamplingSchedule::from_base_interval(
            Duration::from_millis(self.sample_interval_ms),
            Duration::from_secs(self.identity_interval_secs),
        )
    }
}
