//! Thermal zones and fan tachometers.

use log::debug;

use crate::core::system_monitor::metrics::{FanReading, Sampled, ThermalReading};
use crate::core::system_monitor::source::{read_first_line, read_source, ProcFs};

/// ThinkPad ACPI single-line multi-sensor file, relative to the proc root
const IBM_THERMAL: &str = "acpi/ibm/thermal";
const IBM_MARKER: &str = "temperatures:";

/// Parse the ThinkPad `temperatures:` line. Values are already in °C;
/// zero and negative entries are unpopulated slots.
pub fn parse_ibm_thermal(content: &str) -> Vec<ThermalReading> {
    let Some(line) = content.lines().next() else {
        return Vec::new();
    };
    let Some((_, values)) = line.split_once(IBM_MARKER) else {
        return Vec::new();
    };

    values
        .split_whitespace()
        .map_while(|token| token.parse::<i64>().ok())
        .enumerate()
        .filter(|(_, temp)| *temp > 0)
        .map(|(index, temp)| ThermalReading {
            label: format!("IBM Sensor {}", index),
            celsius: temp as f64,
        })
        .collect()
}

/// Convert a sysfs millidegree reading
pub fn parse_millidegrees(content: &str) -> Option<f64> {
    content
        .trim()
        .parse::<i64>()
        .ok()
        .map(|milli| milli as f64 / 1000.0)
}

fn read_thermal_zones(fs: &ProcFs, max_zones: usize) -> Vec<ThermalReading> {
    (0..max_zones)
        .filter_map(|i| {
            let zone = fs.sys_path(format!("class/thermal/thermal_zone{}", i));
            let temp = read_source(&zone.join("temp")).ok()?;
            let label = read_first_line(&zone.join("type")).ok()?;
            Some(ThermalReading {
                label: label.trim().to_string(),
                celsius: parse_millidegrees(&temp)?,
            })
        })
        .collect()
}

/// Read temperatures, preferring the vendor file over generic thermal zones.
pub fn read_thermal(fs: &ProcFs, max_zones: usize) -> Sampled<Vec<ThermalReading>> {
    if let Ok(content) = read_source(&fs.proc_path(IBM_THERMAL)) {
        let readings = parse_ibm_thermal(&content);
        if !readings.is_empty() {
            return Sampled::available(readings);
        }
        debug!("Vendor thermal file present but reports no sensors");
    }

    let readings = read_thermal_zones(fs, max_zones);
    if readings.is_empty() {
        Sampled::unavailable()
    } else {
        Sampled::available(readings)
    }
}

/// Read `fan1_input` of each hwmon device slot
pub fn read_fans(fs: &ProcFs, max_devices: usize) -> Sampled<Vec<FanReading>> {
    let readings: Vec<FanReading> = (0..max_devices)
        .filter_map(|i| {
            let device = fs.sys_path(format!("class/hwmon/hwmon{}", i));
            let rpm = read_source(&device.join("fan1_input"))
                .ok()?
                .trim()
                .parse::<u64>()
                .ok()?;
            let label = read_first_line(&device.join("fan1_label"))
                .map(|l| l.trim().to_string())
                .ok()
                .filter(|l| !l.is_empty())
                .unwrap_or_else(|| format!("Fan {}", i + 1));
            Some(FanReading { label, rpm })
        })
        .collect();

    if readings.is_empty() {
        Sampled::unavailable()
    } else {
        Sampled::available(readings)
    }
}
