use std::fs;
use std::time::Duration;

use hostmon::core::system_monitor::MetricFamily;
use hostmon::Config;
use tempfile::TempDir;

#[test]
fn test_round_trip_through_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.json");

    let mut config = Config::default();
    config.set_sample_interval_ms(3000);
    config.min_process_cpu_interval_secs = 4.0;
    config.save_to(&path).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_empty_file_gives_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, b"").unwrap();

    assert_eq!(Config::load_from(&path).unwrap(), Config::default());
}

#[test]
fn test_collector_config_follows_settings() {
    let config = Config {
        proc_root: "/tmp/proc".into(),
        min_process_cpu_interval_secs: 5.0,
        max_thermal_zones: 3,
        ..Default::default()
    };

    let collector = config.collector_config();
    assert_eq!(collector.proc_root, std::path::PathBuf::from("/tmp/proc"));
    assert_eq!(collector.process_cpu.min_interval_secs, 5.0);
    assert_eq!(collector.max_thermal_zones, 3);
}

#[test]
fn test_schedule_scales_from_base_interval() {
    let mut config = Config::default();
    config.set_sample_interval_ms(2000);

    let schedule = config.schedule();
    assert_eq!(schedule.interval(MetricFamily::Cpu), Duration::from_secs(2));
    assert_eq!(schedule.interval(MetricFamily::Disk), Duration::from_secs(10));
    assert_eq!(schedule.interval(MetricFamily::Thermal), Duration::from_secs(6));
    assert_eq!(
        schedule.interval(MetricFamily::Identity),
        Duration::from_secs(config.identity_interval_secs)
    );
}
