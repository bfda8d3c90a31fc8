use hostmon::core::system_monitor::source::page_size;
use hostmon::core::system_monitor::{top_processes, MetricsCollector, ProcessState};

use super::fixture::Fixture;

fn cpu_of(collector: &mut MetricsCollector, pid: u32) -> f64 {
    collector
        .processes()
        .value
        .into_iter()
        .find(|usage| usage.record.pid == pid)
        .map(|usage| usage.cpu_percent)
        .unwrap()
}

#[test]
fn test_system_cpu_seeds_then_measures() {
    let fixture = Fixture::new();
    fixture.cpu(100, 900);
    let mut collector = MetricsCollector::with_config(fixture.collector_config());

    assert_eq!(collector.cpu_usage(), 0.0);

    // 50 busy ticks out of 200
    fixture.cpu(150, 1050);
    assert!((collector.cpu_usage() - 25.0).abs() < 1e-9);

    // no progress since the last read
    assert_eq!(collector.cpu_usage(), 0.0);
}

#[test]
fn test_unavailable_cpu_keeps_previous_sample() {
    let fixture = Fixture::new();
    fixture.cpu(0, 100);
    let mut collector = MetricsCollector::with_config(fixture.collector_config());
    collector.cpu_usage();

    std::fs::remove_file(fixture.proc_root().join("stat")).unwrap();
    assert_eq!(collector.cpu_usage(), 0.0);

    fixture.cpu(100, 100);
    assert!((collector.cpu_usage() - 100.0).abs() < 1e-9);
}

#[test]
fn test_process_cpu_over_uptime() {
    let fixture = Fixture::new();
    fixture.uptime(100.0);
    fixture.process(10, "worker", 'R', 100, 0, 10);
    let mut collector = MetricsCollector::with_config(fixture.collector_config());

    assert_eq!(cpu_of(&mut collector, 10), 0.0);

    // 150 ticks at 100 Hz across 3 seconds
    fixture.uptime(103.0);
    fixture.process(10, "worker", 'R', 200, 50, 10);
    assert!((cpu_of(&mut collector, 10) - 50.0).abs() < 1e-9);
}

#[test]
fn test_process_cpu_cached_within_min_interval() {
    let fixture = Fixture::new();
    fixture.uptime(100.0);
    fixture.process(10, "worker", 'R', 0, 0, 10);
    let mut collector = MetricsCollector::with_config(fixture.collector_config());
    cpu_of(&mut collector, 10);

    fixture.uptime(104.0);
    fixture.process(10, "worker", 'R', 100, 0, 10);
    assert!((cpu_of(&mut collector, 10) - 25.0).abs() < 1e-9);

    // one second later the counters moved but the cached value stands
    fixture.uptime(105.0);
    fixture.process(10, "worker", 'R', 200, 0, 10);
    assert!((cpu_of(&mut collector, 10) - 25.0).abs() < 1e-9);
}

#[test]
fn test_process_cpu_is_clamped() {
    let fixture = Fixture::new();
    fixture.uptime(10.0);
    fixture.process(3, "spinner", 'R', 0, 0, 1);
    let mut collector = MetricsCollector::with_config(fixture.collector_config());
    cpu_of(&mut collector, 3);

    // four cores worth of ticks in three seconds
    fixture.uptime(13.0);
    fixture.process(3, "spinner", 'R', 1200, 0, 1);
    assert_eq!(cpu_of(&mut collector, 3), 100.0);
}

#[test]
fn test_reused_pid_reseeds() {
    let fixture = Fixture::new();
    fixture.uptime(50.0);
    fixture.process(20, "old", 'S', 5000, 0, 1);
    let mut collector = MetricsCollector::with_config(fixture.collector_config());
    cpu_of(&mut collector, 20);

    fixture.uptime(60.0);
    fixture.process(20, "new", 'S', 10, 0, 1);
    assert_eq!(cpu_of(&mut collector, 20), 0.0);
}

#[test]
fn test_degraded_read_keeps_rate_state() {
    let fixture = Fixture::new();
    fixture.uptime(100.0);
    fixture.process(10, "idle", 'S', 1000, 0, 1);
    let mut collector = MetricsCollector::with_config(fixture.collector_config());
    assert_eq!(cpu_of(&mut collector, 10), 0.0);

    // truncated stat line mid-pass
    fixture.uptime(103.0);
    fixture.proc_file("10/stat", "10 (idle) S 1 10\n");
    let processes = collector.processes().value;
    assert_eq!(processes.len(), 1);
    assert!(processes[0].record.is_degraded());
    assert_eq!(processes[0].cpu_percent, 0.0);
    assert_eq!(collector.process_cpu_state().len(), 1);

    // 10 ticks over 6 seconds since the seed
    fixture.uptime(106.0);
    fixture.process(10, "idle", 'S', 1010, 0, 1);
    let pct = cpu_of(&mut collector, 10);
    assert!((pct - 10.0 / 6.0).abs() < 1e-9, "got {}", pct);
}

#[test]
fn test_degraded_read_returns_cached_rate() {
    let fixture = Fixture::new();
    fixture.uptime(10.0);
    fixture.process(4, "busy", 'R', 0, 0, 1);
    let mut collector = MetricsCollector::with_config(fixture.collector_config());
    cpu_of(&mut collector, 4);

    fixture.uptime(14.0);
    fixture.process(4, "busy", 'R', 200, 0, 1);
    assert!((cpu_of(&mut collector, 4) - 50.0).abs() < 1e-9);

    fixture.uptime(20.0);
    fixture.proc_file("4/stat", "4 (busy)\n");
    assert!((cpu_of(&mut collector, 4) - 50.0).abs() < 1e-9);
}

#[test]
fn test_exited_processes_are_pruned() {
    let fixture = Fixture::new();
    fixture.uptime(1.0);
    fixture.process(1, "init", 'S', 0, 0, 1);
    fixture.process(2, "short", 'R', 0, 0, 1);
    let mut collector = MetricsCollector::with_config(fixture.collector_config());

    collector.processes();
    assert_eq!(collector.process_cpu_state().len(), 2);

    fixture.remove_process(2);
    let processes = collector.processes();
    assert_eq!(processes.value.len(), 1);
    assert_eq!(collector.process_cpu_state().len(), 1);
    assert!(collector.process_cpu_state().cached(2).is_none());
}

#[test]
fn test_process_memory_share() {
    let fixture = Fixture::new();
    fixture.uptime(1.0);
    let page = page_size();
    // 4 MiB of RAM, process holds a quarter of it
    let total_kb = 4096;
    let pages = total_kb * 1024 / 4 / page;
    fixture.proc_file(
        "meminfo",
        &format!("MemTotal: {} kB\nMemFree: 0 kB\nMemAvailable: 0 kB\n", total_kb),
    );
    fixture.process(5, "hog", 'S', 0, 0, pages);

    let mut collector = MetricsCollector::with_config(fixture.collector_config());
    let processes = collector.processes();
    assert!((processes.value[0].memory_percent - 25.0).abs() < 1e-6);
}

#[test]
fn test_collect_counts_states() {
    let fixture = Fixture::new();
    fixture.uptime(1.0);
    fixture.cpu(0, 0);
    fixture.process(1, "a", 'R', 0, 0, 1);
    fixture.process(2, "b", 'S', 0, 0, 1);
    fixture.process(3, "c", 'I', 0, 0, 1);
    fixture.process(4, "d", 'Z', 0, 0, 1);
    fixture.process(5, "e", 'T', 0, 0, 1);
    fixture.process(6, "f", 't', 0, 0, 1);

    let mut collector = MetricsCollector::with_config(fixture.collector_config());
    let metrics = collector.collect();

    let counts = &metrics.process_counts;
    assert_eq!(counts.total(), 6);
    assert_eq!(counts.get(ProcessState::Running), 1);
    assert_eq!(counts.get(ProcessState::Sleeping), 2);
    assert_eq!(counts.get(ProcessState::Zombie), 1);
    assert_eq!(counts.top_style_stopped(), 2);
    assert_eq!(metrics.cpu_usage_percent, 0.0);
}

#[test]
fn test_top_processes_from_collected() {
    let fixture = Fixture::new();
    fixture.uptime(10.0);
    fixture.process(1, "idle", 'S', 0, 0, 1);
    fixture.process(2, "busy", 'R', 0, 0, 1);
    let mut collector = MetricsCollector::with_config(fixture.collector_config());
    collector.processes();

    fixture.uptime(20.0);
    fixture.process(1, "idle", 'S', 10, 0, 1);
    fixture.process(2, "busy", 'R', 500, 0, 1);
    let processes = collector.processes().value;

    let top = top_processes(&processes, 1);
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].record.name, "busy");
    assert!((top[0].cpu_percent - 50.0).abs() < 1e-9);
}
