//! One-shot snapshot of every metric family.

use anyhow::Result;
use clap::ArgMatches;
use colored::Colorize;
use std::thread;

use crate::core::system_monitor::{top_processes, MetricsCollector, SystemMetrics};
use crate::core::Config;
use crate::ui::{format_percent, format_size, format_timestamp};

pub fn execute(matches: &ArgMatches) -> Result<()> {
    let config = Config::load()?;
    let top = matches
        .get_one::<usize>("top")
        .copied()
        .unwrap_or(config.top_processes);

    let mut collector = MetricsCollector::with_config(config.collector_config());

    // Rates need two observations: seed, wait out the per-process minimum, collect again.
    collector.collect();
    thread::sleep(config.settle_interval());
    let mut metrics = collector.collect();
    metrics.processes = top_processes(&metrics.processes, top);

    if matches.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&metrics)?);
    } else {
        print_metrics(&metrics);
    }

    Ok(())
}

pub fn print_metrics(metrics: &SystemMetrics) {
    println!(
        "{} {}",
        "Snapshot".cyan().bold(),
        format_timestamp(metrics.timestamp).dimmed()
    );

    println!(
        "  {:<8} {}",
        "CPU:".white(),
        format_percent(metrics.cpu_usage_percent).green()
    );

    let mem = &metrics.memory;
    println!(
        "  {:<8} {} / {} ({})",
        "Memory:".white(),
        format_size(mem.used_bytes),
        format_size(mem.total_bytes),
        format_percent(mem.usage_percent())
    );
    println!(
        "  {:<8} {} / {} ({})",
        "Swap:".white(),
        format_size(mem.swap_used_bytes),
        format_size(mem.swap_total_bytes),
        format_percent(mem.swap_percent())
    );

    let disk = &metrics.disk;
    println!(
        "  {:<8} {} / {} ({}) on {}",
        "Disk:".white(),
        format_size(disk.used_bytes),
        format_size(disk.total_bytes),
        format_percent(disk.usage_percent()),
        disk.device
    );

    let counts = &metrics.process_counts;
    println!(
        "  {:<8} {} total, {} running, {} sleeping, {} stopped, {} zombie",
        "Tasks:".white(),
        counts.total(),
        counts.running,
        counts.top_style_sleeping(),
        counts.top_style_stopped(),
        counts.zombie
    );

    if !metrics.processes.is_empty() {
        println!();
        println!(
            "  {}",
            format!("{:>7} {:<16} {:>2} {:>7} {:>7}", "PID", "NAME", "S", "CPU%", "MEM%").bold()
        );
        for usage in &metrics.processes {
            println!(
                "  {:>7} {:<16} {:>2} {:>7.1} {:>7.1}",
                usage.record.pid,
                usage.record.name,
                usage.record.state.code(),
                usage.cpu_percent,
                usage.memory_percent
            );
        }
    }

    if !metrics.network.is_empty() {
        println!();
        println!("{}", "Network".cyan().bold());
        for iface in &metrics.network {
            println!(
                "  {:<12} {:<16} rx {:>10} tx {:>10}",
                iface.name,
                iface.ipv4.as_deref().unwrap_or("-"),
                format_size(iface.rx.bytes),
                format_size(iface.tx.bytes)
            );
        }
    }

    if !metrics.thermal.is_empty() {
        println!();
        println!("{}", "Thermal".cyan().bold());
        for reading in &metrics.thermal {
            println!("  {:<20} {:.1}°C", reading.label, reading.celsius);
        }
    }

    if !metrics.fans.is_empty() {
        println!();
        println!("{}", "Fans".cyan().bold());
        for fan in &metrics.fans {
            println!("  {:<20} {} RPM", fan.label, fan.rpm);
        }
    }
}
