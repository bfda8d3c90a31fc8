//! Periodic JSON stream driven by the per-family sampling schedule.

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::info;
use serde::Serialize;
use std::collections::HashMap;
use std::thread;
use std::time::Instant;

use crate::core::system_monitor::{
    count_by_state, top_processes, Identity, MetricFamily, MetricsCollector, SamplingSchedule,
    SystemMetrics,
};
use crate::core::Config;

/// One emitted line: identity facts plus the latest value of every family
#[derive(Debug, Serialize)]
struct Frame<'a> {
    identity: &'a Identity,
    #[serde(flatten)]
    metrics: &'a SystemMetrics,
}

/// Refreshes only the families whose interval has elapsed and keeps the
/// last value of the others.
pub struct ScheduledSampler {
    schedule: SamplingSchedule,
    last: HashMap<MetricFamily, Instant>,
    metrics: SystemMetrics,
    identity: Option<Identity>,
}

impl ScheduledSampler {
    pub fn new(schedule: SamplingSchedule) -> Self {
        Self {
            schedule,
            last: HashMap::new(),
            metrics: SystemMetrics::default(),
            identity: None,
        }
    }

    pub fn due(&self, now: Instant) -> Vec<MetricFamily> {
        MetricFamily::ALL
            .iter()
            .copied()
            .filter(|family| {
                self.schedule
                    .is_due(*family, self.last.get(family).copied(), now)
            })
            .collect()
    }

    pub fn poll(&mut self, collector: &mut MetricsCollector, now: Instant) -> &SystemMetrics {
        for family in self.due(now) {
            match family {
                MetricFamily::Identity => self.identity = Some(collector.identity()),
                MetricFamily::Cpu => self.metrics.cpu_usage_percent = collector.cpu_usage(),
                MetricFamily::Memory => self.metrics.memory = collector.memory().into_value(),
                MetricFamily::Disk => self.metrics.disk = collector.disk().into_value(),
                MetricFamily::Processes => {
                    self.metrics.processes = collector.processes().into_value();
                    self.metrics.process_counts =
                        count_by_state(self.metrics.processes.iter().map(|u| &u.record));
                }
                MetricFamily::Network => self.metrics.network = collector.network().into_value(),
                MetricFamily::Thermal => self.metrics.thermal = collector.thermal().into_value(),
                MetricFamily::Fans => self.metrics.fans = collector.fans().into_value(),
            }
            self.last.insert(family, now);
        }
        self.metrics.timestamp = chrono::Utc::now().timestamp();
        &self.metrics
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }
}

pub fn execute(matches: &ArgMatches) -> Result<()> {
    let mut config = Config::load()?;
    if let Some(interval) = matches.get_one::<u64>("interval") {
        config.set_sample_interval_ms(*interval);
    }
    let count = matches.get_one::<usize>("count").copied();
    let top = matches
        .get_one::<usize>("top")
        .copied()
        .unwrap_or(config.top_processes);

    let schedule = config.schedule();
    let tick = schedule.tick();
    info!("Sampling every {:?}", tick);

    let mut collector = MetricsCollector::with_config(config.collector_config());
    let mut sampler = ScheduledSampler::new(schedule);
    let mut emitted = 0usize;

    loop {
        let mut metrics = sampler.poll(&mut collector, Instant::now()).clone();
        metrics.processes = top_processes(&metrics.processes, top);
        let identity = sampler
            .identity()
            .context("Identity facts were not sampled")?;

        let frame = Frame {
            identity,
            metrics: &metrics,
        };
        println!("{}", serde_json::to_string(&frame)?);

        emitted += 1;
        if count.is_some_and(|limit| emitted >= limit) {
            break;
        }
        thread::sleep(tick);
    }

    Ok(())
}
