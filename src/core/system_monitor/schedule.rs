//! Reference polling cadence per metric family.
//!
//! The engine has no timers of its own. Callers keep the instant each family
//! was last sampled and ask the schedule whether it is due again.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricFamily {
    Identity,
    Cpu,
    Memory,
    Disk,
    Processes,
    Network,
    Thermal,
    Fans,
}

impl MetricFamily {
    pub const ALL: [MetricFamily; 8] = [
        MetricFamily::Identity,
        MetricFamily::Cpu,
        MetricFamily::Memory,
        MetricFamily::Disk,
        MetricFamily::Processes,
        MetricFamily::Network,
        MetricFamily::Thermal,
        MetricFamily::Fans,
    ];
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SamplingSchedule {
    pub identity: Duration,
    pub cpu: Duration,
    pub memory: Duration,
    pub disk: Duration,
    pub processes: Duration,
    pub network: Duration,
    pub thermal: Duration,
    pub fans: Duration,
}

impl Default for SamplingSchedule {
    fn default() -> Self {
        Self {
            identity: Duration::from_secs(60),
            cpu: Duration::from_secs(1),
            memory: Duration::from_secs(1),
            disk: Duration::from_secs(5),
            processes: Duration::from_secs(1),
            network: Duration::from_secs(1),
            thermal: Duration::from_secs(3),
            fans: Duration::from_secs(3),
        }
    }
}

impl SamplingSchedule {
    /// Finest interval allowed for the fast-moving families
    pub const MIN_INTERVAL: Duration = Duration::from_secs(1);

    /// Scale the default cadences to a base interval.
    ///
    /// Fast families use `base`; disk and sensors keep their ratio to the 1 s
    /// default; identity uses its own interval.
    pub fn from_base_interval(base: Duration, identity: Duration) -> Self {
        let base = base.max(Self::MIN_INTERVAL);
        Self {
            identity: identity.max(Self::MIN_INTERVAL),
            cpu: base,
            memory: base,
            disk: base * 5,
            processes: base,
            network: base,
            thermal: base * 3,
            fans: base * 3,
        }
    }

    pub fn interval(&self, family: MetricFamily) -> Duration {
        match family {
            MetricFamily::Identity => self.identity,
            MetricFamily::Cpu => self.cpu,
            MetricFamily::Memory => self.memory,
            MetricFamily::Disk => self.disk,
            MetricFamily::Processes => self.processes,
            MetricFamily::Network => self.network,
            MetricFamily::Thermal => self.thermal,
            MetricFamily::Fans => self.fans,
        }
    }

    /// True when the family was never sampled or its interval has elapsed
    pub fn is_due(&self, family: MetricFamily, last: Option<Instant>, now: Instant) -> bool {
        match last {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.interval(family),
        }
    }

    /// Shortest interval across families, a sensible tick for a caller loop
    pub fn tick(&self) -> Duration {
        MetricFamily::ALL
            .iter()
            .map(|f| self.interval(*f))
            .min()
            .unwrap_or(Self::MIN_INTERVAL)
    }
}
