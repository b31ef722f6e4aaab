use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use tracing::warn;

static METRICS_LOCK_POISON_WARNED: AtomicBool = AtomicBool::new(false);

fn warn_metrics_lock_poison_once(operation: &'static str) {
    if METRICS_LOCK_POISON_WARNED
        .compare_exchange(false, true, Ordering::Relaxed, Ordering::Relaxed)
        .is_ok()
    {
        warn!(operation, "metrics lock poisoned; recovered inner value");
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TickMetricsSnapshot {
    pub tps: f32,
    pub tick_time_ms: f32,
    pub total_ticks: u64,
}

/// Shared read handle onto the runner's tick metrics. The runner publishes,
/// anything outside the loop reads.
#[derive(Clone, Debug)]
pub struct MetricsHandle {
    snapshot: Arc<RwLock<TickMetricsSnapshot>>,
}

impl Default for MetricsHandle {
    fn default() -> Self {
        Self {
            snapshot: Arc::new(RwLock::new(TickMetricsSnapshot::default())),
        }
    }
}

impl MetricsHandle {
    pub fn snapshot(&self) -> TickMetricsSnapshot {
        match self.snapshot.read() {
            Ok(guard) => *guard,
            Err(poisoned) => {
                warn_metrics_lock_poison_once("read");
                *poisoned.into_inner()
            }
        }
    }

    pub(crate) fn publish(&self, snapshot: TickMetricsSnapshot) {
        match self.snapshot.write() {
            Ok(mut guard) => *guard = snapshot,
            Err(poisoned) => {
                warn_metrics_lock_poison_once("write");
                let mut guard = poisoned.into_inner();
                *guard = snapshot;
            }
        }
    }
}

#[derive(Debug)]
pub(crate) struct MetricsAccumulator {
    interval_start: Instant,
    interval: Duration,
    ticks_in_interval: u32,
    tick_time_sum: Duration,
    total_ticks: u64,
}

impl MetricsAccumulator {
    pub(crate) fn new(interval: Duration) -> Self {
        Self {
            interval_start: Instant::now(),
            interval,
            ticks_in_interval: 0,
            tick_time_sum: Duration::ZERO,
            total_ticks: 0,
        }
    }

    pub(crate) fn record_tick(&mut self, tick_time: Duration) {
        self.ticks_in_interval = self.ticks_in_interval.saturating_add(1);
        self.tick_time_sum += tick_time;
        self.total_ticks = self.total_ticks.saturating_add(1);
    }

    pub(crate) fn publish_if_due(&mut self, handle: &MetricsHandle) {
        let elapsed = self.interval_start.elapsed();
        if elapsed < self.interval || self.ticks_in_interval == 0 {
            return;
        }

        let tps = self.ticks_in_interval as f32 / elapsed.as_secs_f32();
        let tick_time_ms =
            self.tick_time_sum.as_secs_f32() * 1000.0 / self.ticks_in_interval as f32;
        handle.publish(TickMetricsSnapshot {
            tps,
            tick_time_ms,
            total_ticks: self.total_ticks,
        });

        self.interval_start = Instant::now();
        self.ticks_in_interval = 0;
        self.tick_time_sum = Duration::ZERO;
    }

    pub(crate) fn publish_final(&self, handle: &MetricsHandle) {
        let previous = handle.snapshot();
        handle.publish(TickMetricsSnapshot {
            total_ticks: self.total_ticks,
            ..previous
        });
    }
}
