use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{debug, info};

use super::input::InputSource;
use super::metrics::{MetricsAccumulator, MetricsHandle};
use super::world::{KitchenWorld, Scene, SceneCommand};

#[derive(Debug, Clone)]
pub struct LoopConfig {
    pub target_tps: u32,
    /// Stop after this many ticks; `None` runs until the scene quits.
    pub max_ticks: Option<u64>,
    pub metrics_log_interval: Duration,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            target_tps: 60,
            max_ticks: None,
            metrics_log_interval: Duration::from_secs(1),
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("target_tps must be non-zero")]
    ZeroTickRate,
}

/// Fixed-tick headless loop: one input snapshot, one scene update, and one
/// deferred-spawn flush per tick, in that order. Returns the tick count.
pub fn run_headless(
    config: LoopConfig,
    scene: &mut dyn Scene,
    world: &mut KitchenWorld,
    input_source: &mut dyn InputSource,
    metrics_handle: &MetricsHandle,
) -> Result<u64, AppError> {
    if config.target_tps == 0 {
        return Err(AppError::ZeroTickRate);
    }
    let fixed_dt_seconds = 1.0 / config.target_tps as f32;

    scene.load(world);
    world.apply_pending();

    let mut accumulator = MetricsAccumulator::new(config.metrics_log_interval);
    let mut ticks_run = 0u64;
    loop {
        if config.max_ticks.is_some_and(|limit| ticks_run >= limit) {
            break;
        }

        let tick_start = Instant::now();
        let snapshot = input_source.next_snapshot();
        if snapshot.quit_requested() {
            info!(ticks_run, "quit_requested");
            break;
        }

        let command = scene.update(fixed_dt_seconds, &snapshot, world);
        world.apply_pending();
        ticks_run += 1;

        accumulator.record_tick(tick_start.elapsed());
        accumulator.publish_if_due(metrics_handle);

        match command {
            SceneCommand::None => {}
            SceneCommand::Quit => {
                debug!(ticks_run, "scene_requested_quit");
                break;
            }
        }
    }
    accumulator.publish_final(metrics_handle);

    if let Some(title) = scene.debug_title(world) {
        info!(title = %title, "run_finished");
    }
    scene.unload(world);
    world.apply_pending();

    Ok(ticks_run)
}
