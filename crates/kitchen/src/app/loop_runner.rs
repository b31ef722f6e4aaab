use std::process::ExitCode;

use engine::{run_headless, KitchenWorld, MetricsHandle};
use tracing::{error, info};

use super::bootstrap::AppWiring;

pub(crate) fn run(mut wiring: AppWiring) -> ExitCode {
    let mut world = KitchenWorld::default();
    let metrics = MetricsHandle::default();

    match run_headless(
        wiring.config,
        &mut wiring.scene,
        &mut world,
        &mut wiring.input_source,
        &metrics,
    ) {
        Ok(ticks) => {
            let snapshot = metrics.snapshot();
            info!(
                ticks,
                total_ticks = snapshot.total_ticks,
                "run_complete"
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, "startup_failed");
            ExitCode::FAILURE
        }
    }
}
