use std::path::PathBuf;
use std::time::Duration;

use engine::{builtin_def_set, DefDatabase, LoopConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use super::demo::DemoInputSource;
use super::kitchen::{self, KitchenScene, KITCHEN_SAVE_FILE};

const TICKS_ENV_VAR: &str = "KITCHEN_TICKS";
const TICK_RATE_ENV_VAR: &str = "KITCHEN_TICK_RATE";

const DEFAULT_MAX_TICKS: u64 = 600;
const DEFAULT_TICK_RATE: u32 = 60;

pub(crate) struct AppWiring {
    pub(crate) config: LoopConfig,
    pub(crate) scene: KitchenScene,
    pub(crate) input_source: DemoInputSource,
}

pub(crate) fn build_app() -> AppWiring {
    init_tracing();
    info!("=== Kitchen Sim Startup ===");

    let (def_database, save_path) = resolve_content();
    let scene = kitchen::build_scene(def_database, save_path);
    let config = LoopConfig {
        target_tps: parse_env_u32(TICK_RATE_ENV_VAR).unwrap_or(DEFAULT_TICK_RATE),
        max_ticks: Some(parse_env_u64(TICKS_ENV_VAR).unwrap_or(DEFAULT_MAX_TICKS)),
        metrics_log_interval: Duration::from_secs(1),
    };

    AppWiring {
        config,
        scene,
        input_source: DemoInputSource::default(),
    }
}

fn resolve_content() -> (DefDatabase, Option<PathBuf>) {
    match engine::resolve_app_paths() {
        Ok(paths) => {
            let save_path = paths.saves_dir.join(KITCHEN_SAVE_FILE);
            match engine::load_def_database(&paths.assets_dir) {
                Ok(database) => (database, Some(save_path)),
                Err(error) => {
                    warn!(error = %error, "def_load_failed_using_builtin");
                    (builtin_database(), Some(save_path))
                }
            }
        }
        Err(error) => {
            warn!(error = %error, "app_paths_unresolved_running_without_saves");
            (builtin_database(), None)
        }
    }
}

fn builtin_database() -> DefDatabase {
    // The builtin set is validated by engine tests; a failure here means the
    // compiled-in defs themselves are broken.
    DefDatabase::from_defs(builtin_def_set()).unwrap_or_else(|error| panic!("{error}"))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}

fn parse_env_u32(var: &str) -> Option<u32> {
    std::env::var(var).ok().and_then(|raw| raw.trim().parse().ok())
}

fn parse_env_u64(var: &str) -> Option<u64> {
    std::env::var(var).ok().and_then(|raw| raw.trim().parse().ok())
}
