use std::time::{SystemTime, UNIX_EPOCH};

use engine::LoopConfig;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use super::gameplay::{self, SceneSettings};

const SEED_ENV_VAR: &str = "STARFIELD_SEED";

pub(crate) struct AppWiring {
    pub(crate) config: LoopConfig,
    pub(crate) settings: SceneSettings,
    pub(crate) seed: u64,
}

pub(crate) fn build_app() -> AppWiring {
    init_tracing();
    info!(version = env!("CARGO_PKG_VERSION"), "=== Starfield Startup ===");

    let config = LoopConfig {
        window_title: "Starfield".to_string(),
        window_width: gameplay::WINDOW_WIDTH,
        window_height: gameplay::WINDOW_HEIGHT,
        background_color: gameplay::BACKGROUND_COLOR,
        ..LoopConfig::default()
    };
    let settings = SceneSettings {
        world_size: config.world_size(),
        ..SceneSettings::default()
    };
    let seed = seed_from_env();
    info!(seed, "rng_seeded");

    AppWiring {
        config,
        settings,
        seed,
    }
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

fn seed_from_env() -> u64 {
    let raw = std::env::var(SEED_ENV_VAR).ok();
    match parse_seed(raw.as_deref()) {
        Ok(Some(seed)) => seed,
        Ok(None) => time_seed(),
        Err(value) => {
            warn!(
                env_var = SEED_ENV_VAR,
                value = %value,
                "invalid_seed_ignored"
            );
            time_seed()
        }
    }
}

/// `Ok(None)` when unset or blank, `Err` with the offending text otherwise.
fn parse_seed(raw: Option<&str>) -> Result<Option<u64>, String> {
    let Some(raw) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
        return Ok(None);
    };
    raw.parse::<u64>().map(Some).map_err(|_| raw.to_string())
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}
