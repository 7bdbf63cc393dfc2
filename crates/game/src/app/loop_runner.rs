use std::process::ExitCode;

use engine::run_app;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::error;

use super::bootstrap::AppWiring;
use super::gameplay::{SceneVisuals, StarfieldScene};

pub(crate) fn run(app: AppWiring) -> ExitCode {
    let AppWiring {
        config,
        settings,
        seed,
    } = app;

    let result = run_app(config, move |loader| {
        let visuals = SceneVisuals::load(loader)?;
        Ok(StarfieldScene::new(
            visuals,
            settings,
            StdRng::seed_from_u64(seed),
        ))
    });
    if let Err(err) = result {
        error!(error = %err, "startup_failed");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
