use engine::{LoopConfig, Scene};
use tracing::info;
use tracing_subscriber::EnvFilter;

use super::gameplay::{PlatformerScene, WorldConfig};

pub(crate) struct AppWiring {
    pub(crate) config: LoopConfig,
    pub(crate) scene: Box<dyn Scene>,
}

pub(crate) fn build_app() -> AppWiring {
    init_tracing();
    info!("=== Platformer Demo Startup ===");

    let world = WorldConfig::default();
    let config = LoopConfig {
        window_width: world.screen_width as u32,
        window_height: world.screen_height as u32,
        world_width: world.world_width,
        ..LoopConfig::default()
    };
    let scene: Box<dyn Scene> = Box::new(PlatformerScene::new(world));

    AppWiring { config, scene }
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
