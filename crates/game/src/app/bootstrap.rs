use std::path::PathBuf;

use engine::{resolve_app_paths, AppPaths, LoopConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use super::config::{SCREEN_HEIGHT, SCREEN_WIDTH, TARGET_FPS, WINDOW_TITLE};
use super::host::SceneHost;
use super::placeholders::load_assets;

pub(crate) struct AppWiring {
    pub(crate) config: LoopConfig,
    pub(crate) host: SceneHost,
}

pub(crate) fn build_app() -> AppWiring {
    init_tracing();
    info!("=== CodeFrontier Startup ===");

    let paths = resolve_app_paths().unwrap_or_else(|error| {
        warn!(error = %error, "root_not_found_using_working_dir");
        AppPaths::from_root(PathBuf::from("."))
    });
    info!(
        root = %paths.root.display(),
        assets = %paths.assets_dir.display(),
        "startup_paths"
    );

    let assets = load_assets(&paths.assets_dir);
    let config = LoopConfig {
        window_title: WINDOW_TITLE.to_string(),
        window_width: SCREEN_WIDTH as u32,
        window_height: SCREEN_HEIGHT as u32,
        target_fps: TARGET_FPS,
        ..LoopConfig::default()
    };

    AppWiring {
        config,
        host: SceneHost::new(assets),
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
