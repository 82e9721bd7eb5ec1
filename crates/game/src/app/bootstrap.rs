use std::env;
use std::fs;

use engine::LoopConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

use super::config::GameConfig;

const CONFIG_PATH_ENV_VAR: &str = "OREDRIFT_CONFIG";
const DEMO_TICKS_ENV_VAR: &str = "OREDRIFT_DEMO_TICKS";
const SEED_ENV_VAR: &str = "OREDRIFT_SEED";
const DEMO_TICKS_DEFAULT: u64 = 1800;

pub(crate) struct AppWiring {
    pub(crate) loop_config: LoopConfig,
    pub(crate) game_config: GameConfig,
    pub(crate) demo_tick_budget: u64,
    pub(crate) seed: Option<u64>,
}

pub(crate) fn build_app() -> Result<AppWiring, String> {
    init_tracing();
    info!("=== Oredrift Startup ===");

    let game_config = load_game_config()?;
    let seed = parse_seed_from_env()?;
    if let Some(seed) = seed {
        info!(seed, "seeded_run");
    }
    Ok(AppWiring {
        loop_config: LoopConfig::default(),
        game_config,
        demo_tick_budget: parse_demo_ticks_from_env(),
        seed,
    })
}

fn parse_seed_from_env() -> Result<Option<u64>, String> {
    match env::var(SEED_ENV_VAR) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|error| format!("parse {SEED_ENV_VAR} '{raw}': {error}")),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(error) => Err(format!("read {SEED_ENV_VAR}: {error}")),
    }
}

fn load_game_config() -> Result<GameConfig, String> {
    match env::var(CONFIG_PATH_ENV_VAR) {
        Ok(path) => {
            let raw = fs::read_to_string(&path)
                .map_err(|error| format!("read config '{path}': {error}"))?;
            let config = GameConfig::from_json_str(&raw)?;
            info!(path = %path, "config_loaded");
            Ok(config)
        }
        Err(env::VarError::NotPresent) => Ok(GameConfig::default()),
        Err(error) => Err(format!("read {CONFIG_PATH_ENV_VAR}: {error}")),
    }
}

fn parse_demo_ticks_from_env() -> u64 {
    env::var(DEMO_TICKS_ENV_VAR)
        .ok()
        .and_then(|raw| raw.trim().parse().ok())
        .unwrap_or(DEMO_TICKS_DEFAULT)
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
