//! The owner of everything the room needs.
//!
//! An [`Experience`] holds the configuration, the resource registry, the scene,
//! the optional debug panel and the shaded room. Building one runs the whole
//! setup: load (optionally), shade, insert, wire the debug panel.

use log::info;

use crate::{
    baked::Baked,
    config::Config,
    data_structures::scene_graph::Scene,
    debug::Debug,
    resources::Resources,
};

pub struct Experience {
    pub config: Config,
    pub resources: Resources,
    pub scene: Scene,
    pub debug: Option<Debug>,
    pub baked: Baked,
}

impl Experience {
    /// Set the room up from resources that are already loaded.
    pub fn new(config: Config, mut resources: Resources) -> anyhow::Result<Self> {
        let mut scene = Scene::new();
        let mut debug = config.debug.then(Debug::new);
        let baked = Baked::with_settings(&mut resources, &mut scene, debug.as_mut(), &config.lights)?;
        info!(
            "experience ready (debug panel {})",
            if debug.is_some() { "on" } else { "off" }
        );
        Ok(Self {
            config,
            resources,
            scene,
            debug,
            baked,
        })
    }

    /// Load every configured source, then set the room up.
    ///
    /// Environment overrides are applied on top of `config` first.
    pub async fn load(config: Config) -> anyhow::Result<Self> {
        init_logging();
        let config = config.with_env_overrides();
        let resources = Resources::load(&config).await?;
        Self::new(config, resources)
    }
}

/// Route `log` output to the platform's console. Safe to call more than once.
pub fn init_logging() {
    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Err(e) = env_logger::try_init() {
            log::debug!("logger already initialised: {}", e);
        }
    }

    #[cfg(target_arch = "wasm32")]
    {
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            log::debug!("logger already initialised: {}", e);
        }
    }
}
