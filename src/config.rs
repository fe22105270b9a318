//! Runtime configuration.
//!
//! Everything has a default, so an empty TOML document (or no file at all) gives
//! the stock room: the three standard asset sources, the stock light colors and
//! strengths and no debug panel.
//!
//! ```toml
//! assets_dir = "assets"
//! debug = true
//!
//! [[sources]]
//! name = "bakedTexture"
//! kind = "texture"
//! path = "baked.jpg"
//!
//! [lights.desk]
//! color = "#ff7c00"
//! strength = 1.86
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::color::Color;

/// Setting this variable to anything but `""` or `"0"` turns the debug panel on.
pub const DEBUG_ENV_VAR: &str = "BAKED_ROOM_DEBUG";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub assets_dir: PathBuf,
    pub debug: bool,
    pub sources: Vec<Source>,
    pub lights: LightSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            assets_dir: PathBuf::from("assets"),
            debug: false,
            sources: default_sources(),
            lights: LightSettings::default(),
        }
    }
}

impl Config {
    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        toml::from_str(content).context("failed to parse configuration")
    }

    /// Read a configuration file, then apply environment overrides.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read configuration {}", path.display()))?;
        Ok(Self::from_toml_str(&content)?.with_env_overrides())
    }

    /// Apply environment overrides on top of the file settings.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(value) = std::env::var(DEBUG_ENV_VAR) {
            if !value.is_empty() && value != "0" {
                self.debug = true;
            }
        }
        self
    }

    /// Where a source is read from: absolute paths as-is, others below `assets_dir`.
    pub fn resolve(&self, source: &Source) -> PathBuf {
        if source.path.is_absolute() {
            source.path.clone()
        } else {
            self.assets_dir.join(&source.path)
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Gltf,
    Texture,
}

/// One asset to load into the registry under `name`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Source {
    pub name: String,
    pub kind: SourceKind,
    pub path: PathBuf,
}

impl Source {
    pub fn new(name: &str, kind: SourceKind, path: &str) -> Self {
        Self {
            name: name.to_string(),
            kind,
            path: PathBuf::from(path),
        }
    }
}

fn default_sources() -> Vec<Source> {
    vec![
        Source::new("roomModel", SourceKind::Gltf, "roomModel.glb"),
        Source::new("bakedTexture", SourceKind::Texture, "baked.jpg"),
        Source::new("lightMapTexture", SourceKind::Texture, "lightMap.jpg"),
    ]
}

/// Color and strength of one baked light source.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct LightSetting {
    pub color: Color,
    pub strength: f32,
}

/// Initial color and strength of the three baked light sources.
///
/// Each light may be given partially in TOML; missing fields keep that light's
/// stock value rather than a shared one.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "LightSettingsToml")]
pub struct LightSettings {
    pub tv: LightSetting,
    pub desk: LightSetting,
    pub pc: LightSetting,
}

impl Default for LightSettings {
    fn default() -> Self {
        Self {
            tv: LightSetting {
                color: Color::from_u32(0xde11ff),
                strength: 1.47,
            },
            desk: LightSetting {
                color: Color::from_u32(0xff7c00),
                strength: 1.86,
            },
            pc: LightSetting {
                color: Color::from_u32(0x4cbdff),
                strength: 1.27,
            },
        }
    }
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct LightSettingsToml {
    tv: PartialLight,
    desk: PartialLight,
    pc: PartialLight,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct PartialLight {
    color: Option<Color>,
    strength: Option<f32>,
}

impl PartialLight {
    fn or(self, stock: LightSetting) -> LightSetting {
        LightSetting {
            color: self.color.unwrap_or(stock.color),
            strength: self.strength.unwrap_or(stock.strength),
        }
    }
}

impl From<LightSettingsToml> for LightSettings {
    fn from(toml: LightSettingsToml) -> Self {
        let stock = LightSettings::default();
        Self {
            tv: toml.tv.or(stock.tv),
            desk: toml.desk.or(stock.desk),
            pc: toml.pc.or(stock.pc),
        }
    }
}
