//! The resource registry and everything that fills it from files.
//!
//! Assets are loaded up front (see [`Resources::load`]) and looked up later by
//! name. Textures are shared handles, so flags changed on a texture fetched from
//! the registry are visible to every other holder of it.

use std::{collections::HashMap, path::Path};

use anyhow::Context;
use log::{debug, info};

use crate::{
    config::{Config, SourceKind},
    data_structures::{
        material::{Material, SharedMaterial, StandardMaterial},
        scene_graph::{ContainerNode, SceneNode, default_material, to_scene_node},
    },
    color::Color,
    error::ResourceError,
    resources::texture::{SharedTexture, TextureAsset, load_texture},
};

pub mod texture;

/// Anything the registry can hold.
pub enum Asset {
    /// A loaded model: a root container whose children are the file's top level nodes.
    Model(ContainerNode),
    Texture(SharedTexture),
}

impl Asset {
    fn kind(&self) -> &'static str {
        match self {
            Asset::Model(_) => "model",
            Asset::Texture(_) => "texture",
        }
    }
}

#[derive(Default)]
pub struct Resources {
    items: HashMap<String, Asset>,
}

impl Resources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every source listed in `config`.
    pub async fn load(config: &Config) -> anyhow::Result<Self> {
        let mut resources = Self::new();
        let total = config.sources.len();
        for (loaded, source) in config.sources.iter().enumerate() {
            let path = config.resolve(source);
            match source.kind {
                SourceKind::Gltf => {
                    let model = load_model_gltf(&path).await?;
                    resources.insert_model(&source.name, model);
                }
                SourceKind::Texture => {
                    let texture = load_texture(&source.name, &path).await?;
                    resources.insert_texture(&source.name, texture);
                }
            }
            info!("loaded {} ({}/{})", source.name, loaded + 1, total);
        }
        Ok(resources)
    }

    pub fn insert_model(&mut self, name: &str, model: ContainerNode) {
        self.items.insert(name.to_string(), Asset::Model(model));
    }

    /// Register a texture and return the shared handle now held by the registry.
    pub fn insert_texture(&mut self, name: &str, texture: TextureAsset) -> SharedTexture {
        let shared = texture.into_shared();
        self.items
            .insert(name.to_string(), Asset::Texture(shared.clone()));
        shared
    }

    pub fn contains(&self, name: &str) -> bool {
        self.items.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn texture(&self, name: &str) -> Result<SharedTexture, ResourceError> {
        match self.get(name)? {
            Asset::Texture(texture) => Ok(texture.clone()),
            other => Err(wrong_kind(name, "texture", other)),
        }
    }

    pub fn model(&self, name: &str) -> Result<&ContainerNode, ResourceError> {
        match self.get(name)? {
            Asset::Model(model) => Ok(model),
            other => Err(wrong_kind(name, "model", other)),
        }
    }

    /// Detach the first top level node of a model so it can be placed in a scene.
    ///
    /// A node lives in exactly one tree; once taken it is gone from the model,
    /// and taking again yields the next one or [`ResourceError::EmptyModel`].
    pub fn take_model_child(&mut self, name: &str) -> Result<Box<dyn SceneNode>, ResourceError> {
        let model = match self.items.get_mut(name) {
            Some(Asset::Model(model)) => model,
            Some(other) => return Err(wrong_kind(name, "model", other)),
            None => return Err(ResourceError::Missing(name.to_string())),
        };
        if model.children.is_empty() {
            return Err(ResourceError::EmptyModel(name.to_string()));
        }
        Ok(model.children.remove(0))
    }

    fn get(&self, name: &str) -> Result<&Asset, ResourceError> {
        self.items
            .get(name)
            .ok_or_else(|| ResourceError::Missing(name.to_string()))
    }
}

fn wrong_kind(name: &str, expected: &'static str, actual: &Asset) -> ResourceError {
    debug!("asset {name} is a {}", actual.kind());
    ResourceError::WrongKind {
        name: name.to_string(),
        expected,
    }
}

#[cfg(target_arch = "wasm32")]
fn format_url(path: &Path) -> anyhow::Result<reqwest::Url> {
    let window = web_sys::window().context("no window available")?;
    let origin = window
        .location()
        .origin()
        .map_err(|_| anyhow::anyhow!("page has no origin"))?;
    let base = reqwest::Url::parse(&format!("{}/", origin))?;
    Ok(base.join(&path.to_string_lossy())?)
}

pub async fn load_binary(path: &Path) -> anyhow::Result<Vec<u8>> {
    #[cfg(target_arch = "wasm32")]
    let data = {
        let url = format_url(path)?;
        reqwest::get(url).await?.bytes().await?.to_vec()
    };
    #[cfg(not(target_arch = "wasm32"))]
    let data = std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;

    Ok(data)
}

/// Load a `.gltf`/`.glb` file into a model container.
///
/// External buffers are resolved relative to the model's directory.
pub async fn load_model_gltf(path: &Path) -> anyhow::Result<ContainerNode> {
    let bytes = load_binary(path).await?;
    let gltf = gltf::Gltf::from_slice(&bytes)
        .with_context(|| format!("failed to parse glTF {}", path.display()))?;

    let base = path.parent().unwrap_or_else(|| Path::new(""));
    let mut buffers = Vec::new();
    for buffer in gltf.buffers() {
        match buffer.source() {
            gltf::buffer::Source::Bin => {
                buffers.push(gltf.blob.clone().context("GLB binary chunk is missing")?);
            }
            gltf::buffer::Source::Uri(uri) => {
                buffers.push(load_binary(&base.join(uri)).await?);
            }
        }
    }
    Ok(build_model(&gltf, &buffers))
}

/// Build a model container from a glTF document already in memory.
///
/// Only the binary chunk of a GLB is available as buffer data here; documents
/// referencing external buffers need [`load_model_gltf`].
pub fn model_from_slice(bytes: &[u8]) -> anyhow::Result<ContainerNode> {
    let gltf = gltf::Gltf::from_slice(bytes)?;
    let buffers: Vec<Vec<u8>> = gltf.blob.iter().cloned().collect();
    Ok(build_model(&gltf, &buffers))
}

fn build_model(gltf: &gltf::Gltf, buffers: &[Vec<u8>]) -> ContainerNode {
    // one shared material per glTF material, like the exporter intended
    let materials: Vec<SharedMaterial> = gltf
        .materials()
        .map(|material| {
            let [r, g, b, _] = material.pbr_metallic_roughness().base_color_factor();
            Material::Standard(StandardMaterial {
                name: material.name().unwrap_or("unnamed").to_string(),
                base_color: Color::new(r, g, b),
            })
            .into_shared()
        })
        .collect();
    let fallback = default_material();

    let mut root = ContainerNode::new(None);
    let scene = gltf.default_scene().or_else(|| gltf.scenes().next());
    if let Some(scene) = scene {
        for node in scene.nodes() {
            root.add_child(to_scene_node(node, buffers, &materials, &fallback));
        }
    }
    debug!("model has {} top level nodes", root.children.len());
    root
}
