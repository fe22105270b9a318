//! baked-room
//!
//! A pre-baked room scene: a model whose lighting lives in two textures (the
//! baked colors and a light map), drawn with one shared shader material whose
//! three light colors and strengths can be retuned live from a debug panel.
//!
//! High-level modules
//! - `baked`: shades the room model and inserts it into the scene
//! - `color`: hex RGB colors
//! - `config`: TOML configuration and asset sources
//! - `data_structures`: scene graph, materials, geometry, transforms, GPU textures
//! - `debug`: the live tweaking panel
//! - `error`: typed registry, uniform and color errors
//! - `experience`: owner wiring config, resources, scene and debug panel together
//! - `pipelines`: GPU resources and pipeline of the baked material
//! - `render`: uploading and drawing the shaded room
//! - `resources`: the asset registry and loaders
//!

pub mod baked;
pub mod color;
pub mod config;
pub mod data_structures;
pub mod debug;
pub mod error;
pub mod experience;
pub mod pipelines;
pub mod render;
pub mod resources;

pub use baked::Baked;
pub use color::Color;
pub use experience::Experience;
