//! Scene data: node hierarchy, materials, geometry, transforms and GPU textures.
//!
//! - `scene_graph` holds the node tree the baked room is inserted into
//! - `material` holds the shared material model and its uniforms
//! - `model` holds CPU-side vertex and index data
//! - `instance` holds node transforms
//! - `texture` holds GPU texture wrappers

pub mod instance;
pub mod material;
pub mod model;
pub mod scene_graph;
pub mod texture;
