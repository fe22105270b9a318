//! Render pipelines.
//!
//! - `basic` builds the opaque triangle pipeline every material pipeline shares
//! - `baked` holds the GPU resources and pipeline of the baked lightmap material

pub mod baked;
pub mod basic;
