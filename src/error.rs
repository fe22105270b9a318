//! Typed errors raised by the registry, the material model and color parsing.
//!
//! Loading and setup entry points return `anyhow::Result` and wrap these, so callers
//! that care about the exact failure can `downcast_ref` to the variants below.

use thiserror::Error;

/// Failures resolving assets from the [`crate::resources::Resources`] registry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResourceError {
    #[error("asset `{0}` is not present in the resource registry")]
    Missing(String),
    #[error("asset `{name}` is not a {expected}")]
    WrongKind { name: String, expected: &'static str },
    #[error("model `{0}` has no child node left to take")]
    EmptyModel(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorError {
    #[error("`{0}` is not a #rrggbb hex color")]
    InvalidHex(String),
}

/// Failures reading or writing a [`crate::data_structures::material::ShaderMaterial`] uniform.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UniformError {
    #[error("material has no uniform named `{0}`")]
    Unknown(String),
    #[error("uniform `{name}` holds a {actual}, not a {expected}")]
    TypeMismatch {
        name: String,
        expected: &'static str,
        actual: &'static str,
    },
}
