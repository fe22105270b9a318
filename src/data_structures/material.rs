//! Materials assigned to drawable scene nodes.
//!
//! A material is always handed around as a [`SharedMaterial`]: nodes hold a
//! reference to it, never a copy, so a uniform edited once is seen by every
//! node drawn with that material.

use std::{borrow::Cow, cell::RefCell, collections::HashMap, rc::Rc};

use crate::{color::Color, error::UniformError, resources::texture::SharedTexture};

pub type SharedMaterial = Rc<RefCell<Material>>;

#[derive(Debug)]
pub enum Material {
    /// What model loading assigns: the exporter's material name and base color.
    Standard(StandardMaterial),
    Shader(ShaderMaterial),
}

impl Material {
    pub fn name(&self) -> &str {
        match self {
            Material::Standard(m) => &m.name,
            Material::Shader(m) => &m.name,
        }
    }

    pub fn as_shader(&self) -> Option<&ShaderMaterial> {
        match self {
            Material::Shader(m) => Some(m),
            Material::Standard(_) => None,
        }
    }

    pub fn as_shader_mut(&mut self) -> Option<&mut ShaderMaterial> {
        match self {
            Material::Shader(m) => Some(m),
            Material::Standard(_) => None,
        }
    }

    pub fn into_shared(self) -> SharedMaterial {
        Rc::new(RefCell::new(self))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct StandardMaterial {
    pub name: String,
    pub base_color: Color,
}

impl Default for StandardMaterial {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            base_color: Color::WHITE,
        }
    }
}

/// The pair of programs a [`ShaderMaterial`] is drawn with.
///
/// Both stages may live in one WGSL module, in which case `vertex` and
/// `fragment` are the same text with different entry points.
#[derive(Clone, Debug, PartialEq)]
pub struct ShaderSource {
    pub vertex: Cow<'static, str>,
    pub fragment: Cow<'static, str>,
}

#[derive(Clone, Debug)]
pub enum UniformValue {
    Texture(SharedTexture),
    Color(Color),
    Float(f32),
}

impl UniformValue {
    pub fn kind(&self) -> &'static str {
        match self {
            UniformValue::Texture(_) => "texture",
            UniformValue::Color(_) => "color",
            UniformValue::Float(_) => "float",
        }
    }
}

/// A material whose look is entirely defined by its shader and uniform values.
#[derive(Debug)]
pub struct ShaderMaterial {
    pub name: String,
    pub shader: ShaderSource,
    uniforms: HashMap<String, UniformValue>,
}

impl ShaderMaterial {
    pub fn new(name: &str, shader: ShaderSource) -> Self {
        Self {
            name: name.to_string(),
            shader,
            uniforms: HashMap::new(),
        }
    }

    /// Builder-style uniform declaration.
    pub fn with_uniform(mut self, name: &str, value: UniformValue) -> Self {
        self.uniforms.insert(name.to_string(), value);
        self
    }

    pub fn uniform(&self, name: &str) -> Option<&UniformValue> {
        self.uniforms.get(name)
    }

    pub fn uniform_names(&self) -> impl Iterator<Item = &str> {
        self.uniforms.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.uniforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.uniforms.is_empty()
    }

    pub fn color(&self, name: &str) -> Result<Color, UniformError> {
        match self.lookup(name)? {
            UniformValue::Color(color) => Ok(*color),
            other => Err(mismatch(name, "color", other)),
        }
    }

    pub fn float(&self, name: &str) -> Result<f32, UniformError> {
        match self.lookup(name)? {
            UniformValue::Float(value) => Ok(*value),
            other => Err(mismatch(name, "float", other)),
        }
    }

    pub fn texture(&self, name: &str) -> Result<SharedTexture, UniformError> {
        match self.lookup(name)? {
            UniformValue::Texture(texture) => Ok(texture.clone()),
            other => Err(mismatch(name, "texture", other)),
        }
    }

    /// Overwrite the RGB of an existing color uniform in place.
    pub fn set_color(&mut self, name: &str, color: Color) -> Result<(), UniformError> {
        match self.lookup_mut(name)? {
            UniformValue::Color(slot) => {
                *slot = color;
                Ok(())
            }
            other => Err(mismatch(name, "color", other)),
        }
    }

    pub fn set_float(&mut self, name: &str, value: f32) -> Result<(), UniformError> {
        match self.lookup_mut(name)? {
            UniformValue::Float(slot) => {
                *slot = value;
                Ok(())
            }
            other => Err(mismatch(name, "float", other)),
        }
    }

    fn lookup(&self, name: &str) -> Result<&UniformValue, UniformError> {
        self.uniforms
            .get(name)
            .ok_or_else(|| UniformError::Unknown(name.to_string()))
    }

    fn lookup_mut(&mut self, name: &str) -> Result<&mut UniformValue, UniformError> {
        self.uniforms
            .get_mut(name)
            .ok_or_else(|| UniformError::Unknown(name.to_string()))
    }
}

fn mismatch(name: &str, expected: &'static str, actual: &UniformValue) -> UniformError {
    UniformError::TypeMismatch {
        name: name.to_string(),
        expected,
        actual: actual.kind(),
    }
}
