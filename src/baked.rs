//! The baked room.
//!
//! [`Baked::new`] takes the room model and its two baked textures out of the
//! registry, builds the lightmap [`ShaderMaterial`], puts that one material on
//! every drawable node of the room and inserts the room into the scene. With a
//! debug panel present it also exposes the three light colors and strengths
//! for live tweaking.
//!
//! The light map stores one light per color channel: red is the TV, green the
//! desk lamp and blue the PC screen. The shader mixes each light color into the
//! baked color by that channel times the light's strength.

use std::{borrow::Cow, cell::RefCell, rc::Rc};

use log::{debug, info};

use crate::{
    color::Color,
    config::LightSettings,
    data_structures::{
        material::{Material, ShaderMaterial, ShaderSource, SharedMaterial, UniformValue},
        scene_graph::{Scene, SceneNode},
    },
    debug::{Binding, Debug},
    resources::{
        Resources,
        texture::{Encoding, SharedTexture},
    },
};

pub const ROOM_MODEL: &str = "roomModel";
pub const BAKED_TEXTURE: &str = "bakedTexture";
pub const LIGHT_MAP_TEXTURE: &str = "lightMapTexture";

pub const U_BAKED_TEXTURE: &str = "uBakedTexture";
pub const U_LIGHT_MAP_TEXTURE: &str = "uLightMapTexture";
pub const U_LIGHT_TV_COLOR: &str = "uLightTvColor";
pub const U_LIGHT_TV_STRENGTH: &str = "uLightTvStrength";
pub const U_LIGHT_DESK_COLOR: &str = "uLightDeskColor";
pub const U_LIGHT_DESK_STRENGTH: &str = "uLightDeskStrength";
pub const U_LIGHT_PC_COLOR: &str = "uLightPcColor";
pub const U_LIGHT_PC_STRENGTH: &str = "uLightPcStrength";

pub const DEBUG_FOLDER: &str = "baked";
/// Range the strength sliders cover; the uniforms themselves are unbounded.
pub const STRENGTH_RANGE: (f32, f32) = (0.0, 3.0);

/// Both stages of the lightmap shader (`vs_main` / `fs_main`).
pub const BAKED_SHADER: &str = include_str!("pipelines/baked.wgsl");

/// The three light sources baked into the light map.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Light {
    Tv,
    Desk,
    Pc,
}

impl Light {
    pub const ALL: [Light; 3] = [Light::Tv, Light::Desk, Light::Pc];

    /// The key the light's color is known by in the debug panel.
    pub fn key(self) -> &'static str {
        match self {
            Light::Tv => "tv",
            Light::Desk => "desk",
            Light::Pc => "pc",
        }
    }

    pub fn color_uniform(self) -> &'static str {
        match self {
            Light::Tv => U_LIGHT_TV_COLOR,
            Light::Desk => U_LIGHT_DESK_COLOR,
            Light::Pc => U_LIGHT_PC_COLOR,
        }
    }

    pub fn strength_uniform(self) -> &'static str {
        match self {
            Light::Tv => U_LIGHT_TV_STRENGTH,
            Light::Desk => U_LIGHT_DESK_STRENGTH,
            Light::Pc => U_LIGHT_PC_STRENGTH,
        }
    }
}

/// The editable light colors, mirrored into the material on every change.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightColors {
    pub tv: Color,
    pub desk: Color,
    pub pc: Color,
}

impl LightColors {
    pub fn get(&self, light: Light) -> Color {
        match light {
            Light::Tv => self.tv,
            Light::Desk => self.desk,
            Light::Pc => self.pc,
        }
    }

    pub fn set(&mut self, light: Light, color: Color) {
        match light {
            Light::Tv => self.tv = color,
            Light::Desk => self.desk = color,
            Light::Pc => self.pc = color,
        }
    }
}

impl From<&LightSettings> for LightColors {
    fn from(settings: &LightSettings) -> Self {
        Self {
            tv: settings.tv.color,
            desk: settings.desk.color,
            pc: settings.pc.color,
        }
    }
}

pub struct Baked {
    pub material: SharedMaterial,
    pub colors: Rc<RefCell<LightColors>>,
    pub baked_texture: SharedTexture,
    pub light_map_texture: SharedTexture,
    /// Index of the room among the scene's children.
    pub scene_index: usize,
}

impl Baked {
    /// Shade the room with the stock light settings.
    pub fn new(
        resources: &mut Resources,
        scene: &mut Scene,
        debug: Option<&mut Debug>,
    ) -> anyhow::Result<Self> {
        Self::with_settings(resources, scene, debug, &LightSettings::default())
    }

    /// Shade the room and insert it into `scene`.
    ///
    /// All three assets are resolved before anything is touched: on error the
    /// registry, the textures and the scene are left as they were.
    pub fn with_settings(
        resources: &mut Resources,
        scene: &mut Scene,
        debug: Option<&mut Debug>,
        settings: &LightSettings,
    ) -> anyhow::Result<Self> {
        let baked_texture = resources.texture(BAKED_TEXTURE)?;
        let light_map_texture = resources.texture(LIGHT_MAP_TEXTURE)?;
        let mut mesh = resources.take_model_child(ROOM_MODEL)?;

        {
            let mut baked = baked_texture.borrow_mut();
            baked.encoding = Encoding::Srgb;
            baked.flip_y = false;
        }
        light_map_texture.borrow_mut().flip_y = false;

        let colors = Rc::new(RefCell::new(LightColors::from(settings)));
        let material = mk_material(&baked_texture, &light_map_texture, settings).into_shared();

        let mut assigned = 0;
        mesh.traverse_mut(&mut |node| {
            if let Some(drawable) = node.as_mesh_mut() {
                debug!(
                    "baked material -> {}",
                    drawable.name.as_deref().unwrap_or("<unnamed>")
                );
                drawable.set_material(material.clone());
                assigned += 1;
            }
        });

        let scene_index = scene.add(mesh);
        info!("baked room added to the scene with {assigned} shaded meshes");

        let baked = Self {
            material,
            colors,
            baked_texture,
            light_map_texture,
            scene_index,
        };
        if let Some(debug) = debug {
            baked.register_debug(debug);
        }
        Ok(baked)
    }

    fn register_debug(&self, debug: &mut Debug) {
        let folder = debug.add_folder(DEBUG_FOLDER, true);
        for light in Light::ALL {
            let colors = self.colors.clone();
            let target = self.colors.clone();
            let material = self.material.clone();
            folder
                .add_color(
                    light.key(),
                    Binding::new(
                        move || colors.borrow().get(light),
                        move |color| target.borrow_mut().set(light, color),
                    ),
                )
                .on_change(move |color| {
                    write_uniform(&material, |m| m.set_color(light.color_uniform(), color));
                });

            let read = self.material.clone();
            let write = self.material.clone();
            folder.add_number(
                light.strength_uniform(),
                Binding::new(
                    move || read_strength(&read, light),
                    move |value| {
                        write_uniform(&write, |m| m.set_float(light.strength_uniform(), value))
                    },
                ),
                STRENGTH_RANGE.0,
                STRENGTH_RANGE.1,
            );
        }
    }

    pub fn light_color(&self, light: Light) -> Color {
        self.material
            .borrow()
            .as_shader()
            .and_then(|m| m.color(light.color_uniform()).ok())
            .unwrap_or(Color::BLACK)
    }

    pub fn light_strength(&self, light: Light) -> f32 {
        read_strength(&self.material, light)
    }
}

/// Build the lightmap material around the two baked textures.
pub fn mk_material(
    baked_texture: &SharedTexture,
    light_map_texture: &SharedTexture,
    settings: &LightSettings,
) -> Material {
    let shader = ShaderSource {
        vertex: Cow::Borrowed(BAKED_SHADER),
        fragment: Cow::Borrowed(BAKED_SHADER),
    };
    let material = ShaderMaterial::new("baked", shader)
        .with_uniform(U_BAKED_TEXTURE, UniformValue::Texture(baked_texture.clone()))
        .with_uniform(
            U_LIGHT_MAP_TEXTURE,
            UniformValue::Texture(light_map_texture.clone()),
        )
        .with_uniform(U_LIGHT_TV_COLOR, UniformValue::Color(settings.tv.color))
        .with_uniform(U_LIGHT_TV_STRENGTH, UniformValue::Float(settings.tv.strength))
        .with_uniform(U_LIGHT_DESK_COLOR, UniformValue::Color(settings.desk.color))
        .with_uniform(
            U_LIGHT_DESK_STRENGTH,
            UniformValue::Float(settings.desk.strength),
        )
        .with_uniform(U_LIGHT_PC_COLOR, UniformValue::Color(settings.pc.color))
        .with_uniform(U_LIGHT_PC_STRENGTH, UniformValue::Float(settings.pc.strength));
    Material::Shader(material)
}

fn read_strength(material: &SharedMaterial, light: Light) -> f32 {
    material
        .borrow()
        .as_shader()
        .and_then(|m| m.float(light.strength_uniform()).ok())
        .unwrap_or_default()
}

fn write_uniform(
    material: &SharedMaterial,
    write: impl FnOnce(&mut ShaderMaterial) -> Result<(), crate::error::UniformError>,
) {
    let mut material = material.borrow_mut();
    match material.as_shader_mut() {
        Some(shader) => {
            if let Err(e) = write(shader) {
                log::error!("{e}");
            }
        }
        None => log::error!("{} is not a shader material", material.name()),
    }
}
