use std::{cell::RefCell, path::Path, rc::Rc};

use anyhow::Context;
use image::{ImageFormat, RgbaImage, load_from_memory_with_format};

use super::load_binary;

/// How the texel values of a texture are to be interpreted when sampled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Encoding {
    /// Values are used as-is (data textures such as light maps).
    #[default]
    Linear,
    /// Values are display-encoded sRGB and get decoded on sampling.
    Srgb,
}

/// A decoded image plus the flags that decide how it is uploaded to the GPU.
///
/// Freshly loaded textures are linear and flipped vertically on upload, which is
/// what a bottom-left UV origin wants. Baked textures exported for glTF already
/// match the mesh UVs, so whoever owns them switches `flip_y` off before upload.
#[derive(Clone, Debug)]
pub struct TextureAsset {
    pub name: String,
    pub image: RgbaImage,
    pub encoding: Encoding,
    pub flip_y: bool,
}

pub type SharedTexture = Rc<RefCell<TextureAsset>>;

impl TextureAsset {
    pub fn from_image(name: &str, image: RgbaImage) -> Self {
        Self {
            name: name.to_string(),
            image,
            encoding: Encoding::default(),
            flip_y: true,
        }
    }

    /// Decode raw image file contents (PNG, JPEG, ...).
    ///
    /// `format` is an optional extension hint; without it the format is guessed.
    pub fn from_bytes(name: &str, bytes: &[u8], format: Option<&str>) -> anyhow::Result<Self> {
        let img = match format.and_then(ImageFormat::from_extension) {
            Some(fmt) => load_from_memory_with_format(bytes, fmt)?,
            None => image::load_from_memory(bytes)?,
        };
        Ok(Self::from_image(name, img.to_rgba8()))
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// The texel rows in the order they are uploaded, honoring `flip_y`.
    pub fn upload_image(&self) -> RgbaImage {
        if self.flip_y {
            image::imageops::flip_vertical(&self.image)
        } else {
            self.image.clone()
        }
    }

    pub fn into_shared(self) -> SharedTexture {
        Rc::new(RefCell::new(self))
    }
}

pub async fn load_texture(name: &str, path: &Path) -> anyhow::Result<TextureAsset> {
    let data = load_binary(path).await?;
    let extension = path.extension().and_then(|ext| ext.to_str());
    TextureAsset::from_bytes(name, &data, extension)
        .with_context(|| format!("failed to decode texture `{name}` from {}", path.display()))
}
