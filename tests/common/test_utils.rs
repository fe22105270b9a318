use std::rc::Rc;

use baked_room::{
    baked::{BAKED_TEXTURE, LIGHT_MAP_TEXTURE, ROOM_MODEL},
    data_structures::{
        material::{Material, SharedMaterial, StandardMaterial},
        model::{Geometry, ModelVertex},
        scene_graph::{ContainerNode, MeshNode, Scene, SceneNode},
    },
    resources::{Resources, texture::TextureAsset},
    Color,
};
use image::{Rgba, RgbaImage};

pub const ROOM: &str = "room";
/// Drawable nodes in [`room_model`], in pre-order.
pub const DRAWABLES: [&str; 4] = ["desk", "lamp", "pc", "tv"];

pub fn triangle() -> Geometry {
    let vertex = |x: f32, y: f32| ModelVertex {
        position: [x, y, 0.0],
        tex_coords: [x, y],
        normal: [0.0, 0.0, 1.0],
    };
    Geometry::new(vec![vertex(0.0, 0.0), vertex(1.0, 0.0), vertex(0.0, 1.0)], vec![0, 1, 2])
}

pub fn exported_material(name: &str) -> SharedMaterial {
    Material::Standard(StandardMaterial {
        name: name.to_string(),
        base_color: Color::WHITE,
    })
    .into_shared()
}

/// A model as the loader produces it: a root whose first child is the room.
///
/// ```text
/// <root>
/// ├── room
/// │   ├── desk (mesh)
/// │   │   └── lamp (mesh)
/// │   └── shelf
/// │       ├── pc (mesh)
/// │       └── tv (mesh)
/// └── camera_target
/// ```
pub fn room_model() -> ContainerNode {
    let wood = exported_material("wood");
    let screen = exported_material("screen");

    let mut desk = MeshNode::new(Some("desk"), triangle(), wood.clone());
    desk.add_child(Box::new(MeshNode::new(Some("lamp"), triangle(), wood)));

    let mut shelf = ContainerNode::new(Some("shelf"));
    shelf.add_child(Box::new(MeshNode::new(Some("pc"), triangle(), screen.clone())));
    shelf.add_child(Box::new(MeshNode::new(Some("tv"), triangle(), screen)));

    let mut room = ContainerNode::new(Some(ROOM));
    room.add_child(Box::new(desk));
    room.add_child(Box::new(shelf));

    let mut root = ContainerNode::new(None);
    root.add_child(Box::new(room));
    root.add_child(Box::new(ContainerNode::new(Some("camera_target"))));
    root
}

/// A 2x1 texture whose top row is white and bottom row black.
pub fn texture(name: &str) -> TextureAsset {
    let mut image = RgbaImage::new(1, 2);
    image.put_pixel(0, 0, Rgba([255, 255, 255, 255]));
    image.put_pixel(0, 1, Rgba([0, 0, 0, 255]));
    TextureAsset::from_image(name, image)
}

pub fn registry() -> Resources {
    let mut resources = Resources::new();
    resources.insert_model(ROOM_MODEL, room_model());
    resources.insert_texture(BAKED_TEXTURE, texture(BAKED_TEXTURE));
    resources.insert_texture(LIGHT_MAP_TEXTURE, texture(LIGHT_MAP_TEXTURE));
    resources
}

/// Materials of every drawable in the scene, keyed by node name.
pub fn drawable_materials(scene: &Scene) -> Vec<(String, SharedMaterial)> {
    scene
        .drawables()
        .into_iter()
        .map(|mesh| (mesh.name.clone().unwrap_or_default(), mesh.material.clone()))
        .collect()
}

pub fn all_share(materials: &[(String, SharedMaterial)], material: &SharedMaterial) -> bool {
    materials.iter().all(|(_, m)| Rc::ptr_eq(m, material))
}
