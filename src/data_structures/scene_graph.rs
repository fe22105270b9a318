//! Scene graph and hierarchical scene organization.
//!
//! Nodes form a tree of boxed [`SceneNode`] trait objects. Grouping nodes
//! ([`ContainerNode`]) only carry a transform; drawable nodes ([`MeshNode`])
//! additionally own geometry and a material slot. The [`Scene`] is the root
//! that loaded subtrees get inserted into.

use cgmath::Matrix4;
use log::warn;

use crate::data_structures::{
    instance::Instance,
    material::{Material, SharedMaterial, StandardMaterial},
    model::{Geometry, ModelVertex},
};

pub trait SceneNode {
    fn name(&self) -> Option<&str>;

    fn get_local_transform(&self) -> &Instance;

    fn set_local_transform(&mut self, instance: Instance);

    fn get_children(&self) -> &Vec<Box<dyn SceneNode>>;

    fn get_children_mut(&mut self) -> &mut Vec<Box<dyn SceneNode>>;

    fn add_child(&mut self, child: Box<dyn SceneNode>) {
        self.get_children_mut().push(child);
    }

    /// `Some` for nodes that can be drawn (geometry plus a material slot).
    fn as_mesh(&self) -> Option<&MeshNode> {
        None
    }

    fn as_mesh_mut(&mut self) -> Option<&mut MeshNode> {
        None
    }

    /// Pre-order walk over `self` and every descendant.
    fn traverse(&self, visit: &mut dyn FnMut(&dyn SceneNode));

    fn traverse_mut(&mut self, visit: &mut dyn FnMut(&mut dyn SceneNode));

    /// Pre-order walk handing every node its world transform.
    ///
    /// `parent` is the world matrix of whatever this node hangs off; use
    /// `Matrix4::identity()` for a root.
    fn traverse_world(
        &self,
        parent: &Matrix4<f32>,
        visit: &mut dyn FnMut(&dyn SceneNode, &Matrix4<f32>),
    );
}

pub struct ContainerNode {
    pub name: Option<String>,
    pub children: Vec<Box<dyn SceneNode>>,
    local: Instance,
}

impl ContainerNode {
    pub fn new(name: Option<&str>) -> Self {
        Self {
            name: name.map(str::to_string),
            children: Vec::new(),
            local: Instance::default(),
        }
    }
}

impl SceneNode for ContainerNode {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn get_local_transform(&self) -> &Instance {
        &self.local
    }

    fn set_local_transform(&mut self, instance: Instance) {
        self.local = instance;
    }

    fn get_children(&self) -> &Vec<Box<dyn SceneNode>> {
        &self.children
    }

    fn get_children_mut(&mut self) -> &mut Vec<Box<dyn SceneNode>> {
        &mut self.children
    }

    fn traverse(&self, visit: &mut dyn FnMut(&dyn SceneNode)) {
        visit(self);
        for child in &self.children {
            child.traverse(visit);
        }
    }

    fn traverse_mut(&mut self, visit: &mut dyn FnMut(&mut dyn SceneNode)) {
        visit(self);
        for child in self.children.iter_mut() {
            child.traverse_mut(visit);
        }
    }

    fn traverse_world(
        &self,
        parent: &Matrix4<f32>,
        visit: &mut dyn FnMut(&dyn SceneNode, &Matrix4<f32>),
    ) {
        let world = parent * self.local.to_matrix();
        visit(self, &world);
        for child in &self.children {
            child.traverse_world(&world, visit);
        }
    }
}

/// A drawable node: geometry plus a reference to the material it is drawn with.
pub struct MeshNode {
    pub name: Option<String>,
    pub geometry: Geometry,
    pub material: SharedMaterial,
    pub children: Vec<Box<dyn SceneNode>>,
    local: Instance,
}

impl MeshNode {
    pub fn new(name: Option<&str>, geometry: Geometry, material: SharedMaterial) -> Self {
        Self {
            name: name.map(str::to_string),
            geometry,
            material,
            children: Vec::new(),
            local: Instance::default(),
        }
    }

    pub fn set_material(&mut self, material: SharedMaterial) {
        self.material = material;
    }
}

impl SceneNode for MeshNode {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn get_local_transform(&self) -> &Instance {
        &self.local
    }

    fn set_local_transform(&mut self, instance: Instance) {
        self.local = instance;
    }

    fn get_children(&self) -> &Vec<Box<dyn SceneNode>> {
        &self.children
    }

    fn get_children_mut(&mut self) -> &mut Vec<Box<dyn SceneNode>> {
        &mut self.children
    }

    fn as_mesh(&self) -> Option<&MeshNode> {
        Some(self)
    }

    fn as_mesh_mut(&mut self) -> Option<&mut MeshNode> {
        Some(self)
    }

    fn traverse(&self, visit: &mut dyn FnMut(&dyn SceneNode)) {
        visit(self);
        for child in &self.children {
            child.traverse(visit);
        }
    }

    fn traverse_mut(&mut self, visit: &mut dyn FnMut(&mut dyn SceneNode)) {
        visit(self);
        for child in self.children.iter_mut() {
            child.traverse_mut(visit);
        }
    }

    fn traverse_world(
        &self,
        parent: &Matrix4<f32>,
        visit: &mut dyn FnMut(&dyn SceneNode, &Matrix4<f32>),
    ) {
        let world = parent * self.local.to_matrix();
        visit(self, &world);
        for child in &self.children {
            child.traverse_world(&world, visit);
        }
    }
}

/// The root every displayed subtree is inserted into.
#[derive(Default)]
pub struct Scene {
    children: Vec<Box<dyn SceneNode>>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a subtree. Returns its index among the scene's children.
    pub fn add(&mut self, node: Box<dyn SceneNode>) -> usize {
        self.children.push(node);
        self.children.len() - 1
    }

    pub fn children(&self) -> &[Box<dyn SceneNode>] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [Box<dyn SceneNode>] {
        &mut self.children
    }

    /// Number of direct children carrying `name`.
    pub fn count_named(&self, name: &str) -> usize {
        self.children
            .iter()
            .filter(|child| child.name() == Some(name))
            .count()
    }

    /// Every drawable node in the scene, in pre-order.
    pub fn drawables(&self) -> Vec<&MeshNode> {
        fn collect<'a>(node: &'a dyn SceneNode, out: &mut Vec<&'a MeshNode>) {
            if let Some(mesh) = node.as_mesh() {
                out.push(mesh);
            }
            for child in node.get_children() {
                collect(child.as_ref(), out);
            }
        }
        let mut out = Vec::new();
        for child in &self.children {
            collect(child.as_ref(), &mut out);
        }
        out
    }
}

/// Convert a glTF node (and its children) into scene nodes.
///
/// A mesh with a single primitive becomes a [`MeshNode`]; a mesh with several
/// primitives becomes a [`ContainerNode`] holding one [`MeshNode`] per primitive.
/// `materials` is indexed by glTF material index; primitives without a
/// material get `fallback`.
pub fn to_scene_node(
    node: gltf::scene::Node,
    buffers: &[Vec<u8>],
    materials: &[SharedMaterial],
    fallback: &SharedMaterial,
) -> Box<dyn SceneNode> {
    let name = node.name();
    let mut scene_node: Box<dyn SceneNode> = match node.mesh() {
        Some(mesh) => {
            let mut primitives: Vec<MeshNode> = mesh
                .primitives()
                .map(|primitive| {
                    let geometry = read_geometry(&primitive, buffers);
                    let material = primitive
                        .material()
                        .index()
                        .and_then(|idx| materials.get(idx))
                        .unwrap_or(fallback)
                        .clone();
                    MeshNode::new(name, geometry, material)
                })
                .collect();
            if primitives.len() == 1 {
                Box::new(primitives.remove(0))
            } else {
                let mut group = ContainerNode::new(name);
                for primitive in primitives {
                    group.add_child(Box::new(primitive));
                }
                Box::new(group)
            }
        }
        None => Box::new(ContainerNode::new(name)),
    };
    let (translation, rotation, scale) = node.transform().decomposed();
    scene_node.set_local_transform(Instance::from_decomposed(translation, rotation, scale));
    for child in node.children() {
        scene_node.add_child(to_scene_node(child, buffers, materials, fallback));
    }
    scene_node
}

fn read_geometry(primitive: &gltf::Primitive, buffers: &[Vec<u8>]) -> Geometry {
    let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(Vec::as_slice));

    let mut vertices: Vec<ModelVertex> = match reader.read_positions() {
        Some(positions) => positions
            .map(|position| ModelVertex {
                position,
                ..Default::default()
            })
            .collect(),
        None => {
            warn!("primitive {} has no positions", primitive.index());
            Vec::new()
        }
    };
    if let Some(normals) = reader.read_normals() {
        for (vertex, normal) in vertices.iter_mut().zip(normals) {
            vertex.normal = normal;
        }
    }
    if let Some(tex_coords) = reader.read_tex_coords(0).map(|v| v.into_f32()) {
        for (vertex, uv) in vertices.iter_mut().zip(tex_coords) {
            vertex.tex_coords = uv;
        }
    }
    let indices = match reader.read_indices() {
        Some(indices) => indices.into_u32().collect(),
        // non-indexed primitives draw their vertices in order
        None => (0..vertices.len() as u32).collect(),
    };
    Geometry::new(vertices, indices)
}

/// The material assigned to primitives whose glTF material is missing.
pub fn default_material() -> SharedMaterial {
    Material::Standard(StandardMaterial::default()).into_shared()
}
