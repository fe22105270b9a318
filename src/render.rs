//! Drawing the baked room.
//!
//! [`BakedRenderer`] uploads every drawable that shares the baked material and
//! draws them into a render pass the host application owns. Uniform edits made
//! through the debug panel reach the GPU on the next
//! [`write_to_buffer`](BakedRenderer::write_to_buffer).

use std::rc::Rc;

use cgmath::{Matrix4, SquareMatrix};
use log::{debug, warn};
use wgpu::util::DeviceExt;

use crate::{
    data_structures::{
        instance::InstanceRaw,
        material::SharedMaterial,
        scene_graph::{MeshNode, Scene, SceneNode},
    },
    pipelines::baked::{MaterialResources, mk_baked_pipeline},
};

/// One drawable's buffers, with its world transform as a single instance.
pub struct GpuMesh {
    pub name: String,
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub instance_buffer: wgpu::Buffer,
    pub num_elements: u32,
}

impl GpuMesh {
    pub fn new(device: &wgpu::Device, mesh: &MeshNode, world: &Matrix4<f32>) -> Self {
        let name = mesh.name.clone().unwrap_or_else(|| "unnamed".to_string());
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{:?} Vertex Buffer", name)),
            contents: bytemuck::cast_slice(&mesh.geometry.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{:?} Index Buffer", name)),
            contents: bytemuck::cast_slice(&mesh.geometry.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let instance_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{:?} Instance Buffer", name)),
            contents: bytemuck::cast_slice(&[InstanceRaw::from(*world)]),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });
        Self {
            name,
            vertex_buffer,
            index_buffer,
            instance_buffer,
            num_elements: mesh.geometry.num_elements(),
        }
    }
}

pub struct BakedRenderer {
    pipeline: wgpu::RenderPipeline,
    resources: MaterialResources,
    meshes: Vec<GpuMesh>,
    material: SharedMaterial,
}

impl BakedRenderer {
    /// Upload the material and every non-empty drawable in `scene` that uses it.
    ///
    /// `camera_bind_group_layout` describes the bind group later passed to
    /// [`draw`](Self::draw); its first uniform member must be `view_proj`.
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        color_format: wgpu::TextureFormat,
        camera_bind_group_layout: &wgpu::BindGroupLayout,
        scene: &Scene,
        material: &SharedMaterial,
    ) -> anyhow::Result<Self> {
        let (resources, pipeline) = {
            let shared = material.borrow();
            let shader = shared
                .as_shader()
                .ok_or_else(|| anyhow::anyhow!("{} is not a shader material", shared.name()))?;
            let resources = MaterialResources::new(device, queue, shader)?;
            let pipeline = mk_baked_pipeline(
                device,
                color_format,
                &resources.bind_group_layout,
                camera_bind_group_layout,
                shader,
            );
            (resources, pipeline)
        };

        let mut meshes = Vec::new();
        for root in scene.children() {
            root.traverse_world(&Matrix4::identity(), &mut |node, world| {
                let Some(mesh) = node.as_mesh() else {
                    return;
                };
                if !Rc::ptr_eq(&mesh.material, material) {
                    return;
                }
                if mesh.geometry.is_empty() {
                    warn!("skipping {:?}: no triangles", mesh.name);
                    return;
                }
                meshes.push(GpuMesh::new(device, mesh, world));
            });
        }
        debug!("baked renderer uploaded {} meshes", meshes.len());

        Ok(Self {
            pipeline,
            resources,
            meshes,
            material: material.clone(),
        })
    }

    pub fn meshes(&self) -> &[GpuMesh] {
        &self.meshes
    }

    /// Push the material's current light values to the GPU.
    pub fn write_to_buffer(&mut self, queue: &wgpu::Queue) -> anyhow::Result<()> {
        let shared = self.material.borrow();
        let shader = shared
            .as_shader()
            .ok_or_else(|| anyhow::anyhow!("{} is not a shader material", shared.name()))?;
        if self.resources.write_to_buffer(queue, shader)? {
            debug!("baked light uniform updated");
        }
        Ok(())
    }

    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>, camera_bind_group: &wgpu::BindGroup) {
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.resources.bind_group, &[]);
        render_pass.set_bind_group(1, camera_bind_group, &[]);
        for mesh in &self.meshes {
            render_pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
            render_pass.set_vertex_buffer(1, mesh.instance_buffer.slice(..));
            render_pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            render_pass.draw_indexed(0..mesh.num_elements, 0, 0..1);
        }
    }
}
