//! GPU side of the baked lightmap material.
//!
//! Group 0 holds the material (baked texture, light map, shared sampler and the
//! light uniform), group 1 is the caller's camera whose first member must be
//! the `view_proj` matrix.

use wgpu::util::DeviceExt;

use crate::{
    baked::{Light, U_BAKED_TEXTURE, U_LIGHT_MAP_TEXTURE},
    data_structures::{
        instance::InstanceRaw,
        material::ShaderMaterial,
        model::{ModelVertex, Vertex},
        texture::Texture,
    },
    error::UniformError,
    pipelines::basic::mk_render_pipeline,
};

/// The light uniform as laid out in `baked.wgsl`.
///
/// Every `vec3` is followed by its light's strength, which fills the
/// 16 byte slot the uniform address space reserves for it.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BakedUniform {
    pub tv_color: [f32; 3],
    pub tv_strength: f32,
    pub desk_color: [f32; 3],
    pub desk_strength: f32,
    pub pc_color: [f32; 3],
    pub pc_strength: f32,
}

impl BakedUniform {
    pub fn from_material(material: &ShaderMaterial) -> Result<Self, UniformError> {
        let light = |light: Light| -> Result<([f32; 3], f32), UniformError> {
            Ok((
                material.color(light.color_uniform())?.to_array(),
                material.float(light.strength_uniform())?,
            ))
        };
        let (tv_color, tv_strength) = light(Light::Tv)?;
        let (desk_color, desk_strength) = light(Light::Desk)?;
        let (pc_color, pc_strength) = light(Light::Pc)?;
        Ok(Self {
            tv_color,
            tv_strength,
            desk_color,
            desk_strength,
            pc_color,
            pc_strength,
        })
    }
}

pub fn mk_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    let texture = |binding| wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Texture {
            multisampled: false,
            view_dimension: wgpu::TextureViewDimension::D2,
            sample_type: wgpu::TextureSampleType::Float { filterable: true },
        },
        count: None,
    };
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[
            texture(0),
            texture(1),
            wgpu::BindGroupLayoutEntry {
                binding: 2,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 3,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            },
        ],
        label: Some("baked_bind_group_layout"),
    })
}

/// Everything the GPU needs to draw with one baked material.
pub struct MaterialResources {
    pub baked: Texture,
    pub light_map: Texture,
    pub uniform: BakedUniform,
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub bind_group_layout: wgpu::BindGroupLayout,
}

impl MaterialResources {
    /// Upload both textures (as currently flagged) and the light uniform.
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        material: &ShaderMaterial,
    ) -> anyhow::Result<Self> {
        let baked = Texture::from_asset(device, queue, &material.texture(U_BAKED_TEXTURE)?.borrow());
        let light_map = Texture::from_asset(
            device,
            queue,
            &material.texture(U_LIGHT_MAP_TEXTURE)?.borrow(),
        );
        let uniform = BakedUniform::from_material(material)?;
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Baked Light Buffer"),
            contents: bytemuck::cast_slice(&[uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group_layout = mk_bind_group_layout(device);
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&baked.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&light_map.view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&baked.sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: buffer.as_entire_binding(),
                },
            ],
            label: Some(&format!("{} bind group", material.name)),
        });

        Ok(Self {
            baked,
            light_map,
            uniform,
            buffer,
            bind_group,
            bind_group_layout,
        })
    }

    /// Re-upload the light uniform if the material's values moved since the last write.
    pub fn write_to_buffer(
        &mut self,
        queue: &wgpu::Queue,
        material: &ShaderMaterial,
    ) -> anyhow::Result<bool> {
        let uniform = BakedUniform::from_material(material)?;
        if uniform == self.uniform {
            return Ok(false);
        }
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[uniform]));
        self.uniform = uniform;
        Ok(true)
    }
}

/// Pipeline drawing [`ModelVertex`] meshes with one [`InstanceRaw`] each.
pub fn mk_baked_pipeline(
    device: &wgpu::Device,
    color_format: wgpu::TextureFormat,
    material_layout: &wgpu::BindGroupLayout,
    camera_bind_group_layout: &wgpu::BindGroupLayout,
    material: &ShaderMaterial,
) -> wgpu::RenderPipeline {
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Baked Pipeline Layout"),
        bind_group_layouts: &[material_layout, camera_bind_group_layout],
        push_constant_ranges: &[],
    });
    let vertex = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("Baked Vertex Shader"),
        source: wgpu::ShaderSource::Wgsl(material.shader.vertex.clone()),
    });
    let fragment = if material.shader.fragment == material.shader.vertex {
        None
    } else {
        Some(device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Baked Fragment Shader"),
            source: wgpu::ShaderSource::Wgsl(material.shader.fragment.clone()),
        }))
    };
    mk_render_pipeline(
        device,
        &layout,
        color_format,
        Some(Texture::DEPTH_FORMAT),
        &[ModelVertex::desc(), InstanceRaw::desc()],
        &vertex,
        fragment.as_ref().unwrap_or(&vertex),
    )
}
