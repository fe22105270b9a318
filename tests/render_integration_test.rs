#[cfg(feature = "integration-tests")]
mod common;

#[test]
#[cfg(feature = "integration-tests")]
fn should_upload_and_draw_the_baked_room() {
    use baked_room::{
        Baked, Color,
        baked::{DEBUG_FOLDER, U_LIGHT_DESK_STRENGTH},
        data_structures::{scene_graph::Scene, texture::Texture},
        debug::Debug,
        render::BakedRenderer,
    };
    use common::test_utils::{DRAWABLES, registry};
    use futures::executor::block_on;
    use wgpu::util::DeviceExt;

    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::PRIMARY,
        ..Default::default()
    });
    let Ok(adapter) = block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
        power_preference: wgpu::PowerPreference::default(),
        compatible_surface: None,
        force_fallback_adapter: false,
    })) else {
        log::warn!("no adapter available, skipping");
        return;
    };
    let (device, queue) = block_on(adapter.request_device(&wgpu::DeviceDescriptor {
        label: None,
        required_features: wgpu::Features::empty(),
        required_limits: wgpu::Limits::default(),
        memory_hints: Default::default(),
        trace: wgpu::Trace::Off,
    }))
    .unwrap();
    device.push_error_scope(wgpu::ErrorFilter::Validation);

    let mut resources = registry();
    let mut scene = Scene::new();
    let mut debug = Debug::new();
    let baked = Baked::new(&mut resources, &mut scene, Some(&mut debug)).unwrap();

    let camera_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
        label: Some("camera_bind_group_layout"),
    });
    let view_proj: [[f32; 4]; 4] = cgmath::Matrix4::from_scale(0.5).into();
    let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("Camera Buffer"),
        contents: bytemuck::cast_slice(&[view_proj]),
        usage: wgpu::BufferUsages::UNIFORM,
    });
    let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        layout: &camera_layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: camera_buffer.as_entire_binding(),
        }],
        label: Some("camera_bind_group"),
    });

    let format = wgpu::TextureFormat::Rgba8UnormSrgb;
    let mut renderer = BakedRenderer::new(
        &device,
        &queue,
        format,
        &camera_layout,
        &scene,
        &baked.material,
    )
    .unwrap();
    assert_eq!(renderer.meshes().len(), DRAWABLES.len());

    let folder = debug.folder_mut(DEBUG_FOLDER).unwrap();
    folder.number_mut(U_LIGHT_DESK_STRENGTH).unwrap().set(0.0);
    folder.color_mut("tv").unwrap().set(Color::WHITE);
    renderer.write_to_buffer(&queue).unwrap();

    let size = wgpu::Extent3d {
        width: 8,
        height: 8,
        depth_or_array_layers: 1,
    };
    let target = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("target"),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    let view = target.create_view(&wgpu::TextureViewDescriptor::default());
    let depth = Texture::create_depth_texture(&device, [8, 8], "depth");

    let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("Render Encoder"),
    });
    {
        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &depth.view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        renderer.draw(&mut render_pass, &camera_bind_group);
    }
    queue.submit(std::iter::once(encoder.finish()));
    let _ = device.poll(wgpu::PollType::Wait);

    let error = block_on(device.pop_error_scope());
    assert!(error.is_none(), "{error:?}");
}
