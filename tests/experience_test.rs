use std::rc::Rc;

use baked_room::{
    Color, Experience,
    baked::{DEBUG_FOLDER, Light, ROOM_MODEL},
    config::Config,
    error::ResourceError,
};

mod common;
use common::test_utils::{ROOM, registry};

#[test]
fn should_build_without_debug_panel_by_default() {
    let experience = Experience::new(Config::default(), registry()).unwrap();

    assert!(experience.debug.is_none());
    assert_eq!(experience.scene.count_named(ROOM), 1);
    assert!(
        experience
            .scene
            .drawables()
            .iter()
            .all(|m| Rc::ptr_eq(&m.material, &experience.baked.material))
    );
}

#[test]
fn should_wire_debug_panel_when_enabled() {
    let config = Config {
        debug: true,
        ..Config::default()
    };
    let mut experience = Experience::new(config, registry()).unwrap();

    let folder = experience
        .debug
        .as_mut()
        .and_then(|debug| debug.folder_mut(DEBUG_FOLDER))
        .unwrap();
    assert_eq!(folder.inputs().len(), 6);
    folder.color_mut("pc").unwrap().set(Color::BLACK);

    assert_eq!(experience.baked.light_color(Light::Pc), Color::BLACK);
}

#[test]
fn should_use_configured_lights() {
    let mut config = Config::default();
    config.lights.tv.strength = 3.0;

    let experience = Experience::new(config, registry()).unwrap();

    assert_eq!(experience.baked.light_strength(Light::Tv), 3.0);
}

#[test]
fn should_surface_registry_errors() {
    let mut resources = registry();
    resources.take_model_child(ROOM_MODEL).unwrap();
    resources.take_model_child(ROOM_MODEL).unwrap();

    let err = Experience::new(Config::default(), resources).err().unwrap();

    assert!(matches!(
        err.downcast_ref::<ResourceError>(),
        Some(ResourceError::EmptyModel(_))
    ));
}
