use baked_room::{
    Baked, Color,
    baked::{
        DEBUG_FOLDER, Light, U_LIGHT_DESK_COLOR, U_LIGHT_DESK_STRENGTH, U_LIGHT_PC_COLOR,
        U_LIGHT_PC_STRENGTH, U_LIGHT_TV_COLOR, U_LIGHT_TV_STRENGTH,
    },
    data_structures::scene_graph::Scene,
    debug::{Binding, Debug, Input},
};
use std::{cell::Cell, rc::Rc};

mod common;
use common::test_utils::registry;

fn setup() -> (Baked, Debug) {
    let mut resources = registry();
    let mut scene = Scene::new();
    let mut debug = Debug::new();
    let baked = Baked::new(&mut resources, &mut scene, Some(&mut debug)).unwrap();
    (baked, debug)
}

#[test]
fn should_add_one_expanded_baked_folder() {
    let (_, debug) = setup();

    assert_eq!(debug.folders().len(), 1);
    let folder = debug.folder(DEBUG_FOLDER).unwrap();
    assert!(folder.expanded);
    let labels: Vec<&str> = folder.inputs().iter().map(Input::label).collect();
    assert_eq!(
        labels,
        [
            "tv",
            U_LIGHT_TV_STRENGTH,
            "desk",
            U_LIGHT_DESK_STRENGTH,
            "pc",
            U_LIGHT_PC_STRENGTH
        ]
    );
}

#[test]
fn should_cover_zero_to_three_on_every_slider() {
    let (_, debug) = setup();

    let folder = debug.folder(DEBUG_FOLDER).unwrap();
    let mut sliders = 0;
    for input in folder.inputs() {
        if let Input::Number(slider) = input {
            assert_eq!((slider.min, slider.max), (0.0, 3.0));
            sliders += 1;
        }
    }
    assert_eq!(sliders, 3);
}

#[test]
fn should_show_current_values() {
    let (baked, mut debug) = setup();

    let folder = debug.folder_mut(DEBUG_FOLDER).unwrap();
    assert_eq!(folder.color_mut("desk").unwrap().value().to_hex(), "#ff7c00");
    assert_eq!(folder.number_mut(U_LIGHT_PC_STRENGTH).unwrap().value(), 1.27);
    assert_eq!(
        folder.color_mut("tv").unwrap().value(),
        baked.light_color(Light::Tv)
    );
}

#[test]
fn should_only_update_the_edited_color_uniform() {
    let (baked, mut debug) = setup();
    let tv = baked.light_color(Light::Tv);
    let pc = baked.light_color(Light::Pc);

    let folder = debug.folder_mut(DEBUG_FOLDER).unwrap();
    folder.color_mut("desk").unwrap().set(Color::from_u32(0x00ff00));

    assert_eq!(baked.colors.borrow().desk, Color::from_u32(0x00ff00));
    let material = baked.material.borrow();
    let shader = material.as_shader().unwrap();
    assert_eq!(shader.color(U_LIGHT_DESK_COLOR).unwrap().to_hex(), "#00ff00");
    assert_eq!(shader.color(U_LIGHT_TV_COLOR).unwrap(), tv);
    assert_eq!(shader.color(U_LIGHT_PC_COLOR).unwrap(), pc);
    assert_eq!(shader.float(U_LIGHT_DESK_STRENGTH).unwrap(), 1.86);
}

#[test]
fn should_write_slider_values_to_the_material() {
    let (baked, mut debug) = setup();

    let folder = debug.folder_mut(DEBUG_FOLDER).unwrap();
    folder.number_mut(U_LIGHT_TV_STRENGTH).unwrap().set(0.25);

    assert_eq!(baked.light_strength(Light::Tv), 0.25);
    assert_eq!(baked.light_strength(Light::Desk), 1.86);
    assert_eq!(baked.light_strength(Light::Pc), 1.27);
}

#[test]
fn should_clamp_slider_values_to_range() {
    let (baked, mut debug) = setup();

    let folder = debug.folder_mut(DEBUG_FOLDER).unwrap();
    let slider = folder.number_mut(U_LIGHT_PC_STRENGTH).unwrap();
    slider.set(7.5);
    assert_eq!(slider.value(), 3.0);
    slider.set(-1.0);
    assert_eq!(slider.value(), 0.0);
    assert_eq!(baked.light_strength(Light::Pc), 0.0);
}

#[test]
fn should_leave_programmatic_uniform_edits_visible_in_panel() {
    let (baked, mut debug) = setup();

    baked
        .material
        .borrow_mut()
        .as_shader_mut()
        .unwrap()
        .set_float(U_LIGHT_DESK_STRENGTH, 2.5)
        .unwrap();

    let folder = debug.folder_mut(DEBUG_FOLDER).unwrap();
    assert_eq!(folder.number_mut(U_LIGHT_DESK_STRENGTH).unwrap().value(), 2.5);
}

#[test]
fn should_notify_listeners_after_the_binding_is_written() {
    let stored = Rc::new(Cell::new(0.0_f32));
    let seen = Rc::new(Cell::new(-1.0_f32));
    let mut debug = Debug::new();
    let folder = debug.add_folder("test", false);

    let read = stored.clone();
    let write = stored.clone();
    let observed = stored.clone();
    let notified = seen.clone();
    folder
        .add_number(
            "value",
            Binding::new(move || read.get(), move |v| write.set(v)),
            0.0,
            1.0,
        )
        .on_change(move |v| {
            // the binding already holds the new value
            assert_eq!(observed.get(), v);
            notified.set(v);
        });

    debug
        .folder_mut("test")
        .unwrap()
        .number_mut("value")
        .unwrap()
        .set(0.5);

    assert_eq!(stored.get(), 0.5);
    assert_eq!(seen.get(), 0.5);
    assert!(!debug.folder("test").unwrap().expanded);
}

#[test]
fn should_not_find_inputs_of_the_wrong_kind() {
    let (_, mut debug) = setup();

    let folder = debug.folder_mut(DEBUG_FOLDER).unwrap();
    assert!(folder.number_mut("tv").is_none());
    assert!(folder.color_mut(U_LIGHT_TV_STRENGTH).is_none());
    assert!(folder.input_mut("lamp").is_none());
}
