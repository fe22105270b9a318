//! Live tweaking panel.
//!
//! A [`Debug`] panel holds named folders of inputs. Each input is bound to a
//! value somewhere else (a settings struct, a material uniform) through a
//! [`Binding`], and may carry change listeners. Editing an input, whether from
//! a UI widget or programmatically through [`ColorInput::set`] /
//! [`NumberInput::set`], writes through the binding first and then notifies
//! the listeners with the new value.
//!
//! With the `egui` feature the panel can draw itself into an `egui::Ui`.

use log::{debug, warn};

use crate::color::Color;

/// Read/write access to a value owned by someone else.
pub struct Binding<T> {
    get: Box<dyn Fn() -> T>,
    set: Box<dyn FnMut(T)>,
}

impl<T> Binding<T> {
    pub fn new(get: impl Fn() -> T + 'static, set: impl FnMut(T) + 'static) -> Self {
        Self {
            get: Box::new(get),
            set: Box::new(set),
        }
    }

    pub fn get(&self) -> T {
        (self.get)()
    }

    fn write(&mut self, value: T) {
        (self.set)(value)
    }
}

type Listener<T> = Box<dyn FnMut(T)>;

/// A color picker.
pub struct ColorInput {
    pub key: String,
    binding: Binding<Color>,
    listeners: Vec<Listener<Color>>,
}

impl ColorInput {
    pub fn value(&self) -> Color {
        self.binding.get()
    }

    pub fn set(&mut self, color: Color) {
        debug!("debug input {} -> {}", self.key, color);
        self.binding.write(color);
        for listener in self.listeners.iter_mut() {
            listener(color);
        }
    }

    pub fn on_change(&mut self, listener: impl FnMut(Color) + 'static) -> &mut Self {
        self.listeners.push(Box::new(listener));
        self
    }
}

/// A slider over `[min, max]`.
pub struct NumberInput {
    pub label: String,
    pub min: f32,
    pub max: f32,
    binding: Binding<f32>,
    listeners: Vec<Listener<f32>>,
}

impl NumberInput {
    pub fn value(&self) -> f32 {
        self.binding.get()
    }

    /// Write `value`, clamped to the slider's range.
    pub fn set(&mut self, value: f32) {
        let clamped = value.clamp(self.min, self.max);
        if clamped != value {
            warn!(
                "{} is outside of {}..={} for {}, clamped to {}",
                value, self.min, self.max, self.label, clamped
            );
        }
        debug!("debug input {} -> {}", self.label, clamped);
        self.binding.write(clamped);
        for listener in self.listeners.iter_mut() {
            listener(clamped);
        }
    }

    pub fn on_change(&mut self, listener: impl FnMut(f32) + 'static) -> &mut Self {
        self.listeners.push(Box::new(listener));
        self
    }
}

pub enum Input {
    Color(ColorInput),
    Number(NumberInput),
}

impl Input {
    /// The key a color input is bound to, or the label of a number input.
    pub fn label(&self) -> &str {
        match self {
            Input::Color(input) => &input.key,
            Input::Number(input) => &input.label,
        }
    }

    pub fn as_color_mut(&mut self) -> Option<&mut ColorInput> {
        match self {
            Input::Color(input) => Some(input),
            Input::Number(_) => None,
        }
    }

    pub fn as_number_mut(&mut self) -> Option<&mut NumberInput> {
        match self {
            Input::Number(input) => Some(input),
            Input::Color(_) => None,
        }
    }
}

pub struct Folder {
    pub title: String,
    pub expanded: bool,
    inputs: Vec<Input>,
}

impl Folder {
    pub fn add_color(&mut self, key: &str, binding: Binding<Color>) -> &mut ColorInput {
        self.inputs.push(Input::Color(ColorInput {
            key: key.to_string(),
            binding,
            listeners: Vec::new(),
        }));
        match self.inputs.last_mut() {
            Some(Input::Color(input)) => input,
            _ => unreachable!("a color input was just pushed"),
        }
    }

    pub fn add_number(
        &mut self,
        label: &str,
        binding: Binding<f32>,
        min: f32,
        max: f32,
    ) -> &mut NumberInput {
        self.inputs.push(Input::Number(NumberInput {
            label: label.to_string(),
            min,
            max,
            binding,
            listeners: Vec::new(),
        }));
        match self.inputs.last_mut() {
            Some(Input::Number(input)) => input,
            _ => unreachable!("a number input was just pushed"),
        }
    }

    pub fn inputs(&self) -> &[Input] {
        &self.inputs
    }

    pub fn input_mut(&mut self, label: &str) -> Option<&mut Input> {
        self.inputs.iter_mut().find(|input| input.label() == label)
    }

    pub fn color_mut(&mut self, key: &str) -> Option<&mut ColorInput> {
        self.input_mut(key).and_then(Input::as_color_mut)
    }

    pub fn number_mut(&mut self, label: &str) -> Option<&mut NumberInput> {
        self.input_mut(label).and_then(Input::as_number_mut)
    }
}

#[derive(Default)]
pub struct Debug {
    folders: Vec<Folder>,
}

impl Debug {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_folder(&mut self, title: &str, expanded: bool) -> &mut Folder {
        self.folders.push(Folder {
            title: title.to_string(),
            expanded,
            inputs: Vec::new(),
        });
        let idx = self.folders.len() - 1;
        &mut self.folders[idx]
    }

    pub fn folders(&self) -> &[Folder] {
        &self.folders
    }

    pub fn folder(&self, title: &str) -> Option<&Folder> {
        self.folders.iter().find(|folder| folder.title == title)
    }

    pub fn folder_mut(&mut self, title: &str) -> Option<&mut Folder> {
        self.folders.iter_mut().find(|folder| folder.title == title)
    }

    /// Draw every folder; edits made in the UI go through the same `set` path.
    #[cfg(feature = "egui")]
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        for folder in self.folders.iter_mut() {
            egui::CollapsingHeader::new(folder.title.as_str())
                .default_open(folder.expanded)
                .show(ui, |ui| {
                    for input in folder.inputs.iter_mut() {
                        match input {
                            Input::Color(input) => {
                                ui.horizontal(|ui| {
                                    ui.label(input.key.as_str());
                                    let mut rgb = input.value().to_array();
                                    if ui.color_edit_button_rgb(&mut rgb).changed() {
                                        input.set(Color::from(rgb));
                                    }
                                });
                            }
                            Input::Number(input) => {
                                let mut value = input.value();
                                let slider = egui::Slider::new(&mut value, input.min..=input.max)
                                    .text(input.label.as_str());
                                if ui.add(slider).changed() {
                                    input.set(value);
                                }
                            }
                        }
                    }
                });
        }
    }
}
