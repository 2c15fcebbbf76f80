use log::debug;
use winit::keyboard::KeyCode;

use crate::engine::graphics::scaling::RenderScaling;
use crate::engine::input::bindings::{command_for_key, control_for_key, Command, Control};
use crate::engine::input::controller::{binding_for_button, PadBinding, PadButton};

/// Keyboard, controller and mouse state for one frame.
#[derive(Debug, Default)]
pub struct InputHandler {
    /// Held keyboard controls, most recent press last.
    key_held: Vec<Control>,
    pad_held: Vec<Control>,
    commands: Vec<Command>,
    alt_held: bool,
    mouse_x: f32,
    mouse_y: f32,
    left_button: bool,
}

fn hold(held: &mut Vec<Control>, control: Control) {
    held.retain(|c| *c != control);
    held.push(control);
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_keyboard_input_event(&mut self, keycode: KeyCode, pressed: bool, repeat: bool) {
        if matches!(keycode, KeyCode::AltLeft | KeyCode::AltRight) {
            self.alt_held = pressed;
            return;
        }
        if pressed && !repeat {
            if let Some(command) = command_for_key(keycode, self.alt_held) {
                debug!("Key {:?} -> {:?}", keycode, command);
                self.commands.push(command);
                if command == Command::ToggleFullscreen {
                    return;
                }
            }
        }
        let Some(control) = control_for_key(keycode) else {
            return;
        };
        if pressed {
            if !repeat {
                hold(&mut self.key_held, control);
            }
        } else {
            self.key_held.retain(|c| *c != control);
        }
    }

    pub fn handle_pad_button(&mut self, button: PadButton, pressed: bool) {
        match binding_for_button(button) {
            PadBinding::Control(control) => {
                if pressed {
                    hold(&mut self.pad_held, control);
                } else {
                    self.pad_held.retain(|c| *c != control);
                }
            }
            PadBinding::Command(command) => {
                if pressed {
                    debug!("Button {:?} -> {:?}", button, command);
                    self.commands.push(command);
                }
            }
        }
    }

    pub fn handle_cursor_moved(&mut self, window_x: f64, window_y: f64, scaling: &RenderScaling) {
        let (x, y) = scaling.to_internal(window_x, window_y);
        self.mouse_x = x;
        self.mouse_y = y;
    }

    pub fn handle_left_button(&mut self, pressed: bool) {
        self.left_button = pressed;
    }

    /// Forgets everything held, e.g. when the window loses focus and release events
    /// will not arrive.
    pub fn release_all(&mut self) {
        self.key_held.clear();
        self.pad_held.clear();
        self.alt_held = false;
        self.left_button = false;
    }

    pub fn take_commands(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }

    /// The single control acting this frame: the latest held controller button, else the
    /// latest held key.
    pub fn held(&self) -> Option<Control> {
        self.pad_held.last().or(self.key_held.last()).copied()
    }

    pub fn is_held(&self, control: Control) -> bool {
        self.key_held.contains(&control) || self.pad_held.contains(&control)
    }

    /// True when none of `controls` is held.
    pub fn are_up(&self, controls: &[Control]) -> bool {
        controls.iter().all(|c| !self.is_held(*c))
    }

    pub fn mouse(&self) -> (f32, f32) {
        (self.mouse_x, self.mouse_y)
    }

    pub fn is_left_pressed(&self) -> bool {
        self.left_button
    }
}
