//! Keyboard bindings for demo controls and application commands.

use winit::keyboard::KeyCode;

use crate::engine::audio::Sample;

/// Logical controls the demos react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
    Home,
    Enter,
}

/// Application-level commands, handled outside the running demo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    NextDemo,
    PlaySample(Sample),
    SetResolution(u32, u32),
    AdjustVolume(i32),
    TogglePause,
    ToggleBlending,
    ToggleLighting,
    ToggleTurbo,
    ToggleVSync,
    ToggleFullscreen,
    Quit,
}

pub const SMALL_VOLUME_STEP: i32 = 5;
pub const LARGE_VOLUME_STEP: i32 = 50;

pub fn control_for_key(key: KeyCode) -> Option<Control> {
    match key {
        KeyCode::ArrowUp => Some(Control::Up),
        KeyCode::ArrowDown => Some(Control::Down),
        KeyCode::ArrowLeft => Some(Control::Left),
        KeyCode::ArrowRight => Some(Control::Right),
        KeyCode::PageUp => Some(Control::PageUp),
        KeyCode::PageDown => Some(Control::PageDown),
        KeyCode::Home => Some(Control::Home),
        KeyCode::Enter | KeyCode::NumpadEnter => Some(Control::Enter),
        _ => None,
    }
}

pub fn command_for_key(key: KeyCode, alt_held: bool) -> Option<Command> {
    let command = match key {
        KeyCode::Enter if alt_held => Command::ToggleFullscreen,
        KeyCode::Space => Command::NextDemo,
        KeyCode::Digit1 => Command::PlaySample(Sample::Impact),
        KeyCode::Digit2 => Command::PlaySample(Sample::Resize),
        KeyCode::Digit3 => Command::PlaySample(Sample::Collide),
        KeyCode::Digit4 => Command::PlaySample(Sample::Option),
        KeyCode::Digit5 => Command::PlaySample(Sample::Select),
        KeyCode::F1 => Command::SetResolution(320, 240),
        KeyCode::F2 => Command::SetResolution(400, 300),
        KeyCode::F3 => Command::SetResolution(640, 480),
        KeyCode::F4 => Command::SetResolution(800, 600),
        KeyCode::F5 => Command::SetResolution(1024, 768),
        KeyCode::NumpadAdd => Command::AdjustVolume(SMALL_VOLUME_STEP),
        KeyCode::NumpadSubtract => Command::AdjustVolume(-SMALL_VOLUME_STEP),
        KeyCode::BracketRight => Command::AdjustVolume(LARGE_VOLUME_STEP),
        KeyCode::BracketLeft => Command::AdjustVolume(-LARGE_VOLUME_STEP),
        KeyCode::KeyP => Command::TogglePause,
        KeyCode::KeyB => Command::ToggleBlending,
        KeyCode::KeyL => Command::ToggleLighting,
        KeyCode::KeyT => Command::ToggleTurbo,
        KeyCode::KeyV => Command::ToggleVSync,
        KeyCode::Escape => Command::Quit,
        _ => return None,
    };
    Some(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alt_enter_toggles_fullscreen_instead_of_selecting() {
        assert_eq!(command_for_key(KeyCode::Enter, true), Some(Command::ToggleFullscreen));
        assert_eq!(command_for_key(KeyCode::Enter, false), None);
        assert_eq!(control_for_key(KeyCode::Enter), Some(Control::Enter));
    }

    #[test]
    fn function_keys_pick_resolutions() {
        assert_eq!(command_for_key(KeyCode::F1, false), Some(Command::SetResolution(320, 240)));
        assert_eq!(command_for_key(KeyCode::F5, false), Some(Command::SetResolution(1024, 768)));
    }

    #[test]
    fn volume_keys_use_small_and_large_steps() {
        assert_eq!(command_for_key(KeyCode::NumpadAdd, false), Some(Command::AdjustVolume(5)));
        assert_eq!(command_for_key(KeyCode::BracketLeft, false), Some(Command::AdjustVolume(-50)));
    }

    #[test]
    fn arrows_are_controls_not_commands() {
        assert_eq!(control_for_key(KeyCode::ArrowLeft), Some(Control::Left));
        assert_eq!(command_for_key(KeyCode::ArrowLeft, false), None);
        assert_eq!(control_for_key(KeyCode::KeyQ), None);
    }
}
