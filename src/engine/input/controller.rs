//! Game controller support. Real devices are read through gilrs when the `gamepad`
//! feature is enabled; otherwise no controller is ever connected.

use log::debug;
#[cfg(feature = "gamepad")]
use log::{info, warn};

use crate::engine::input::bindings::{Command, Control, SMALL_VOLUME_STEP};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PadButton {
    DPadUp,
    DPadDown,
    DPadLeft,
    DPadRight,
    LeftShoulder,
    RightShoulder,
    LeftTrigger,
    RightTrigger,
    Start,
    Back,
    South,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadBinding {
    Control(Control),
    Command(Command),
}

pub fn binding_for_button(button: PadButton) -> PadBinding {
    match button {
        PadButton::DPadUp => PadBinding::Control(Control::Up),
        PadButton::DPadDown => PadBinding::Control(Control::Down),
        PadButton::DPadLeft => PadBinding::Control(Control::Left),
        PadButton::DPadRight => PadBinding::Control(Control::Right),
        PadButton::LeftShoulder => PadBinding::Control(Control::PageUp),
        PadButton::RightShoulder => PadBinding::Control(Control::PageDown),
        PadButton::Start => PadBinding::Control(Control::Home),
        PadButton::South => PadBinding::Control(Control::Enter),
        PadButton::Back => PadBinding::Command(Command::NextDemo),
        PadButton::LeftTrigger => PadBinding::Command(Command::AdjustVolume(-SMALL_VOLUME_STEP)),
        PadButton::RightTrigger => PadBinding::Command(Command::AdjustVolume(SMALL_VOLUME_STEP)),
    }
}

pub struct Controller {
    #[cfg(feature = "gamepad")]
    gilrs: gilrs::Gilrs,
}

#[cfg(feature = "gamepad")]
impl Controller {
    pub fn new() -> Option<Self> {
        match gilrs::Gilrs::new() {
            Ok(gilrs) => {
                for (_id, gamepad) in gilrs.gamepads() {
                    info!("Controller connected: {}", gamepad.name());
                }
                Some(Self { gilrs })
            }
            Err(e) => {
                warn!("Controller support unavailable: {}", e);
                None
            }
        }
    }

    /// Drains pending device events, reporting each mapped button change.
    pub fn poll(&mut self, mut on_button: impl FnMut(PadButton, bool)) {
        use gilrs::EventType;

        while let Some(gilrs::Event { id, event, .. }) = self.gilrs.next_event() {
            match event {
                EventType::ButtonPressed(button, _) => {
                    if let Some(button) = map_button(button) {
                        on_button(button, true);
                    }
                }
                EventType::ButtonReleased(button, _) => {
                    if let Some(button) = map_button(button) {
                        on_button(button, false);
                    }
                }
                EventType::Connected => {
                    info!("Controller connected: {}", self.gilrs.gamepad(id).name());
                }
                EventType::Disconnected => {
                    info!("Controller disconnected");
                }
                _ => debug!("Ignored controller event {:?}", event),
            }
        }
    }
}

#[cfg(feature = "gamepad")]
fn map_button(button: gilrs::Button) -> Option<PadButton> {
    use gilrs::Button;

    Some(match button {
        Button::DPadUp => PadButton::DPadUp,
        Button::DPadDown => PadButton::DPadDown,
        Button::DPadLeft => PadButton::DPadLeft,
        Button::DPadRight => PadButton::DPadRight,
        Button::LeftTrigger => PadButton::LeftShoulder,
        Button::RightTrigger => PadButton::RightShoulder,
        Button::LeftTrigger2 => PadButton::LeftTrigger,
        Button::RightTrigger2 => PadButton::RightTrigger,
        Button::Start => PadButton::Start,
        Button::Select => PadButton::Back,
        Button::South => PadButton::South,
        _ => return None,
    })
}

#[cfg(not(feature = "gamepad"))]
impl Controller {
    pub fn new() -> Option<Self> {
        debug!("Built without controller support");
        None
    }

    pub fn poll(&mut self, _on_button: impl FnMut(PadButton, bool)) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shoulders_page_and_triggers_adjust_volume() {
        assert_eq!(binding_for_button(PadButton::LeftShoulder), PadBinding::Control(Control::PageUp));
        assert_eq!(binding_for_button(PadButton::RightShoulder), PadBinding::Control(Control::PageDown));
        assert_eq!(
            binding_for_button(PadButton::RightTrigger),
            PadBinding::Command(Command::AdjustVolume(5))
        );
        assert_eq!(binding_for_button(PadButton::Back), PadBinding::Command(Command::NextDemo));
    }
}
