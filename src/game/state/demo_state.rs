//! Demo-wide state and the handling of application commands.

use log::{debug, info};

use crate::engine::audio::{SoundPlayer, MAX_VOLUME};
use crate::engine::input::Command;
use crate::engine::timing::DEFAULT_FRAME_RATE;
use crate::game::demo::DemoKind;

/// Something only the application shell can carry out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppRequest {
    Resize(u32, u32),
    ToggleFullscreen,
    SetVSync(bool),
    SetBlending(bool),
    /// Frame cap in frames per second, 0 for unlimited.
    SetFrameRate(f32),
    Quit,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DemoState {
    pub current: DemoKind,
    pub volume: u8,
    pub paused: bool,
    pub blending: bool,
    pub lighting: bool,
    pub vsync: bool,
    pub frame_rate: f32,
    focused: bool,
    /// Whether audio was already paused when focus was lost.
    audio_paused_before_blur: bool,
}

impl Default for DemoState {
    fn default() -> Self {
        Self {
            current: DemoKind::default(),
            volume: MAX_VOLUME,
            paused: false,
            blending: true,
            lighting: false,
            vsync: false,
            frame_rate: DEFAULT_FRAME_RATE,
            focused: true,
            audio_paused_before_blur: false,
        }
    }
}

impl DemoState {
    pub fn new(current: DemoKind, volume: u8, vsync: bool, frame_rate: f32) -> Self {
        Self {
            current,
            volume,
            vsync,
            frame_rate,
            ..Self::default()
        }
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Carries out `command`, returning what the shell still has to do.
    pub fn apply(&mut self, command: Command, audio: &mut dyn SoundPlayer) -> Option<AppRequest> {
        match command {
            Command::NextDemo => {
                self.current = self.current.next();
                info!("Switched to the {} demo", self.current.name());
                None
            }
            Command::PlaySample(sample) => {
                audio.play_sample(sample);
                None
            }
            Command::AdjustVolume(step) => {
                self.volume = (self.volume as i32 + step).clamp(0, MAX_VOLUME as i32) as u8;
                debug!("Master volume {}", self.volume);
                audio.set_master_volume(self.volume);
                None
            }
            Command::TogglePause => {
                self.paused = !self.paused;
                info!("Paused: {}", self.paused);
                None
            }
            Command::ToggleBlending => {
                self.blending = !self.blending;
                Some(AppRequest::SetBlending(self.blending))
            }
            Command::ToggleLighting => {
                self.lighting = !self.lighting;
                debug!("Lighting: {}", self.lighting);
                None
            }
            Command::ToggleTurbo => {
                self.frame_rate = if self.frame_rate > 0.0 { 0.0 } else { DEFAULT_FRAME_RATE };
                Some(AppRequest::SetFrameRate(self.frame_rate))
            }
            Command::ToggleVSync => {
                self.vsync = !self.vsync;
                Some(AppRequest::SetVSync(self.vsync))
            }
            Command::SetResolution(width, height) => Some(AppRequest::Resize(width, height)),
            Command::ToggleFullscreen => Some(AppRequest::ToggleFullscreen),
            Command::Quit => Some(AppRequest::Quit),
        }
    }

    /// Pauses audio while the window is in the background and restores it afterwards.
    pub fn set_focused(&mut self, focused: bool, audio: &mut dyn SoundPlayer) {
        if focused == self.focused {
            return;
        }
        self.focused = focused;
        if focused {
            if !self.audio_paused_before_blur {
                audio.set_paused(false);
            }
        } else {
            self.audio_paused_before_blur = audio.is_paused();
            audio.set_paused(true);
        }
        debug!("Focused: {}", focused);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::audio::testing::RecordingPlayer;
    use crate::engine::audio::Sample;

    #[test]
    fn next_demo_wraps() {
        let mut state = DemoState::default();
        let mut audio = RecordingPlayer::default();
        assert_eq!(state.current, DemoKind::Particle);
        assert_eq!(state.apply(Command::NextDemo, &mut audio), None);
        assert_eq!(state.current, DemoKind::Clear);
    }

    #[test]
    fn volume_is_clamped_and_forwarded() {
        let mut state = DemoState::default();
        let mut audio = RecordingPlayer::default();
        state.apply(Command::AdjustVolume(5), &mut audio);
        assert_eq!(state.volume, 255);
        for _ in 0..6 {
            state.apply(Command::AdjustVolume(-50), &mut audio);
        }
        assert_eq!(state.volume, 0);
        state.apply(Command::AdjustVolume(-5), &mut audio);
        assert_eq!(state.volume, 0);
        state.apply(Command::AdjustVolume(5), &mut audio);
        assert_eq!(audio.volume, Some(5));
    }

    #[test]
    fn sample_commands_play_at_full_volume() {
        let mut state = DemoState::default();
        let mut audio = RecordingPlayer::default();
        state.apply(Command::PlaySample(Sample::Select), &mut audio);
        assert_eq!(audio.played, vec![(Sample::Select, MAX_VOLUME)]);
    }

    #[test]
    fn toggles_produce_requests() {
        let mut state = DemoState::default();
        let mut audio = RecordingPlayer::default();
        assert_eq!(state.apply(Command::ToggleTurbo, &mut audio), Some(AppRequest::SetFrameRate(0.0)));
        assert_eq!(state.apply(Command::ToggleTurbo, &mut audio), Some(AppRequest::SetFrameRate(60.0)));
        assert_eq!(state.apply(Command::ToggleVSync, &mut audio), Some(AppRequest::SetVSync(true)));
        assert_eq!(state.apply(Command::ToggleBlending, &mut audio), Some(AppRequest::SetBlending(false)));
        assert_eq!(state.apply(Command::ToggleLighting, &mut audio), None);
        assert!(state.lighting);
        assert_eq!(state.apply(Command::TogglePause, &mut audio), None);
        assert!(state.paused);
        assert_eq!(
            state.apply(Command::SetResolution(800, 600), &mut audio),
            Some(AppRequest::Resize(800, 600))
        );
        assert_eq!(state.apply(Command::Quit, &mut audio), Some(AppRequest::Quit));
    }

    #[test]
    fn focus_loss_pauses_audio_until_regained() {
        let mut state = DemoState::default();
        let mut audio = RecordingPlayer::default();
        state.set_focused(false, &mut audio);
        assert!(audio.paused);
        assert!(!state.is_focused());
        state.set_focused(true, &mut audio);
        assert!(!audio.paused);
    }

    #[test]
    fn focus_regain_keeps_sound_disabled_from_the_menu() {
        let mut state = DemoState::default();
        let mut audio = RecordingPlayer::default();
        audio.set_paused(true);
        state.set_focused(false, &mut audio);
        state.set_focused(true, &mut audio);
        assert!(audio.paused);
    }
}
