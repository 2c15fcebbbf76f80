//! Background music and sound effects.
//!
//! Playback runs on a dedicated audio thread that owns the output device. The rest of
//! the program talks to it through [`AudioSystem`], which forwards [`AudioCommand`]s
//! over a channel.

pub mod backend;
#[cfg(feature = "audio")]
pub mod rodio_backend;

use std::path::PathBuf;
use std::thread::JoinHandle;

use crossbeam_channel::{bounded, unbounded, Sender};
use log::{debug, error, info, warn};

use crate::engine::config::AudioSettings;
use crate::engine::error::{EngineError, EngineResult};

pub use backend::{AudioBackend, NullBackend};

pub const MAX_VOLUME: u8 = 255;
/// Music plays at half volume underneath the samples.
pub const MUSIC_VOLUME: u8 = 127;
pub const MUSIC_FILES: [&str; 3] = ["music.ogg", "music.wav", "music.mp3"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sample {
    Impact,
    Resize,
    Collide,
    Option,
    Select,
}

impl Sample {
    pub const ALL: [Sample; 5] = [Sample::Impact, Sample::Resize, Sample::Collide, Sample::Option, Sample::Select];

    pub fn index(self) -> usize {
        match self {
            Sample::Impact => 0,
            Sample::Resize => 1,
            Sample::Collide => 2,
            Sample::Option => 3,
            Sample::Select => 4,
        }
    }

    pub fn file_name(self) -> String {
        format!("sample{}.wav", self.index() + 1)
    }

    /// Pitch of the synthesized stand-in used when the sample file is missing.
    pub fn beep_frequency(self) -> f32 {
        match self {
            Sample::Impact => 220.0,
            Sample::Resize => 660.0,
            Sample::Collide => 330.0,
            Sample::Option => 880.0,
            Sample::Select => 1320.0,
        }
    }
}

/// What the demos need from the sound system.
pub trait SoundPlayer {
    fn play_sample(&mut self, sample: Sample) {
        self.play_sample_with_volume(sample, MAX_VOLUME);
    }

    fn play_sample_with_volume(&mut self, sample: Sample, volume: u8);

    fn set_master_volume(&mut self, volume: u8);

    fn set_paused(&mut self, paused: bool);

    fn is_paused(&self) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCommand {
    PlaySample { sample: Sample, volume: u8 },
    SetMasterVolume(u8),
    SetPaused(bool),
    Shutdown,
}

/// Applies one command to the backend; returns `false` once the thread should stop.
pub fn dispatch(backend: &mut dyn AudioBackend, command: AudioCommand) -> bool {
    match command {
        AudioCommand::PlaySample { sample, volume } => backend.play_sample(sample, volume),
        AudioCommand::SetMasterVolume(volume) => backend.set_master_volume(volume),
        AudioCommand::SetPaused(paused) => backend.set_paused(paused),
        AudioCommand::Shutdown => return false,
    }
    true
}

pub struct AudioSystem {
    sender: Sender<AudioCommand>,
    thread: Option<JoinHandle<()>>,
    paused: bool,
}

impl AudioSystem {
    /// Spawns the audio thread and waits until its backend is ready. The backend is
    /// created on that thread because output streams cannot move between threads.
    pub fn start(asset_dir: PathBuf, settings: &AudioSettings) -> EngineResult<Self> {
        let enabled = settings.enabled;
        let system = Self::start_with(settings.volume, move || backend::create_backend(&asset_dir, enabled))?;
        info!("Audio thread started (enabled: {}, volume: {})", enabled, settings.volume);
        Ok(system)
    }

    /// Runs the audio thread on whatever backend `create` builds. Fails when `create` does.
    pub fn start_with<F>(volume: u8, create: F) -> EngineResult<Self>
    where
        F: FnOnce() -> EngineResult<Box<dyn AudioBackend>> + Send + 'static,
    {
        let (sender, receiver) = unbounded();
        let (ready_tx, ready_rx) = bounded::<Result<(), String>>(1);

        let thread = std::thread::Builder::new()
            .name("audio".into())
            .spawn(move || {
                let mut backend = match create() {
                    Ok(backend) => backend,
                    Err(EngineError::Audio(message)) => {
                        let _ = ready_tx.send(Err(message));
                        return;
                    }
                    Err(e) => {
                        let _ = ready_tx.send(Err(e.to_string()));
                        return;
                    }
                };
                let _ = ready_tx.send(Ok(()));
                backend.set_master_volume(volume);
                backend.play_music();
                while let Ok(command) = receiver.recv() {
                    if !dispatch(backend.as_mut(), command) {
                        break;
                    }
                }
                debug!("Audio thread finished");
            })?;

        let ready = ready_rx
            .recv()
            .map_err(|_| EngineError::Audio("audio thread exited during startup".into()))
            .and_then(|result| result.map_err(EngineError::Audio));
        if let Err(e) = ready {
            error!("Failed to initialize sound: {}", e);
            if thread.join().is_err() {
                warn!("Audio thread panicked");
            }
            return Err(e);
        }

        Ok(Self {
            sender,
            thread: Some(thread),
            paused: false,
        })
    }

    fn send(&self, command: AudioCommand) {
        if self.sender.send(command).is_err() {
            warn!("Audio thread is gone, dropped {:?}", command);
        }
    }
}

impl SoundPlayer for AudioSystem {
    fn play_sample_with_volume(&mut self, sample: Sample, volume: u8) {
        if !self.paused {
            self.send(AudioCommand::PlaySample { sample, volume });
        }
    }

    fn set_master_volume(&mut self, volume: u8) {
        self.send(AudioCommand::SetMasterVolume(volume));
    }

    fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
        self.send(AudioCommand::SetPaused(paused));
    }

    fn is_paused(&self) -> bool {
        self.paused
    }
}

impl Drop for AudioSystem {
    fn drop(&mut self) {
        self.send(AudioCommand::Shutdown);
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                warn!("Audio thread panicked");
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountingBackend {
        samples: Vec<(Sample, u8)>,
        volume: u8,
        paused: bool,
    }

    impl AudioBackend for CountingBackend {
        fn play_music(&mut self) {}

        fn play_sample(&mut self, sample: Sample, volume: u8) {
            self.samples.push((sample, volume));
        }

        fn set_master_volume(&mut self, volume: u8) {
            self.volume = volume;
        }

        fn set_paused(&mut self, paused: bool) {
            self.paused = paused;
        }
    }

    struct ForwardingBackend {
        played: Sender<(Sample, u8)>,
    }

    impl AudioBackend for ForwardingBackend {
        fn play_music(&mut self) {}

        fn play_sample(&mut self, sample: Sample, volume: u8) {
            let _ = self.played.send((sample, volume));
        }

        fn set_master_volume(&mut self, _volume: u8) {}

        fn set_paused(&mut self, _paused: bool) {}
    }

    #[test]
    fn sample_files_are_numbered_from_one() {
        assert_eq!(Sample::Impact.file_name(), "sample1.wav");
        assert_eq!(Sample::Select.file_name(), "sample5.wav");
        for (i, sample) in Sample::ALL.iter().enumerate() {
            assert_eq!(sample.index(), i);
        }
    }

    #[test]
    fn dispatch_forwards_until_shutdown() {
        let mut backend = CountingBackend::default();
        assert!(dispatch(&mut backend, AudioCommand::PlaySample { sample: Sample::Collide, volume: 100 }));
        assert!(dispatch(&mut backend, AudioCommand::SetMasterVolume(30)));
        assert!(dispatch(&mut backend, AudioCommand::SetPaused(true)));
        assert!(!dispatch(&mut backend, AudioCommand::Shutdown));
        assert_eq!(backend.samples, vec![(Sample::Collide, 100)]);
        assert_eq!(backend.volume, 30);
        assert!(backend.paused);
    }

    #[test]
    fn silent_system_starts_and_stops() {
        let settings = AudioSettings {
            enabled: false,
            volume: 200,
        };
        let mut audio = AudioSystem::start(PathBuf::from("missing-assets"), &settings).unwrap();
        audio.play_sample(Sample::Impact);
        audio.set_paused(true);
        assert!(audio.is_paused());
        audio.set_paused(false);
        assert!(!audio.is_paused());
        drop(audio);
    }

    #[test]
    fn default_build_plays_sound_and_reads_controllers() {
        assert!(cfg!(feature = "audio"));
        assert!(cfg!(feature = "gamepad"));
    }

    #[test]
    fn backend_failure_aborts_start() {
        let result = AudioSystem::start_with(255, || Err(EngineError::Audio("no output device".into())));
        match result {
            Err(EngineError::Audio(message)) => assert_eq!(message, "no output device"),
            Err(other) => panic!("unexpected error {:?}", other),
            Ok(_) => panic!("audio started without a backend"),
        }
    }

    #[test]
    fn started_backend_receives_commands() {
        let (played_tx, played_rx) = unbounded();
        let mut audio = AudioSystem::start_with(40, move || {
            Ok(Box::new(ForwardingBackend { played: played_tx }) as Box<dyn AudioBackend>)
        })
        .unwrap();
        audio.play_sample_with_volume(Sample::Option, 90);
        drop(audio);
        let received: Vec<_> = played_rx.try_iter().collect();
        assert_eq!(received, vec![(Sample::Option, 90)]);
    }
}
