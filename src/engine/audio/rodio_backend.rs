//! Rodio audio backend implementation
//!
//! Samples are read into memory once and decoded per playback. Missing sample files
//! are replaced by short sine beeps so every sound still gives feedback.

use std::fs::File;
use std::io::{BufReader, Cursor};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use log::{info, warn};
use rodio::source::SineWave;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};

use crate::engine::audio::backend::AudioBackend;
use crate::engine::audio::{Sample, MAX_VOLUME, MUSIC_FILES, MUSIC_VOLUME};
use crate::engine::error::{EngineError, EngineResult};

const BEEP_LENGTH: Duration = Duration::from_millis(120);
const BEEP_AMPLITUDE: f32 = 0.2;

fn gain(volume: u8) -> f32 {
    volume as f32 / MAX_VOLUME as f32
}

pub struct RodioBackend {
    /// Audio output stream (must be kept alive)
    _stream: OutputStream,
    handle: OutputStreamHandle,
    samples: Vec<Option<Arc<[u8]>>>,
    music_path: Option<std::path::PathBuf>,
    music: Option<Sink>,
    /// Playing samples with their own volume, before the master volume is applied.
    voices: Vec<(Sink, f32)>,
    master: f32,
    paused: bool,
}

impl RodioBackend {
    pub fn new(asset_dir: &Path) -> EngineResult<Self> {
        let (stream, handle) = OutputStream::try_default().map_err(|e| EngineError::Audio(e.to_string()))?;

        let samples = Sample::ALL
            .iter()
            .map(|sample| {
                let path = asset_dir.join(sample.file_name());
                match std::fs::read(&path) {
                    Ok(bytes) => Some(Arc::from(bytes)),
                    Err(e) => {
                        warn!("Sample {} unavailable ({}), using a beep", path.display(), e);
                        None
                    }
                }
            })
            .collect();

        let music_path = MUSIC_FILES.iter().map(|name| asset_dir.join(name)).find(|path| path.exists());
        if music_path.is_none() {
            warn!("No background music found in {}", asset_dir.display());
        }

        info!("Sound initialized");
        Ok(Self {
            _stream: stream,
            handle,
            samples,
            music_path,
            music: None,
            voices: Vec::new(),
            master: 1.0,
            paused: false,
        })
    }

    fn start_music(&self, path: &Path) -> EngineResult<Sink> {
        let file = File::open(path)?;
        let source = Decoder::new_looped(BufReader::new(file)).map_err(|e| EngineError::Audio(e.to_string()))?;
        let sink = Sink::try_new(&self.handle).map_err(|e| EngineError::Audio(e.to_string()))?;
        sink.set_volume(gain(MUSIC_VOLUME) * self.master);
        sink.append(source);
        Ok(sink)
    }

    fn start_sample(&self, sample: Sample, volume: f32) -> EngineResult<Sink> {
        let sink = Sink::try_new(&self.handle).map_err(|e| EngineError::Audio(e.to_string()))?;
        sink.set_volume(volume * self.master);
        match self.samples.get(sample.index()).cloned().flatten() {
            Some(bytes) => {
                let source = Decoder::new(Cursor::new(bytes)).map_err(|e| EngineError::Audio(e.to_string()))?;
                sink.append(source);
            }
            None => {
                let beep = SineWave::new(sample.beep_frequency())
                    .take_duration(BEEP_LENGTH)
                    .amplify(BEEP_AMPLITUDE);
                sink.append(beep);
            }
        }
        Ok(sink)
    }
}

impl AudioBackend for RodioBackend {
    fn play_music(&mut self) {
        let Some(path) = self.music_path.clone() else {
            return;
        };
        match self.start_music(&path) {
            Ok(sink) => {
                info!("Playing music {}", path.display());
                self.music = Some(sink);
            }
            Err(e) => warn!("Failed to play music {}: {}", path.display(), e),
        }
    }

    fn play_sample(&mut self, sample: Sample, volume: u8) {
        self.voices.retain(|(sink, _)| !sink.empty());
        if self.paused {
            return;
        }
        match self.start_sample(sample, gain(volume)) {
            Ok(sink) => self.voices.push((sink, gain(volume))),
            Err(e) => warn!("Failed to play {:?}: {}", sample, e),
        }
    }

    fn set_master_volume(&mut self, volume: u8) {
        self.master = gain(volume);
        if let Some(music) = &self.music {
            music.set_volume(gain(MUSIC_VOLUME) * self.master);
        }
        for (sink, own) in &self.voices {
            sink.set_volume(own * self.master);
        }
    }

    fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
        let sinks = self.music.iter().chain(self.voices.iter().map(|(sink, _)| sink));
        for sink in sinks {
            if paused {
                sink.pause();
            } else {
                sink.play();
            }
        }
    }
}
