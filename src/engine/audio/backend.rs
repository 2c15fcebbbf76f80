//! Audio backend implementations
//!
//! The audio thread drives one of these. The rodio backend plays through the default
//! output device; the null backend only logs.

use std::path::Path;

use log::debug;
#[cfg(not(feature = "audio"))]
use log::warn;

use crate::engine::audio::Sample;
use crate::engine::error::EngineResult;

pub trait AudioBackend {
    /// Starts the looping background music, if there is any.
    fn play_music(&mut self);

    fn play_sample(&mut self, sample: Sample, volume: u8);

    fn set_master_volume(&mut self, volume: u8);

    fn set_paused(&mut self, paused: bool);
}

/// Silent backend used when audio is disabled or unavailable.
#[derive(Debug, Default)]
pub struct NullBackend {
    volume: u8,
    paused: bool,
}

impl AudioBackend for NullBackend {
    fn play_music(&mut self) {
        debug!("(silent) music");
    }

    fn play_sample(&mut self, sample: Sample, volume: u8) {
        if !self.paused {
            debug!("(silent) {:?} at volume {} of {}", sample, volume, self.volume);
        }
    }

    fn set_master_volume(&mut self, volume: u8) {
        self.volume = volume;
    }

    fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
        debug!("(silent) paused: {}", paused);
    }
}

/// Create the audio backend for this build. A disabled or audio-less build gets the
/// [`NullBackend`]; an output device that cannot be opened is an error.
pub fn create_backend(asset_dir: &Path, enabled: bool) -> EngineResult<Box<dyn AudioBackend>> {
    if !enabled {
        debug!("Audio disabled in settings");
        return Ok(Box::new(NullBackend::default()));
    }
    open_output(asset_dir)
}

#[cfg(feature = "audio")]
fn open_output(asset_dir: &Path) -> EngineResult<Box<dyn AudioBackend>> {
    Ok(Box::new(super::rodio_backend::RodioBackend::new(asset_dir)?))
}

#[cfg(not(feature = "audio"))]
fn open_output(asset_dir: &Path) -> EngineResult<Box<dyn AudioBackend>> {
    warn!("Built without audio playback, ignoring {}", asset_dir.display());
    Ok(Box::new(NullBackend::default()))
}
