use sdl2::audio::{AudioCallback, AudioDevice, AudioSpecDesired};
use sdl2::AudioSubsystem;

use crate::core::driver::AudioOutput;
use crate::core::error::{Error, Result};

pub struct SquareWave {
    pub phase_inc: f32,
    pub phase: f32,
    pub volume: f32,
}

impl AudioCallback for SquareWave {
    type Channel = f32;

    fn callback(&mut self, out: &mut [f32]) {
        for x in out.iter_mut() {
            *x = if self.phase <= 0.5 { self.volume } else { -self.volume };
            self.phase = (self.phase + self.phase_inc) % 1.0;
        }
    }
}

/// SDL-backed tone output. The subsystem handle acts as the lazily-bound
/// output device; each tone is a playback device running [`SquareWave`].
pub struct SdlAudioOutput {
    subsystem: AudioSubsystem,
}

impl SdlAudioOutput {
    pub fn new(subsystem: AudioSubsystem) -> Self {
        SdlAudioOutput { subsystem }
    }
}

impl AudioOutput for SdlAudioOutput {
    type Tone = AudioDevice<SquareWave>;

    fn start_tone(&mut self, freq: u32) -> Result<AudioDevice<SquareWave>> {
        let desired_spec = AudioSpecDesired {
            freq: Some(44_100),
            channels: Some(1),
            samples: None,
        };

        let device = self
            .subsystem
            .open_playback(None, &desired_spec, |spec| SquareWave {
                phase_inc: freq as f32 / spec.freq as f32,
                phase: 0.0,
                volume: 0.25,
            })
            .map_err(Error::Audio)?;
        device.resume();

        Ok(device)
    }

    fn stop_tone(&mut self, tone: AudioDevice<SquareWave>) {
        tone.pause();
        // Dropping the device closes it.
    }
}
