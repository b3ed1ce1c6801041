use super::error::Result;

pub trait Surface {
    /// Size the surface to the machine's dimensions. Called once, at session
    /// start, before the first present.
    fn resize(&mut self, width: usize, height: usize) -> Result<()>;

    /// Display one RGBA frame of the agreed dimensions.
    fn present(&mut self, frame: &[u8]) -> Result<()>;
}

/// An output device able to mint tone generators. Implementations own the
/// platform audio handle; [`super::audio::AudioGate`] owns the lifecycle.
pub trait AudioOutput {
    type Tone;

    /// Start a tone at `freq` Hz. The tone plays until handed back to
    /// [`AudioOutput::stop_tone`].
    fn start_tone(&mut self, freq: u32) -> Result<Self::Tone>;

    fn stop_tone(&mut self, tone: Self::Tone);
}
