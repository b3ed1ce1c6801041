use std::mem;

use tracing::{debug, warn};

use super::driver::AudioOutput;
use super::error::Result;

/// Fixed buzzer pitch.
pub const TONE_FREQ_HZ: u32 = 440;

enum State<D: AudioOutput> {
    /// No output device yet; waiting on the first user gesture.
    Unbound,
    /// Device exists, no tone playing.
    Idle(D),
    /// Exactly one live tone.
    Sounding(D, D::Tone),
}

/// Gates the machine's sound flag onto a platform tone generator.
///
/// The output device is created lazily, on the first user gesture, and kept
/// for the rest of the session. The tone generator exists only while the
/// machine's sound flag is up; there is never more than one, and never one
/// without a device. Sound requested before any gesture is simply dropped.
pub struct AudioGate<D: AudioOutput> {
    state: State<D>,
}

impl<D: AudioOutput> AudioGate<D> {
    pub fn new() -> Self {
        AudioGate {
            state: State::Unbound,
        }
    }

    /// Handle a qualifying user gesture. The first call constructs the
    /// output device; once one exists, further gestures are no-ops and
    /// `open` is never invoked. A failed open is logged and leaves the gate
    /// unbound for the next gesture to retry.
    pub fn bind_with<F>(&mut self, open: F)
    where
        F: FnOnce() -> Result<D>,
    {
        if let State::Unbound = self.state {
            match open() {
                Ok(device) => {
                    debug!("audio output device bound");
                    self.state = State::Idle(device);
                }
                Err(e) => warn!("audio device unavailable: {}", e),
            }
        }
    }

    pub fn has_device(&self) -> bool {
        !matches!(self.state, State::Unbound)
    }

    pub fn is_sounding(&self) -> bool {
        matches!(self.state, State::Sounding(..))
    }

    /// Feed the sound flag sampled from the machine this tick.
    pub fn set_active(&mut self, active: bool) {
        self.state = match mem::replace(&mut self.state, State::Unbound) {
            State::Idle(mut device) if active => match device.start_tone(TONE_FREQ_HZ) {
                Ok(tone) => State::Sounding(device, tone),
                Err(e) => {
                    warn!("tone start failed: {}", e);
                    State::Idle(device)
                }
            },
            State::Sounding(mut device, tone) if !active => {
                device.stop_tone(tone);
                State::Idle(device)
            }
            other => other,
        };
    }

    /// Stop any live tone and release the device. Idempotent.
    pub fn shutdown(&mut self) {
        if let State::Sounding(mut device, tone) = mem::replace(&mut self.state, State::Unbound) {
            device.stop_tone(tone);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::Error;
    use std::cell::Cell;
    use std::rc::Rc;

    struct MockTone(Rc<Cell<usize>>);

    struct MockOutput {
        live: Rc<Cell<usize>>,
        started: Rc<Cell<usize>>,
        fail_start: bool,
    }

    impl MockOutput {
        fn new() -> Self {
            MockOutput {
                live: Rc::new(Cell::new(0)),
                started: Rc::new(Cell::new(0)),
                fail_start: false,
            }
        }
    }

    impl AudioOutput for MockOutput {
        type Tone = MockTone;

        fn start_tone(&mut self, freq: u32) -> Result<MockTone> {
            assert_eq!(freq, TONE_FREQ_HZ);
            if self.fail_start {
                return Err(Error::Audio("mock refused".to_string()));
            }
            self.live.set(self.live.get() + 1);
            self.started.set(self.started.get() + 1);
            Ok(MockTone(Rc::clone(&self.live)))
        }

        fn stop_tone(&mut self, tone: MockTone) {
            tone.0.set(tone.0.get() - 1);
        }
    }

    #[test]
    fn active_before_gesture_stays_unbound() {
        let mut gate: AudioGate<MockOutput> = AudioGate::new();

        gate.set_active(true);

        assert!(!gate.has_device());
        assert!(!gate.is_sounding());
    }

    #[test]
    fn gesture_then_active_starts_one_tone() {
        let mut gate = AudioGate::new();
        let output = MockOutput::new();
        let live = Rc::clone(&output.live);

        gate.bind_with(|| Ok(output));
        assert!(gate.has_device());
        assert!(!gate.is_sounding());

        gate.set_active(true);
        assert!(gate.is_sounding());
        assert_eq!(live.get(), 1);
    }

    #[test]
    fn active_while_sounding_never_stacks_tones() {
        let mut gate = AudioGate::new();
        let output = MockOutput::new();
        let live = Rc::clone(&output.live);
        let started = Rc::clone(&output.started);

        gate.bind_with(|| Ok(output));
        for _ in 0..5 {
            gate.set_active(true);
        }

        assert!(gate.is_sounding());
        assert_eq!(live.get(), 1);
        assert_eq!(started.get(), 1);
    }

    #[test]
    fn inactive_stops_and_discards_tone() {
        let mut gate = AudioGate::new();
        let output = MockOutput::new();
        let live = Rc::clone(&output.live);

        gate.bind_with(|| Ok(output));
        gate.set_active(true);
        gate.set_active(false);

        assert!(gate.has_device());
        assert!(!gate.is_sounding());
        assert_eq!(live.get(), 0);

        // The device survives and can sound again.
        gate.set_active(true);
        assert!(gate.is_sounding());
        assert_eq!(live.get(), 1);
    }

    #[test]
    fn bind_is_idempotent() {
        let mut gate = AudioGate::new();
        let mut opens = 0;

        gate.bind_with(|| {
            opens += 1;
            Ok(MockOutput::new())
        });
        gate.bind_with(|| {
            opens += 1;
            Ok(MockOutput::new())
        });

        assert_eq!(opens, 1);
        assert!(gate.has_device());
    }

    #[test]
    fn failed_open_leaves_gate_unbound() {
        let mut gate: AudioGate<MockOutput> = AudioGate::new();

        gate.bind_with(|| Err(Error::Audio("no backend".to_string())));
        assert!(!gate.has_device());

        // A later gesture may retry.
        gate.bind_with(|| Ok(MockOutput::new()));
        assert!(gate.has_device());
    }

    #[test]
    fn failed_tone_start_falls_back_to_idle() {
        let mut gate = AudioGate::new();
        let mut output = MockOutput::new();
        output.fail_start = true;
        let live = Rc::clone(&output.live);

        gate.bind_with(|| Ok(output));
        gate.set_active(true);

        assert!(gate.has_device());
        assert!(!gate.is_sounding());
        assert_eq!(live.get(), 0);
    }

    #[test]
    fn shutdown_stops_live_tone() {
        let mut gate = AudioGate::new();
        let output = MockOutput::new();
        let live = Rc::clone(&output.live);

        gate.bind_with(|| Ok(output));
        gate.set_active(true);
        gate.shutdown();

        assert!(!gate.has_device());
        assert!(!gate.is_sounding());
        assert_eq!(live.get(), 0);

        gate.shutdown();
    }
}
