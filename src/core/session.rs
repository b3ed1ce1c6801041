use std::fs;
use std::path::Path;

use tracing::{debug, info, warn};

use super::audio::AudioGate;
use super::driver::{AudioOutput, Surface};
use super::error::{Error, Result};
use super::framebuffer;
use super::machine::Machine;

/// Machine cycles run per 60 Hz tick. Approximates the canonical CHIP-8
/// instruction rate; some programs want a different pace, so `Session::boot`
/// takes the cadence as a parameter rather than baking this in.
pub const DEFAULT_CYCLES_PER_TICK: u32 = 12;

/* A fault that clears up on its own (a transient bad plane read, say) is
   logged and ridden out; one that comes back tick after tick is as good as
   deterministic and ends the session. */
const FAULT_TICK_LIMIT: u32 = 3;

/// Fetches program image bytes by identifier. Transport is deliberately
/// behind this seam; the session only cares that bytes arrive.
pub trait RomLoader {
    fn fetch(&mut self, identifier: &str) -> Result<Vec<u8>>;
}

/// Reads program images from the local filesystem.
pub struct FsLoader;

impl RomLoader for FsLoader {
    fn fetch(&mut self, identifier: &str) -> Result<Vec<u8>> {
        fs::read(Path::new(identifier)).map_err(|e| Error::RomFetch(e.to_string()))
    }
}

/// One emulation session: exclusive owner of the machine handle from boot to
/// teardown. The frame trigger, input events, and the audio gesture all
/// funnel through here on a single thread.
pub struct Session<M: Machine> {
    machine: M,
    cycles_per_tick: u32,
    consecutive_faults: u32,
    stopped: bool,
}

impl<M: Machine> Session<M> {
    /// One-time setup. The program image is loaded before the first tick can
    /// possibly run; a load failure aborts the session start.
    pub fn boot(mut machine: M, rom: &[u8], cycles_per_tick: u32) -> Result<Self> {
        if cycles_per_tick == 0 {
            return Err(Error::ZeroCadence);
        }

        machine.load_rom(rom)?;
        info!(rom_bytes = rom.len(), cycles_per_tick, "session booted");

        Ok(Session {
            machine,
            cycles_per_tick,
            consecutive_faults: 0,
            stopped: false,
        })
    }

    pub fn width(&self) -> usize {
        self.machine.width()
    }

    pub fn height(&self) -> usize {
        self.machine.height()
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Halt future ticks. Idempotent; the machine keeps whatever state the
    /// last completed tick left it in.
    pub fn stop(&mut self) {
        if !self.stopped {
            debug!("session stopped");
            self.stopped = true;
        }
    }

    /// Apply a key edge to the machine immediately; edges are independent of
    /// tick boundaries. Unmapped keys never reach here, and edges arriving
    /// after stop are dropped.
    pub fn key_event(&mut self, key: u8, pressed: bool) {
        if self.stopped {
            return;
        }
        if pressed {
            self.machine.key_down(key);
        } else {
            self.machine.key_up(key);
        }
    }

    /// Run one frame: the cycle batch, one timer step, a present, and an
    /// audio sample, in that order. A no-op once the session is stopped,
    /// even if the external trigger keeps firing.
    pub fn tick<S, D>(&mut self, surface: &mut S, gate: &mut AudioGate<D>) -> Result<()>
    where
        S: Surface,
        D: AudioOutput,
    {
        if self.stopped {
            return Ok(());
        }

        let mut faulted = false;
        for _ in 0..self.cycles_per_tick {
            if let Err(e) = self.machine.execute_cycle() {
                // Abandon the rest of the batch but finish the tick.
                warn!("machine fault mid-batch: {}", e);
                faulted = true;
                break;
            }
        }

        self.machine.decrement_timer();

        let frame = framebuffer::materialize(
            self.machine.display(),
            self.machine.width(),
            self.machine.height(),
        );
        surface.present(&frame)?;

        gate.set_active(self.machine.is_sound_active());

        if faulted {
            self.consecutive_faults += 1;
            if self.consecutive_faults >= FAULT_TICK_LIMIT {
                self.stop();
                return Err(Error::MachineFault(format!(
                    "cycle fault recurred across {} ticks",
                    self.consecutive_faults
                )));
            }
        } else {
            self.consecutive_faults = 0;
        }

        Ok(())
    }
}
