use super::error::Result;

/// Contract for the external virtual machine module.
///
/// The host never looks inside the machine: it batches cycles, steps the
/// timers once per frame, snapshots the display plane, and feeds key edges,
/// all through these calls. Construction and destruction of an
/// implementation belong to whoever boots the session; everything else
/// borrows it.
pub trait Machine {
    /// Load a program image into machine memory. Fails if the image is
    /// malformed or oversized.
    fn load_rom(&mut self, rom: &[u8]) -> Result<()>;

    /// Advance one instruction step.
    fn execute_cycle(&mut self) -> Result<()>;

    /// Step the delay/sound timers by one 60 Hz tick.
    fn decrement_timer(&mut self);

    /// Current monochrome plane, row-major, `width() * height()` pixels.
    fn display(&self) -> &[bool];

    fn width(&self) -> usize;

    fn height(&self) -> usize;

    /// Press the keypad key `key` (0x0..=0xf).
    fn key_down(&mut self, key: u8);

    /// Release the keypad key `key` (0x0..=0xf).
    fn key_up(&mut self, key: u8);

    /// Whether the machine currently wants the buzzer on.
    fn is_sound_active(&self) -> bool;
}
