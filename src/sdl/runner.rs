use sdl2::event::Event;
use sdl2::keyboard::Scancode;
use sdl2::mouse::MouseButton;

use crate::core::audio::AudioGate;
use crate::core::clock::FrameClock;
use crate::core::driver::Surface;
use crate::core::error::{Error, Result};
use crate::core::machine::Machine;
use crate::core::session::Session;

use super::audio::SdlAudioOutput;
use super::keymap;
use super::surface::SdlSurface;

const WINDOW_TITLE: &str = "CHIP-8";

/// Drive a session on an SDL window until the window closes or the session
/// dies. Blocks the calling thread; every tick and every input event runs
/// here, so the machine is never touched concurrently.
pub fn run<M: Machine>(machine: M, rom: &[u8], cycles_per_tick: u32) -> Result<()> {
    let sdl_context = sdl2::init().map_err(Error::ModuleInit)?;
    let audio_subsystem = sdl_context.audio().map_err(Error::ModuleInit)?;
    let mut event_pump = sdl_context.event_pump().map_err(Error::ModuleInit)?;

    let mut surface = SdlSurface::new(&sdl_context, WINDOW_TITLE)?;
    let mut gate: AudioGate<SdlAudioOutput> = AudioGate::new();
    let mut session = Session::boot(machine, rom, cycles_per_tick)?;

    surface.resize(session.width(), session.height())?;

    let mut clock = FrameClock::new();

    while !session.is_stopped() {
        clock.wait();

        for event in event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    scancode: Some(Scancode::Escape),
                    ..
                } => session.stop(),
                Event::KeyDown {
                    scancode: Some(scancode),
                    repeat: false,
                    ..
                } => {
                    // Any first key press doubles as the gesture that
                    // authorizes audio output.
                    gate.bind_with(|| Ok(SdlAudioOutput::new(audio_subsystem.clone())));
                    if let Some(key) = keymap::translate(scancode) {
                        session.key_event(key, true);
                    }
                }
                Event::KeyUp {
                    scancode: Some(scancode),
                    repeat: false,
                    ..
                } => {
                    if let Some(key) = keymap::translate(scancode) {
                        session.key_event(key, false);
                    }
                }
                Event::MouseButtonDown {
                    mouse_btn: MouseButton::Left,
                    ..
                } => {
                    gate.bind_with(|| Ok(SdlAudioOutput::new(audio_subsystem.clone())));
                }
                _ => (),
            }
        }

        if let Err(err) = session.tick(&mut surface, &mut gate) {
            if err.fatal() {
                gate.shutdown();
                return Err(err);
            }
        }
    }

    gate.shutdown();
    Ok(())
}
